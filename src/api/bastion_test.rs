#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::api::error::ApiError;
    use crate::api::test_helpers::create_test_client;
    use crate::waiter::WaitConfig;
    use mockito::{Matcher, Server};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn quick_wait() -> WaitConfig {
        WaitConfig::new(Duration::from_millis(10), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_deploy_instance() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/bastion/instances/bh-1a2b/deploy")
            .match_header("content-type", "application/json")
            .match_body(Matcher::JsonString(
                r#"{"zone":"ap-guangzhou-3","vpc_id":"vpc-9f81","subnet_id":"subnet-44c0"}"#
                    .to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":null}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let api = BastionApi::new(&client);

        let request = DeployInstanceRequest {
            zone: Some("ap-guangzhou-3".to_string()),
            vpc_id: Some("vpc-9f81".to_string()),
            subnet_id: Some("subnet-44c0".to_string()),
            ..Default::default()
        };

        let result = api.deploy_instance("bh-1a2b", &request).await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_instance() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/v1/bastion/instances/bh-1a2b")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "data": {
                    "instance_id": "bh-1a2b",
                    "name": "edge-bastion",
                    "status": 2,
                    "public_ip": "203.0.113.10",
                    "private_ip": "10.0.0.4",
                    "zone": "ap-guangzhou-3"
                }
            }"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let api = BastionApi::new(&client);
        let instance = api.get_instance("bh-1a2b").await.unwrap();

        assert_eq!(instance.instance_id, "bh-1a2b");
        assert_eq!(instance.name, Some("edge-bastion".to_string()));
        assert_eq!(instance.status, InstanceState::Running);
        assert_eq!(instance.public_ip, Some("203.0.113.10".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_state_code_is_a_parse_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/v1/bastion/instances/bh-1a2b")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"instance_id":"bh-1a2b","status":9}}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let api = BastionApi::new(&client);
        let result = api.get_instance("bh-1a2b").await;

        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn test_wait_until_deployed_polls_until_running() {
        let mut server = Server::new_async().await;
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        let _m = server
            .mock("GET", "/v1/bastion/instances/bh-1a2b")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |_| {
                let n = hits_clone.fetch_add(1, Ordering::SeqCst);
                let body = if n < 2 {
                    r#"{"data":{"instance_id":"bh-1a2b","status":1}}"#
                } else {
                    r#"{"data":{"instance_id":"bh-1a2b","status":2,"public_ip":"203.0.113.10"}}"#
                };
                body.as_bytes().to_vec()
            })
            .expect_at_least(3)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let api = BastionApi::new(&client);
        let instance = api
            .wait_until_deployed("bh-1a2b", &quick_wait())
            .await
            .unwrap();

        assert_eq!(instance.status, InstanceState::Running);
        assert_eq!(instance.public_ip, Some("203.0.113.10".to_string()));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_deploy_failure_surfaces_raw_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/v1/bastion/instances/bh-1a2b")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data":{"instance_id":"bh-1a2b","status":3,"status_message":"subnet address space exhausted"}}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let api = BastionApi::new(&client);
        let result = api.wait_until_deployed("bh-1a2b", &quick_wait()).await;

        match result {
            Err(crate::waiter::WaitError::Failed { reason, .. }) => {
                assert_eq!(reason, "subnet address space exhausted");
            }
            other => panic!("Expected failure, got {:?}", other.map(|i| i.instance_id)),
        }
    }

    #[tokio::test]
    async fn test_deploy_and_wait_triggers_then_polls() {
        let mut server = Server::new_async().await;
        let deploy_mock = server
            .mock("POST", "/v1/bastion/instances/bh-1a2b/deploy")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":null}"#)
            .expect(1)
            .create_async()
            .await;
        let status_mock = server
            .mock("GET", "/v1/bastion/instances/bh-1a2b")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"instance_id":"bh-1a2b","status":2}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let api = BastionApi::new(&client);
        let instance = api
            .deploy_and_wait("bh-1a2b", &DeployInstanceRequest::default(), &quick_wait())
            .await
            .unwrap();

        assert_eq!(instance.status, InstanceState::Running);
        deploy_mock.assert_async().await;
        status_mock.assert_async().await;
    }

    #[test]
    fn test_instance_state_codes_round_trip() {
        for state in [
            InstanceState::Pending,
            InstanceState::Deploying,
            InstanceState::Running,
            InstanceState::DeployFailed,
            InstanceState::Isolated,
        ] {
            assert_eq!(InstanceState::try_from(state.code()), Ok(state));
        }
        assert!(InstanceState::try_from(9).is_err());
    }
}
