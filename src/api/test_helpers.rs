//! Test helpers for the API client

#[allow(dead_code)]
pub fn create_test_client(url: &str) -> super::Client {
    super::Client::new(url, "test-token", true).unwrap()
}

mod tests {
    use super::super::*;

    #[test]
    fn test_retry_config_defaults() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.initial_backoff_ms, 100);
        assert_eq!(config.max_backoff_ms, 10000);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_http_settings_defaults() {
        let settings = HttpSettings::default();
        assert_eq!(settings.request_timeout.as_secs(), 30);
        assert_eq!(settings.connect_timeout.as_secs(), 10);
        assert_eq!(settings.pool_idle_timeout.as_secs(), 90);
        assert_eq!(settings.pool_max_idle_per_host, 10);
        assert_eq!(settings.tcp_keepalive.unwrap().as_secs(), 30);
    }

    #[test]
    fn test_api_query_params() {
        let params = ApiQueryParams::new()
            .add("foo", "bar")
            .add("baz", 123)
            .add_optional("opt", Some("value"))
            .add_optional("none", None::<String>);

        let query = params.to_query_string();
        assert!(query.contains("foo=bar"));
        assert!(query.contains("baz=123"));
        assert!(query.contains("opt=value"));
        assert!(!query.contains("none="));
    }

    #[test]
    fn test_api_error_formatting() {
        let error = ApiError::Api {
            status: 400,
            code: "InvalidParameter".to_string(),
            message: "Bad Request".to_string(),
        };

        let error_str = error.to_string();
        assert!(error_str.contains("HTTP 400"));
        assert!(error_str.contains("InvalidParameter"));
        assert!(error_str.contains("Bad Request"));
    }

    #[test]
    fn test_error_retryability() {
        assert!(ApiError::RateLimited.is_retryable());
        assert!(ApiError::ServiceUnavailable.is_retryable());
        assert!(ApiError::Timeout(30).is_retryable());
        assert!(ApiError::Api {
            status: 500,
            code: "InternalError".to_string(),
            message: "boom".to_string(),
        }
        .is_retryable());

        assert!(!ApiError::Auth.is_retryable());
        assert!(!ApiError::Parse("bad json".to_string()).is_retryable());
        assert!(!ApiError::Api {
            status: 400,
            code: "InvalidParameter".to_string(),
            message: "bad zone".to_string(),
        }
        .is_retryable());
    }
}
