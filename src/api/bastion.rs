//! Bastion host service API

use crate::api::{error::ApiError, Client};
use crate::waiter::{self, Progress, StatusSnapshot, WaitConfig, WaitError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Deployment lifecycle of a bastion instance, reported as a numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Pending,
    Deploying,
    Running,
    DeployFailed,
    Isolated,
}

impl InstanceState {
    pub fn code(&self) -> u8 {
        match self {
            InstanceState::Pending => 0,
            InstanceState::Deploying => 1,
            InstanceState::Running => 2,
            InstanceState::DeployFailed => 3,
            InstanceState::Isolated => 4,
        }
    }
}

impl TryFrom<u8> for InstanceState {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(InstanceState::Pending),
            1 => Ok(InstanceState::Deploying),
            2 => Ok(InstanceState::Running),
            3 => Ok(InstanceState::DeployFailed),
            4 => Ok(InstanceState::Isolated),
            other => Err(format!("unknown instance state code {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for InstanceState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        InstanceState::try_from(code).map_err(serde::de::Error::custom)
    }
}

impl Serialize for InstanceState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

/// Instance detail returned by the status endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BastionInstance {
    pub instance_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub status: InstanceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl StatusSnapshot for BastionInstance {
    fn progress(&self) -> Progress {
        match self.status {
            InstanceState::Running => Progress::Done,
            InstanceState::DeployFailed | InstanceState::Isolated => {
                Progress::Failed(self.status_message.clone().unwrap_or_else(|| {
                    format!("instance entered state {:?}", self.status)
                }))
            }
            InstanceState::Pending | InstanceState::Deploying => Progress::Pending,
        }
    }
}

/// Request for deploying a bastion instance into a network
#[derive(Debug, Clone, Serialize, Default)]
pub struct DeployInstanceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr_block: Option<String>,
}

/// Bastion API providing instance operations
pub struct BastionApi<'a> {
    client: &'a Client,
}

impl<'a> BastionApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// POST /v1/bastion/instances/{id}/deploy
    ///
    /// Accepted deployments run asynchronously; poll the instance until it
    /// leaves the deploying states.
    pub async fn deploy_instance(
        &self,
        instance_id: &str,
        request: &DeployInstanceRequest,
    ) -> Result<(), ApiError> {
        let path = format!("/v1/bastion/instances/{}/deploy", instance_id);
        let _: Option<serde_json::Value> = self.client.post(&path, request).await?;
        Ok(())
    }

    /// GET /v1/bastion/instances/{id}
    pub async fn get_instance(&self, instance_id: &str) -> Result<BastionInstance, ApiError> {
        let path = format!("/v1/bastion/instances/{}", instance_id);
        self.client.get(&path).await
    }

    /// Poll the instance until it is running, or fail on a terminal error
    /// state or the ceiling in `config`.
    pub async fn wait_until_deployed(
        &self,
        instance_id: &str,
        config: &WaitConfig,
    ) -> Result<BastionInstance, WaitError> {
        waiter::wait_for_status(
            &format!("deploy of bastion instance {}", instance_id),
            config,
            || self.get_instance(instance_id),
        )
        .await
    }

    /// Deploy the instance and block until the deployment settles.
    pub async fn deploy_and_wait(
        &self,
        instance_id: &str,
        request: &DeployInstanceRequest,
        config: &WaitConfig,
    ) -> Result<BastionInstance, WaitError> {
        self.deploy_instance(instance_id, request).await?;
        self.wait_until_deployed(instance_id, config).await
    }
}

#[cfg(test)]
#[path = "./bastion_test.rs"]
mod bastion_test;
