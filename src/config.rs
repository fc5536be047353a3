//! Client configuration
//!
//! Settings are explicit values with environment fallback; the resolved
//! struct is handed to `Client` construction rather than living in any
//! global state.

use crate::api::{ApiError, Client};
use thiserror::Error;

pub const ENDPOINT_ENV: &str = "QCLOUD_ENDPOINT";
pub const API_TOKEN_ENV: &str = "QCLOUD_API_TOKEN";
pub const INSECURE_ENV: &str = "QCLOUD_INSECURE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("endpoint is required (set it explicitly or via QCLOUD_ENDPOINT)")]
    MissingEndpoint,

    #[error("api_token is required (set it explicitly or via QCLOUD_API_TOKEN)")]
    MissingToken,
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub api_token: String,
    pub insecure: bool,
}

impl ClientSettings {
    pub fn new(endpoint: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_token: api_token.into(),
            insecure: false,
        }
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Resolve settings from the environment alone.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(None, None, None)
    }

    /// Resolve explicit values with environment fallback, explicit values
    /// winning.
    pub fn resolve(
        endpoint: Option<String>,
        api_token: Option<String>,
        insecure: Option<bool>,
    ) -> Result<Self, ConfigError> {
        let endpoint = endpoint
            .or_else(|| std::env::var(ENDPOINT_ENV).ok())
            .ok_or(ConfigError::MissingEndpoint)?;

        let api_token = api_token
            .or_else(|| std::env::var(API_TOKEN_ENV).ok())
            .ok_or(ConfigError::MissingToken)?;

        let insecure = insecure
            .or_else(|| {
                std::env::var(INSECURE_ENV)
                    .ok()
                    .and_then(|v| v.parse::<bool>().ok())
            })
            .unwrap_or(false);

        Ok(Self {
            endpoint,
            api_token,
            insecure,
        })
    }

    pub fn build_client(&self) -> Result<Client, ApiError> {
        Client::new(&self.endpoint, &self.api_token, self.insecure)
    }
}
