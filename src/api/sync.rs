//! Asset synchronization API for the bastion service
//!
//! Syncs are keyed by asset category rather than a job id; the status
//! endpoint reports an in-process flag plus the result of the last run.

use crate::api::{common::ApiQueryParams, error::ApiError, Client};
use crate::waiter::{self, Progress, StatusSnapshot, TerminalStates, WaitConfig, WaitError};
use serde::{Deserialize, Serialize};
use std::fmt;

const SYNC_STATES: TerminalStates = TerminalStates::new(&["finished"], &["failed"]);

/// Asset category a sync run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncCategory {
    Host,
    Account,
}

impl SyncCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncCategory::Host => "host",
            SyncCategory::Account => "account",
        }
    }
}

impl fmt::Display for SyncCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sync progress for one asset category
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetSyncStatus {
    pub in_process: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusSnapshot for AssetSyncStatus {
    fn progress(&self) -> Progress {
        if self.in_process {
            return Progress::Pending;
        }

        // A run that has not reported a result yet stays pending; only the
        // enumerated statuses are terminal.
        match &self.last_status {
            Some(status) => match SYNC_STATES.classify(status) {
                Progress::Failed(status) => Progress::Failed(match &self.message {
                    Some(message) => format!("{}: {}", status, message),
                    None => status,
                }),
                other => other,
            },
            None => Progress::Pending,
        }
    }
}

#[derive(Debug, Serialize)]
struct StartSyncRequest {
    category: SyncCategory,
}

/// Asset sync API
pub struct AssetSyncApi<'a> {
    client: &'a Client,
}

impl<'a> AssetSyncApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// POST /v1/bastion/assets/sync
    pub async fn start_sync(&self, category: SyncCategory) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> = self
            .client
            .post("/v1/bastion/assets/sync", &StartSyncRequest { category })
            .await?;
        Ok(())
    }

    /// GET /v1/bastion/assets/sync/status?category={category}
    pub async fn get_sync_status(&self, category: SyncCategory) -> Result<AssetSyncStatus, ApiError> {
        let params = ApiQueryParams::new().add("category", category);
        self.client
            .get_with_params("/v1/bastion/assets/sync/status", &params)
            .await
    }

    /// Poll the category until the sync run leaves the in-process state and
    /// reports a terminal result.
    pub async fn wait_until_synced(
        &self,
        category: SyncCategory,
        config: &WaitConfig,
    ) -> Result<AssetSyncStatus, WaitError> {
        waiter::wait_for_status(&format!("sync of {} assets", category), config, || {
            self.get_sync_status(category)
        })
        .await
    }

    /// Kick off a sync run and block until it settles.
    pub async fn sync_and_wait(
        &self,
        category: SyncCategory,
        config: &WaitConfig,
    ) -> Result<AssetSyncStatus, WaitError> {
        self.start_sync(category).await?;
        self.wait_until_synced(category, config).await
    }
}

#[cfg(test)]
#[path = "./sync_test.rs"]
mod sync_test;
