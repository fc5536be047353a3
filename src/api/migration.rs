//! Database migration service API
//!
//! Migration jobs go through an explicit pre-check before they may run.
//! Both the pre-check and the job itself report string statuses; the
//! terminal values are enumerated below rather than inferred.

use crate::api::{common::JobId, error::ApiError, Client};
use crate::waiter::{self, Progress, StatusSnapshot, TerminalStates, WaitConfig, WaitError};
use serde::{Deserialize, Serialize};

const CHECK_STATES: TerminalStates = TerminalStates::new(&["checkPass"], &["checkNotPass"]);

const JOB_STATES: TerminalStates = TerminalStates::new(&["success"], &["failed", "canceled"]);

/// Pre-check progress for a migration job
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MigrateCheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl StatusSnapshot for MigrateCheckStatus {
    fn progress(&self) -> Progress {
        match CHECK_STATES.classify(&self.status) {
            Progress::Failed(status) => Progress::Failed(match &self.error_message {
                Some(message) => format!("{}: {}", status, message),
                None => status,
            }),
            other => other,
        }
    }
}

/// Migration job detail
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MigrateJob {
    pub job_id: JobId,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl StatusSnapshot for MigrateJob {
    fn progress(&self) -> Progress {
        match JOB_STATES.classify(&self.status) {
            Progress::Failed(status) => Progress::Failed(match &self.error_message {
                Some(message) => format!("{}: {}", status, message),
                None => status,
            }),
            other => other,
        }
    }
}

/// Migration API providing job operations
pub struct MigrationApi<'a> {
    client: &'a Client,
}

impl<'a> MigrationApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// POST /v1/dts/jobs/{job}/check
    pub async fn start_check(&self, job_id: &JobId) -> Result<(), ApiError> {
        let path = format!("/v1/dts/jobs/{}/check", job_id);
        let _: Option<serde_json::Value> = self.client.post(&path, &()).await?;
        Ok(())
    }

    /// GET /v1/dts/jobs/{job}/check
    pub async fn get_check_status(&self, job_id: &JobId) -> Result<MigrateCheckStatus, ApiError> {
        let path = format!("/v1/dts/jobs/{}/check", job_id);
        self.client.get(&path).await
    }

    /// POST /v1/dts/jobs/{job}/resume
    pub async fn resume_job(&self, job_id: &JobId) -> Result<(), ApiError> {
        let path = format!("/v1/dts/jobs/{}/resume", job_id);
        let _: Option<serde_json::Value> = self.client.post(&path, &()).await?;
        Ok(())
    }

    /// GET /v1/dts/jobs/{job}
    pub async fn get_job(&self, job_id: &JobId) -> Result<MigrateJob, ApiError> {
        let path = format!("/v1/dts/jobs/{}", job_id);
        self.client.get(&path).await
    }

    /// Poll the pre-check until it passes or is rejected.
    pub async fn wait_for_check(
        &self,
        job_id: &JobId,
        config: &WaitConfig,
    ) -> Result<MigrateCheckStatus, WaitError> {
        waiter::wait_for_status(
            &format!("pre-check of migration job {}", job_id),
            config,
            || self.get_check_status(job_id),
        )
        .await
    }

    /// Start the pre-check and block until it settles.
    pub async fn check_and_wait(
        &self,
        job_id: &JobId,
        config: &WaitConfig,
    ) -> Result<MigrateCheckStatus, WaitError> {
        self.start_check(job_id).await?;
        self.wait_for_check(job_id, config).await
    }

    /// Poll the job itself until it succeeds, fails, or is canceled.
    pub async fn wait_until_done(
        &self,
        job_id: &JobId,
        config: &WaitConfig,
    ) -> Result<MigrateJob, WaitError> {
        waiter::wait_for_status(&format!("migration job {}", job_id), config, || {
            self.get_job(job_id)
        })
        .await
    }
}

#[cfg(test)]
#[path = "./migration_test.rs"]
mod migration_test;
