//! Typed client for the control-plane API

pub mod bastion;
pub mod client;
pub mod common;
pub mod error;
pub mod migration;
pub mod sync;

#[cfg(test)]
pub mod test_helpers;

pub use bastion::{BastionApi, BastionInstance, DeployInstanceRequest, InstanceState};
pub use client::{Client, HttpSettings, RetryConfig};
pub use common::{ApiQueryParams, ApiResponse, JobId};
pub use error::ApiError;
pub use migration::{MigrateCheckStatus, MigrateJob, MigrationApi};
pub use sync::{AssetSyncApi, AssetSyncStatus, SyncCategory};
