//! Async operation polling for a cloud control plane.
//!
//! Control-plane mutations (deploying a bastion instance, pre-checking a
//! migration job, synchronizing assets) are accepted long before the work
//! completes. This crate pairs a retrying JSON client with a polling
//! waiter that drives such operations to a terminal state: trigger the
//! call, keep its handle, then poll the matching status endpoint on a
//! fixed interval until it reports success, an explicit failure, or the
//! wait ceiling is reached.

pub mod api;
pub mod config;
pub mod waiter;

pub use api::{ApiError, Client};
pub use config::{ClientSettings, ConfigError};
pub use waiter::{Progress, StatusSnapshot, TerminalStates, WaitConfig, WaitError};
