//! Polling for asynchronous control-plane operations.
//!
//! Mutating calls (deploying a bastion instance, running a migration
//! pre-check, synchronizing assets) return before the work finishes. The
//! caller keeps the handle from the triggering call and polls a status
//! endpoint until the operation reaches a terminal state or a ceiling
//! elapses. The loop is deliberately plain: a fixed interval with no
//! jitter, since a single Terraform-style apply is the only poller for a
//! given handle and the interval is chosen per operation.

use crate::api::ApiError;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

#[derive(Debug, Error)]
pub enum WaitError {
    #[error("{operation} did not reach a terminal state within {waited:?} ({polls} polls)")]
    Timeout {
        operation: String,
        waited: Duration,
        polls: u32,
    },

    #[error("{operation} failed: {reason}")]
    Failed { operation: String, reason: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Outcome of classifying one status snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Pending,
    Done,
    Failed(String),
}

/// One point-in-time result of a status query.
pub trait StatusSnapshot {
    fn progress(&self) -> Progress;
}

/// Explicit terminal-state sets for string statuses.
///
/// Every call site enumerates both its success and its failure values; a
/// status in neither set counts as still pending, never as done.
#[derive(Debug, Clone, Copy)]
pub struct TerminalStates {
    success: &'static [&'static str],
    failure: &'static [&'static str],
}

impl TerminalStates {
    pub const fn new(success: &'static [&'static str], failure: &'static [&'static str]) -> Self {
        Self { success, failure }
    }

    pub fn classify(&self, status: &str) -> Progress {
        if self.success.contains(&status) {
            Progress::Done
        } else if self.failure.contains(&status) {
            Progress::Failed(status.to_string())
        } else {
            Progress::Pending
        }
    }
}

#[derive(Debug, Clone)]
pub struct WaitConfig {
    pub poll_interval: Duration,
    pub max_wait: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(600),
        }
    }
}

impl WaitConfig {
    pub fn new(poll_interval: Duration, max_wait: Duration) -> Self {
        Self {
            poll_interval,
            max_wait,
        }
    }
}

/// Poll `fetch` until the snapshot it returns is terminal.
///
/// The first poll happens immediately, so a handle that is already in a
/// terminal state resolves without sleeping. A snapshot classified as
/// failed ends the wait at once with the vendor's status passed through
/// verbatim. Fetch errors also end the wait at once; the client layer has
/// already retried anything transient by the time an error surfaces here.
pub async fn wait_for_status<S, F, Fut>(
    operation: &str,
    config: &WaitConfig,
    fetch: F,
) -> Result<S, WaitError>
where
    S: StatusSnapshot,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<S, ApiError>>,
{
    let started = Instant::now();
    let mut polls: u32 = 0;

    loop {
        let snapshot = fetch().await?;
        polls += 1;

        match snapshot.progress() {
            Progress::Done => {
                tracing::debug!(
                    operation,
                    polls,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "operation reached terminal state"
                );
                return Ok(snapshot);
            }
            Progress::Failed(reason) => {
                return Err(WaitError::Failed {
                    operation: operation.to_string(),
                    reason,
                });
            }
            Progress::Pending => {}
        }

        let waited = started.elapsed();
        if waited >= config.max_wait {
            return Err(WaitError::Timeout {
                operation: operation.to_string(),
                waited,
                polls,
            });
        }

        tracing::debug!(operation, polls, "operation still pending");
        tokio::time::sleep(config.poll_interval).await;
    }
}
