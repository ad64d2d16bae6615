//! Connection retry with exponential backoff.
//!
//! Bus reachability is a process-wide precondition handled once at startup,
//! not something individual RPC calls retry.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Exponential backoff parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Delay after the first failure.
    pub initial: Duration,
    /// Upper bound for any single delay.
    pub max: Duration,
    /// Give up after this many attempts (`None` = retry forever).
    pub max_attempts: Option<u32>,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(100),
            max: Duration::from_secs(5),
            max_attempts: Some(30),
        }
    }
}

impl BackoffPolicy {
    /// Delay before attempt `attempt + 1` (1-based `attempt`).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial.saturating_mul(factor).min(self.max)
    }
}

/// Run `op` until it succeeds or the policy gives up, returning the last error.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &BackoffPolicy,
    what: &str,
    mut op: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(target_name = what, attempts = attempt, "Connected after retries");
                }
                return Ok(value);
            }
            Err(e) => {
                if policy.max_attempts.is_some_and(|max| attempt >= max) {
                    warn!(target_name = what, attempts = attempt, error = %e, "Giving up");
                    return Err(e);
                }
                let delay = policy.delay_for(attempt);
                warn!(
                    target_name = what,
                    attempt = attempt,
                    retry_in_ms = delay.as_millis() as u64,
                    error = %e,
                    "Not reachable yet, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
