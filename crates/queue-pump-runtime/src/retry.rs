//! # Retry Module
//!
//! Implements exponential backoff with full jitter for transient queue
//! operation failures, and the executor that applies it.
//!
//! Full jitter samples the sleep uniformly from zero up to the capped
//! exponential delay instead of sleeping the delay itself, which keeps
//! concurrent consumers and producers from retrying in lockstep.

use crate::error::QueueError;
use crate::shutdown::ShutdownFlag;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{error, warn};

/// Maximum number of attempts per operation (initial attempt included).
///
/// Fixed policy, matching the backoff cap below; there is deliberately no
/// configuration surface for either.
pub const MAX_RETRIES: u32 = 3;

/// Backoff policy for retry delays
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Base delay multiplied by 2^attempt
    pub base_delay: Duration,

    /// Cap applied to the exponential delay before jitter
    pub max_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl BackoffPolicy {
    /// Calculate the jittered delay for a retry attempt
    ///
    /// # Arguments
    ///
    /// * `attempt` - Retry attempt number (0-based)
    ///
    /// # Returns
    ///
    /// A duration sampled uniformly from `[0, min(base * 2^attempt, cap)]`
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponential = self.base_delay.as_secs_f64() * 2f64.powi(attempt as i32);
        let capped = exponential.min(self.max_delay.as_secs_f64());

        let jittered = rand::rng().random_range(0.0..=capped);

        Duration::from_secs_f64(jittered)
    }

    /// Upper bound of the delay for a retry attempt, before jitter
    pub fn delay_upper_bound(&self, attempt: u32) -> Duration {
        let exponential = self.base_delay.as_secs_f64() * 2f64.powi(attempt as i32);

        Duration::from_secs_f64(exponential.min(self.max_delay.as_secs_f64()))
    }
}

/// Execute an operation with retry, backoff, and shutdown gating.
///
/// The operation is invoked up to [`MAX_RETRIES`] times:
///
/// - Success returns immediately.
/// - A permanent error (per [`QueueError::is_transient`]) propagates
///   immediately without further attempts.
/// - A transient error on the final allowed attempt propagates.
/// - Otherwise a jittered backoff delay is slept and the operation is
///   invoked again.
///
/// The shutdown flag is checked before every attempt; once set, the last
/// recorded error (or [`QueueError::ShutdownRequested`] when none has been
/// recorded yet) is raised without invoking the operation or sleeping.
pub async fn execute_with_retry<T, F, Fut>(
    operation: &str,
    shutdown: &ShutdownFlag,
    policy: &BackoffPolicy,
    mut op: F,
) -> Result<T, QueueError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, QueueError>>,
{
    let mut last_error: Option<QueueError> = None;

    for attempt in 0..MAX_RETRIES {
        if shutdown.is_requested() {
            return Err(last_error.unwrap_or(QueueError::ShutdownRequested));
        }

        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_transient() {
                    error!(
                        operation,
                        error = %err,
                        "Operation failed with non-retryable error"
                    );
                    return Err(err);
                }

                if attempt == MAX_RETRIES - 1 {
                    error!(
                        operation,
                        attempts = MAX_RETRIES,
                        error = %err,
                        "Operation failed after all attempts"
                    );
                    return Err(err);
                }

                let delay = policy.delay(attempt);
                warn!(
                    operation,
                    attempt = attempt + 1,
                    max_attempts = MAX_RETRIES,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Operation failed, retrying after backoff"
                );

                last_error = Some(err);
                tokio::time::sleep(delay).await;
            }
        }
    }

    // Every path through the loop returns; this guards the unreachable exit.
    Err(last_error.unwrap_or(QueueError::ShutdownRequested))
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
