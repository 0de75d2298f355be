//! Retry configuration and the retry-with-failover executor.
//!
//! [`execute_with_retry()`] runs one request attempt at a time against the
//! endpoint that is active when the attempt starts. A failed attempt is
//! reported to the [`EndpointSelector`], which may switch to a healthy
//! alternate before the next attempt, and is followed by a linear backoff
//! delay.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::warn;

use crate::endpoint::{Endpoint, EndpointSelector};
use crate::telemetry;
use crate::{HuginnError, Result};

/// Configuration for retry behaviour.
///
/// Uses linear backoff: the delay after attempt `n` is `base_delay * n`.
///
/// ```rust
/// # use huginn::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(5)
///     .base_delay(Duration::from_millis(200));
/// assert_eq!(config.delay_for_attempt(3), Duration::from_millis(600));
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 3.
    pub max_attempts: u32,
    /// Delay unit for linear backoff. Default: 1s.
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    /// Create a new config with the default 3 attempts and 1s base delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the backoff delay unit.
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Delay after the given failed attempt (1-indexed): `base_delay * attempt`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Attempt budget, never less than one.
    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Run `attempt` with bounded retries and endpoint failover.
///
/// Each call of `attempt` receives the endpoint active at that moment and
/// must perform exactly one request against it. On success the result is
/// returned at once and the endpoint is marked healthy. On failure before
/// the last attempt the failure is reported to `selector` and the executor
/// sleeps for [`RetryConfig::delay_for_attempt()`]. When the last attempt
/// fails, its error is returned inside [`HuginnError::RequestExhausted`]
/// without a further wait.
pub async fn execute_with_retry<F, Fut, T>(
    config: &RetryConfig,
    selector: &EndpointSelector,
    operation: &'static str,
    attempt: F,
) -> Result<T>
where
    F: Fn(Endpoint) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = config.attempts();
    let mut number = 1;
    loop {
        let endpoint = selector.current();
        let started = Instant::now();
        let outcome = attempt(endpoint.clone()).await;

        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
            "endpoint" => endpoint.kind.as_str(),
            "operation" => operation,
        )
        .record(started.elapsed().as_secs_f64());
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "endpoint" => endpoint.kind.as_str(),
            "operation" => operation,
            "status" => if outcome.is_ok() { "ok" } else { "error" },
        )
        .increment(1);

        let err = match outcome {
            Ok(value) => {
                selector.report_success(&endpoint);
                return Ok(value);
            }
            Err(e) => e,
        };

        if number >= max_attempts {
            warn!(
                operation,
                endpoint = %endpoint,
                attempts = max_attempts,
                error = %err,
                "all attempts failed"
            );
            return Err(HuginnError::RequestExhausted {
                attempts: max_attempts,
                source: Box::new(err),
            });
        }

        selector.report_failure(&endpoint);
        let delay = config.delay_for_attempt(number);
        warn!(
            operation,
            endpoint = %endpoint,
            attempt = number,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "retrying after failed attempt"
        );
        metrics::counter!(telemetry::RETRIES_TOTAL, "operation" => operation).increment(1);
        tokio::time::sleep(delay).await;
        number += 1;
    }
}
