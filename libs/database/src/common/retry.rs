//! Backoff for establishing the pool while PostgreSQL is still booting.

use std::future::Future;
use std::hash::BuildHasher;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry policy: exponential backoff capped at `max_delay`, with optional
/// jitter that shortens each wait to between 50% and 100% of its nominal value.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Nominal wait before retry number `retry` (1-based), before jitter.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }

    fn wait_for(&self, retry: u32) -> Duration {
        let nominal = self.delay_for(retry);
        if self.jitter { jitter(nominal) } else { nominal }
    }
}

/// Five retries starting at 200ms; about six seconds end to end, which
/// covers a cold Postgres container.
impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            jitter: true,
        }
    }
}

/// Run `operation` until it succeeds or `config.max_retries` retries fail.
/// The last error is returned.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut retries = 0;

    loop {
        let err = match operation().await {
            Ok(value) => {
                if retries > 0 {
                    debug!(retries, "Operation succeeded after retrying");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if retries == config.max_retries {
            warn!(attempts = retries + 1, error = %err, "Giving up");
            return Err(err);
        }
        retries += 1;

        let wait = config.wait_for(retries);
        debug!(
            retry = retries,
            max_retries = config.max_retries,
            wait_ms = wait.as_millis() as u64,
            error = %err,
            "Operation failed, retrying"
        );
        tokio::time::sleep(wait).await;
    }
}

/// [`retry_with_backoff`] with the default policy.
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}

fn jitter(delay: Duration) -> Duration {
    // RandomState is randomly keyed per instance, which is enough spread here
    let roll = std::collections::hash_map::RandomState::new().hash_one(delay) % 51;
    delay.mul_f64(0.5 + roll as f64 / 100.0)
}
