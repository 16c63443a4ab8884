//! Retry with exponential backoff for feed requests

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::catalog::error::CatalogError;
use crate::config::{DEFAULT_BACKOFF_BASE_MS, DEFAULT_MAX_RETRIES};

/// Source of "now" for cache age and EOL checks
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Waits between retry attempts
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each following retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
        }
    }
}

impl RetryPolicy {
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before the zero-based `attempt`: none before the first,
    /// then `base * 2^(attempt - 1)`.
    pub fn delay_before(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 {
            return None;
        }
        let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
        Some(self.base_delay.saturating_mul(factor))
    }
}

/// Run `operation` until it succeeds or the policy's attempts are used up.
///
/// The closure receives the zero-based attempt number. On exhaustion the last
/// error is wrapped in [`CatalogError::FetchExhausted`].
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let attempts = policy.attempts();
    let mut attempt = 0;

    loop {
        if let Some(delay) = policy.delay_before(attempt) {
            debug!("Backing off {:?} before attempt {}", delay, attempt + 1);
            sleeper.sleep(delay).await;
        }

        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt + 1 < attempts => {
                warn!("Attempt {}/{} failed: {}", attempt + 1, attempts, e);
                attempt += 1;
            }
            Err(e) => {
                warn!("Attempt {}/{} failed, giving up: {}", attempt + 1, attempts, e);
                return Err(CatalogError::FetchExhausted {
                    attempts,
                    source: Box::new(e),
                });
            }
        }
    }
}
