//! Bounded retry for flaky endpoints and `Retry-After` handling for rate limits.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use tokio::time::sleep;

use crate::{RawResponse, ReqresError};

/// Wait applied to a 429 response that carries no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Anything that exposes an HTTP status code.
pub trait HasStatus {
    fn status_code(&self) -> u16;
}

impl HasStatus for RawResponse {
    fn status_code(&self) -> u16 {
        self.status.as_u16()
    }
}

impl HasStatus for StatusCode {
    fn status_code(&self) -> u16 {
        self.as_u16()
    }
}

impl HasStatus for reqwest::Response {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }
}

/// Configures attempt bound and inter-attempt delay.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one. Values below 1 are
    /// treated as 1.
    pub max_attempts: usize,
    /// Delay before the second attempt, in milliseconds.
    pub delay_ms: u64,
    /// Doubles the delay after every failed attempt when set.
    pub exponential: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 500,
            exponential: false,
        }
    }
}

impl RetryPolicy {
    /// Fixed-delay policy.
    pub fn new(max_attempts: usize, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            delay_ms,
            exponential: false,
        }
    }

    pub fn with_exponential_backoff(mut self) -> Self {
        self.exponential = true;
        self
    }

    /// Delay after the `failed`-th failed attempt (1-based).
    pub fn delay_for(&self, failed: usize) -> Duration {
        if !self.exponential {
            return Duration::from_millis(self.delay_ms);
        }
        let exp = failed.saturating_sub(1).min(16) as u32;
        let multiplier = 1u64 << exp;
        Duration::from_millis(self.delay_ms.saturating_mul(multiplier))
    }

    /// Runs `operation` under this policy. See [`with_retry`].
    pub async fn run<F, Fut, R, E>(&self, operation: F) -> Result<R, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        R: HasStatus,
        E: RetryableError,
    {
        with_retry(self, operation).await
    }
}

/// Errors that tell [`with_retry`] whether another attempt can help.
pub trait RetryableError: fmt::Display {
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ReqresError {
    /// Network failures and 5xx responses; argument, configuration and parse
    /// errors would fail the same way again.
    fn is_retryable(&self) -> bool {
        self.is_transient()
    }
}

impl RetryableError for reqwest::Error {
    fn is_retryable(&self) -> bool {
        true
    }
}

/// Invokes `operation` until it yields a response below 500, or until the
/// attempt bound is reached.
///
/// A retryable `Err` counts as a network failure and is retried; any other
/// `Err` and any 4xx response are returned immediately. Once the bound is
/// reached the last outcome is returned unchanged, whether it is a 5xx
/// response or an error.
pub async fn with_retry<F, Fut, R, E>(policy: &RetryPolicy, mut operation: F) -> Result<R, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    R: HasStatus,
    E: RetryableError,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1usize;
    loop {
        let outcome = operation().await;
        let retriable = match &outcome {
            Ok(response) => is_server_error(response.status_code()),
            Err(err) => err.is_retryable(),
        };
        if !retriable {
            return outcome;
        }

        if attempt >= max_attempts {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                attempts = attempt,
                outcome = %describe(&outcome),
                "retry bound reached"
            );
            return outcome;
        }

        let delay = policy.delay_for(attempt);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            attempt,
            outcome = %describe(&outcome),
            "retrying after {} ms",
            delay.as_millis()
        );

        sleep(delay).await;
        attempt += 1;
    }
}

fn is_server_error(status: u16) -> bool {
    status >= 500
}

#[cfg(feature = "tracing")]
fn describe<R: HasStatus, E: fmt::Display>(outcome: &Result<R, E>) -> String {
    match outcome {
        Ok(response) => format!("status {}", response.status_code()),
        Err(err) => err.to_string(),
    }
}

/// How long a rate-limited response asks the caller to wait.
///
/// Returns `None` unless the status is 429. `Retry-After` is read as whole
/// seconds; when absent or not a number, [`DEFAULT_RETRY_AFTER`] applies.
pub fn rate_limit_delay(response: &RawResponse) -> Option<Duration> {
    if response.status != StatusCode::TOO_MANY_REQUESTS {
        return None;
    }
    let seconds = response
        .header("retry-after")
        .and_then(|value| value.trim().parse::<u64>().ok());
    Some(seconds.map_or(DEFAULT_RETRY_AFTER, Duration::from_secs))
}

/// Sleeps for the delay requested by a 429 response and returns it.
pub async fn wait_for_rate_limit(response: &RawResponse) -> Option<Duration> {
    let delay = rate_limit_delay(response)?;

    #[cfg(feature = "tracing")]
    tracing::info!("rate limited; waiting {} ms", delay.as_millis());

    sleep(delay).await;
    Some(delay)
}
