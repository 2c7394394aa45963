// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline-bounded retry driver
//!
//! Re-runs a step while it reports retryable errors, backing off between
//! attempts, until it succeeds, fails fatally, or the deadline elapses. The
//! deadline cancels whatever the step is awaiting at that moment.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Classification of a failed attempt
#[derive(Debug)]
pub enum RetryError<E> {
    /// Try again after a delay
    Retryable(E),
    /// Stop immediately
    NonRetryable(E),
}

/// Why the driver gave up
#[derive(Debug, Error)]
pub enum RetryFailure<E> {
    /// A step reported a non-retryable error
    #[error("{0}")]
    Fatal(E),
    /// The deadline elapsed; `last` holds the most recent retryable error
    #[error("timeout after {timeout:?}")]
    Timeout { timeout: Duration, last: Option<E> },
}

/// Backoff between retryable attempts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(with = "humantime_serde")]
    pub min_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            min_delay,
            max_delay: max_delay.max(min_delay),
        }
    }

    /// Delay before retry number `attempt` (0-based), doubling up to `max_delay`
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.min(31)).unwrap_or(u32::MAX);
        self.min_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Run `step` until it succeeds, fails fatally, or `timeout` elapses.
pub async fn retry_until<T, E, F, Fut>(
    timeout: Duration,
    policy: &RetryPolicy,
    mut step: F,
) -> Result<T, RetryFailure<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RetryError<E>>>,
    E: std::fmt::Display,
{
    let mut last: Option<E> = None;

    let attempts = async {
        let mut attempt: u32 = 0;
        loop {
            match step().await {
                Ok(value) => return Ok(value),
                Err(RetryError::NonRetryable(error)) => return Err(RetryFailure::Fatal(error)),
                Err(RetryError::Retryable(error)) => {
                    let delay = policy.delay(attempt);
                    tracing::debug!(
                        attempt,
                        error = %error,
                        delay_ms = delay.as_millis() as u64,
                        "retrying"
                    );
                    last = Some(error);
                    tokio::time::sleep(delay).await;
                    attempt = attempt.saturating_add(1);
                }
            }
        }
    };

    let outcome = tokio::time::timeout(timeout, attempts).await;
    match outcome {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_ms = timeout.as_millis() as u64, "deadline elapsed");
            Err(RetryFailure::Timeout { timeout, last })
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
