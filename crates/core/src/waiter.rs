// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll-until-terminal waiter for remote tasks
//!
//! Turns an asynchronous remote operation into a single awaited result. The
//! waiter never releases locks itself: it returns the terminal result and the
//! caller's scoped guard does the release.

use crate::retry::RetryError;
use crate::task::{RemoteTask, TaskId, TaskOutcome};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Default interval between two polls of the same task
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Errors from waiting on a remote task
#[derive(Debug, Error)]
pub enum WaitError<E> {
    /// The task could not be fetched; its fate is unknown
    #[error("error polling task {task_id}: {error}")]
    Fetch { task_id: TaskId, error: E },
    /// The remote side reported a failed or canceled task
    #[error("{label}: {detail}")]
    TaskFailed {
        label: String,
        task: RemoteTask,
        detail: String,
    },
}

impl<E> WaitError<E> {
    /// Fetch errors may clear up on a later attempt, task failures never do
    pub fn is_retryable(&self) -> bool {
        matches!(self, WaitError::Fetch { .. })
    }

    /// Classify for the retry driver
    pub fn into_retry(self) -> RetryError<Self> {
        if self.is_retryable() {
            RetryError::Retryable(self)
        } else {
            RetryError::NonRetryable(self)
        }
    }
}

/// Polls a remote task on a fixed interval until it reaches a terminal status
#[derive(Debug, Clone)]
pub struct TaskWaiter {
    poll_interval: Duration,
}

impl Default for TaskWaiter {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl TaskWaiter {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Poll `fetch` until the task is terminal.
    ///
    /// Returns the finished task on success. A failed or canceled task yields
    /// a non-retryable [`WaitError::TaskFailed`] whose message starts with
    /// `label`. A fetch error (including "not found" while the remote side is
    /// still committing the task) yields a retryable [`WaitError::Fetch`].
    ///
    /// The sleep between polls is an ordinary await point, so dropping the
    /// future (for example when a deadline elapses) stops the loop.
    pub async fn wait<F, Fut, E>(
        &self,
        label: &str,
        task_id: &TaskId,
        mut fetch: F,
    ) -> Result<RemoteTask, WaitError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<RemoteTask, E>>,
        E: Display,
    {
        let mut pending_polls: u32 = 0;

        loop {
            let task = match fetch().await {
                Ok(task) => task,
                Err(error) => {
                    tracing::warn!(task_id = %task_id, error = %error, "task poll failed");
                    return Err(WaitError::Fetch {
                        task_id: task_id.clone(),
                        error,
                    });
                }
            };

            match task.outcome() {
                Some(TaskOutcome::Succeeded(task)) => {
                    tracing::info!(task_id = %task_id, pending_polls, "task finished");
                    return Ok(task);
                }
                Some(TaskOutcome::Failed { task, detail }) => {
                    tracing::warn!(
                        task_id = %task_id,
                        status = %task.status,
                        detail = %detail,
                        "task failed"
                    );
                    return Err(WaitError::TaskFailed {
                        label: label.to_string(),
                        task,
                        detail,
                    });
                }
                None => {
                    pending_polls += 1;
                    tracing::debug!(
                        task_id = %task_id,
                        status = %task.status,
                        pending_polls,
                        "task in progress"
                    );
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
