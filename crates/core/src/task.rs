// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote task model
//!
//! A remote task is the handle the control plane returns for an asynchronous
//! operation (provisioning or deleting an SRM node). The remote side owns and
//! mutates it; this side only observes it by polling.

use serde::{Deserialize, Serialize};

/// Unique identifier for a remote task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

/// Status reported by the control plane
///
/// Statuses this crate does not know are kept verbatim and treated as still
/// in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Started,
    Canceling,
    Finished,
    Failed,
    Canceled,
    Other(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Started => "STARTED",
            TaskStatus::Canceling => "CANCELING",
            TaskStatus::Finished => "FINISHED",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Canceled => "CANCELED",
            TaskStatus::Other(s) => s.as_str(),
        }
    }

    /// Whether the remote side has committed to an outcome
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Finished | TaskStatus::Failed | TaskStatus::Canceled
        )
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "STARTED" => TaskStatus::Started,
            "CANCELING" => TaskStatus::Canceling,
            "FINISHED" => TaskStatus::Finished,
            "FAILED" => TaskStatus::Failed,
            "CANCELED" => TaskStatus::Canceled,
            _ => TaskStatus::Other(s),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remote task as last observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTask {
    pub id: TaskId,
    pub status: TaskStatus,
    /// Identifier of the resource the task creates or deletes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RemoteTask {
    pub fn new(id: impl Into<TaskId>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            status,
            resource_id: None,
            resource_type: None,
            task_type: None,
            error_message: None,
        }
    }

    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The terminal outcome, or `None` while the task is still in progress
    pub fn outcome(&self) -> Option<TaskOutcome> {
        match self.status {
            TaskStatus::Finished => Some(TaskOutcome::Succeeded(self.clone())),
            TaskStatus::Failed | TaskStatus::Canceled => Some(TaskOutcome::Failed {
                detail: self.failure_detail(),
                task: self.clone(),
            }),
            _ => None,
        }
    }

    fn failure_detail(&self) -> String {
        match self.error_message.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => format!("task {} ended in state {}", self.id, self.status),
        }
    }
}

/// Terminal result of waiting on a [`RemoteTask`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The remote operation committed; the resource is ready
    Succeeded(RemoteTask),
    /// The remote operation failed or was canceled
    Failed { task: RemoteTask, detail: String },
}

impl TaskOutcome {
    pub fn task(&self) -> &RemoteTask {
        match self {
            TaskOutcome::Succeeded(task) | TaskOutcome::Failed { task, .. } => task,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Succeeded(_))
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
