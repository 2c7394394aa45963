// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for SRM node operations

use std::time::Duration;
use thiserror::Error;
use vmc_adapters::ClientError;
use vmc_core::{TaskId, ValidationError, WaitError};

/// Errors that can occur while managing an SRM node
#[derive(Debug, Error)]
pub enum SrmNodeError {
    #[error("authentication error from Cloud Service Provider: {0}")]
    Authentication(ClientError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("error creating SRM Node on SDDC {sddc_id}: {error}")]
    CreateSubmit { sddc_id: String, error: ClientError },
    #[error("error deleting SRM Node on SDDC {sddc_id}: {error}")]
    DeleteSubmit { sddc_id: String, error: ClientError },
    #[error("SRM Node create task {task_id} did not report a node id")]
    MissingResourceId { task_id: TaskId },
    /// The remote task failed or was canceled; the message embeds the remote detail
    #[error(transparent)]
    Task(WaitError<ClientError>),
    #[error("timed out after {} waiting to {operation} SRM Node{}", humantime::format_duration(timeout_secs(.timeout)), last_error(.last))]
    Timeout {
        operation: &'static str,
        timeout: Duration,
        last: Option<WaitError<ClientError>>,
    },
    #[error("error reading SRM Node on SDDC {sddc_id}: {error}")]
    Read { sddc_id: String, error: ClientError },
    /// The remote task finished but the node never appeared in the SDDC
    #[error("SRM Node {node_id} not visible on SDDC {sddc_id} after create finished")]
    InconsistentState { sddc_id: String, node_id: String },
    #[error("SRM Node {node_id} not found on SDDC {sddc_id}")]
    NotFound { sddc_id: String, node_id: String },
}

fn timeout_secs(timeout: &Duration) -> Duration {
    Duration::from_secs(timeout.as_secs())
}

fn last_error(last: &Option<WaitError<ClientError>>) -> String {
    match last {
        Some(error) => format!(" (last error: {})", error),
        None => String::new(),
    }
}

impl SrmNodeError {
    /// The deadline elapsed; the remote task may still complete later
    pub fn is_timeout(&self) -> bool {
        matches!(self, SrmNodeError::Timeout { .. })
    }
}
