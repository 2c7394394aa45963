// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SRM node lifecycle: create, read, delete, import
//!
//! Create and delete hold the SDDC's lock from submission until the remote
//! task is terminal, so at most one node operation runs per SDDC. The lock
//! guard is dropped on every exit path, including deadline expiry.

use crate::error::SrmNodeError;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use vmc_adapters::DraasClient;
use vmc_core::{
    retry_until, ExtensionKeySuffix, ImportId, KeyedMutex, ProvisionSrmConfig, RemoteTask,
    RetryFailure, SrmNodeState, TaskId, TaskWaiter, Timeouts, WaitError,
};

const CREATE_LABEL: &str = "error creating SRM node";
const DELETE_LABEL: &str = "failed to delete SRM node";

/// Manages SRM nodes of one organization
#[derive(Clone)]
pub struct SrmNodeResource<C: DraasClient> {
    client: C,
    locks: Arc<KeyedMutex>,
    waiter: TaskWaiter,
    timeouts: Timeouts,
    org_id: String,
}

impl<C: DraasClient> SrmNodeResource<C> {
    pub fn new(
        client: C,
        locks: Arc<KeyedMutex>,
        org_id: impl Into<String>,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            client,
            locks,
            waiter: TaskWaiter::new(timeouts.poll_interval),
            timeouts,
            org_id: org_id.into(),
        }
    }

    pub fn locks(&self) -> &Arc<KeyedMutex> {
        &self.locks
    }

    /// Provision an SRM node on `sddc_id` and return its observed state
    pub async fn create(
        &self,
        sddc_id: &str,
        suffix: &str,
    ) -> Result<SrmNodeState, SrmNodeError> {
        self.client
            .authenticate()
            .await
            .map_err(SrmNodeError::Authentication)?;
        let suffix = ExtensionKeySuffix::parse(suffix)?;

        let (node_id, deadline) = {
            let _guard = self.locks.lock(sddc_id).await;
            let deadline = Deadline::after(self.timeouts.create);

            let task = self
                .client
                .provision_srm_node(&self.org_id, sddc_id, &ProvisionSrmConfig::from(&suffix))
                .await
                .map_err(|error| SrmNodeError::CreateSubmit {
                    sddc_id: sddc_id.to_string(),
                    error,
                })?;

            let node_id = task
                .resource_id
                .clone()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| SrmNodeError::MissingResourceId {
                    task_id: task.id.clone(),
                })?;
            tracing::info!(sddc_id, node_id, task_id = %task.id, "SRM node create submitted");

            self.wait_for(&task.id, CREATE_LABEL, "create", deadline)
                .await?;
            (node_id, deadline)
        };

        tokio::time::timeout_at(deadline.at, self.read_back(sddc_id, &node_id))
            .await
            .map_err(|_| {
                tracing::warn!(sddc_id, node_id, "create deadline elapsed during read-back");
                SrmNodeError::Timeout {
                    operation: "create",
                    timeout: deadline.total,
                    last: None,
                }
            })?
    }

    /// Current state of a node, or `None` if the node or its SDDC is gone
    pub async fn read(
        &self,
        sddc_id: &str,
        node_id: &str,
    ) -> Result<Option<SrmNodeState>, SrmNodeError> {
        self.client
            .authenticate()
            .await
            .map_err(SrmNodeError::Authentication)?;
        self.observe(sddc_id, node_id).await
    }

    async fn observe(
        &self,
        sddc_id: &str,
        node_id: &str,
    ) -> Result<Option<SrmNodeState>, SrmNodeError> {
        let site = match self.client.get_site_recovery(&self.org_id, sddc_id).await {
            Ok(site) => site,
            Err(e) if e.is_not_found() => {
                tracing::info!(sddc_id, node_id, "SDDC not found, SRM node is gone");
                return Ok(None);
            }
            Err(error) => {
                return Err(SrmNodeError::Read {
                    sddc_id: sddc_id.to_string(),
                    error,
                })
            }
        };

        let state = site
            .find_node(node_id)
            .map(|node| SrmNodeState::from_node(site.sddc_id_or(sddc_id), node));
        if state.is_none() {
            tracing::info!(sddc_id, node_id, "SRM node not listed on SDDC");
        }
        Ok(state)
    }

    /// Delete a node. A node the service no longer knows counts as deleted.
    pub async fn delete(&self, sddc_id: &str, node_id: &str) -> Result<(), SrmNodeError> {
        self.client
            .authenticate()
            .await
            .map_err(SrmNodeError::Authentication)?;

        let _guard = self.locks.lock(sddc_id).await;
        let deadline = Deadline::after(self.timeouts.delete);

        let task = match self
            .client
            .delete_srm_node(&self.org_id, sddc_id, node_id)
            .await
        {
            Ok(task) => task,
            Err(e) if e.is_not_found() => {
                tracing::info!(sddc_id, node_id, "SRM node already deleted");
                return Ok(());
            }
            Err(error) => {
                return Err(SrmNodeError::DeleteSubmit {
                    sddc_id: sddc_id.to_string(),
                    error,
                })
            }
        };
        tracing::info!(sddc_id, node_id, task_id = %task.id, "SRM node delete submitted");

        self.wait_for(&task.id, DELETE_LABEL, "delete", deadline)
            .await?;
        Ok(())
    }

    /// Adopt an existing node from its `<node-id>,<sddc-id>` identifier
    pub async fn import(&self, raw_id: &str) -> Result<SrmNodeState, SrmNodeError> {
        let id = ImportId::parse(raw_id)?;
        self.read(&id.sddc_id, &id.node_id)
            .await?
            .ok_or(SrmNodeError::NotFound {
                sddc_id: id.sddc_id,
                node_id: id.node_id,
            })
    }

    /// Wait for a submitted task, retrying poll failures until `deadline`
    async fn wait_for(
        &self,
        task_id: &TaskId,
        label: &str,
        operation: &'static str,
        deadline: Deadline,
    ) -> Result<RemoteTask, SrmNodeError> {
        let client = &self.client;
        let org_id = self.org_id.as_str();
        let waiter = &self.waiter;

        let policy = self.timeouts.retry_policy();
        let result = retry_until(deadline.remaining(), &policy, move || async move {
            let outcome = waiter
                .wait(label, task_id, || client.get_task(org_id, task_id))
                .await;

            if let Err(WaitError::Fetch { error, .. }) = &outcome {
                if error.is_unauthenticated() {
                    reauthenticate(client).await;
                }
            }
            outcome.map_err(WaitError::into_retry)
        })
        .await;

        result.map_err(|failure| match failure {
            RetryFailure::Fatal(error) => SrmNodeError::Task(error),
            RetryFailure::Timeout { last, .. } => SrmNodeError::Timeout {
                operation,
                timeout: deadline.total,
                last,
            },
        })
    }

    /// Read back a freshly created node, tolerating listing lag
    async fn read_back(&self, sddc_id: &str, node_id: &str) -> Result<SrmNodeState, SrmNodeError> {
        let attempts = self.timeouts.read_back_attempts.max(1);
        for attempt in 1..=attempts {
            if let Some(state) = self.observe(sddc_id, node_id).await? {
                tracing::info!(sddc_id, node_id, "SRM node created");
                return Ok(state);
            }
            if attempt < attempts {
                tracing::debug!(sddc_id, node_id, attempt, "SRM node not listed yet");
                tokio::time::sleep(self.waiter.poll_interval()).await;
            }
        }

        tracing::error!(sddc_id, node_id, attempts, "SRM node missing after create");
        Err(SrmNodeError::InconsistentState {
            sddc_id: sddc_id.to_string(),
            node_id: node_id.to_string(),
        })
    }
}

/// Operation deadline, fixed once the SDDC lock is held
#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    total: Duration,
}

impl Deadline {
    fn after(total: Duration) -> Self {
        Self {
            at: Instant::now() + total,
            total,
        }
    }

    fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}

async fn reauthenticate<C: DraasClient>(client: &C) {
    match client.authenticate().await {
        Ok(()) => tracing::info!("re-authenticated after expired token"),
        Err(e) => tracing::warn!(error = %e, "re-authentication failed"),
    }
}

#[cfg(test)]
#[path = "srm_node_tests.rs"]
mod tests;
