// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::draas::{ClientError, DraasClient};
use async_trait::async_trait;
use std::time::Instant;
use tracing::Instrument;
use vmc_core::{ProvisionSrmConfig, RemoteTask, SiteRecovery, TaskId};

/// Wrapper that adds tracing to any DraasClient
#[derive(Clone)]
pub struct TracedDraasClient<C> {
    inner: C,
}

impl<C> TracedDraasClient<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

fn log_submitted(result: &Result<RemoteTask, ClientError>, start: Instant) {
    let elapsed_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(task) => tracing::info!(
            task_id = %task.id,
            status = %task.status,
            resource_id = task.resource_id.as_deref().unwrap_or(""),
            elapsed_ms,
            "task submitted"
        ),
        Err(e) => tracing::error!(elapsed_ms, error = %e, "submit failed"),
    }
}

#[async_trait]
impl<C: DraasClient> DraasClient for TracedDraasClient<C> {
    async fn authenticate(&self) -> Result<(), ClientError> {
        let span = tracing::info_span!("draas.authenticate");
        async {
            let start = Instant::now();
            let result = self.inner.authenticate().await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "authenticated"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "authentication failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn provision_srm_node(
        &self,
        org_id: &str,
        sddc_id: &str,
        config: &ProvisionSrmConfig,
    ) -> Result<RemoteTask, ClientError> {
        let span = tracing::info_span!(
            "draas.provision",
            org_id,
            sddc_id,
            suffix = %config.srm_extension_key_suffix
        );
        async {
            tracing::info!("starting");
            let start = Instant::now();
            let result = self.inner.provision_srm_node(org_id, sddc_id, config).await;
            log_submitted(&result, start);
            result
        }
        .instrument(span)
        .await
    }

    async fn delete_srm_node(
        &self,
        org_id: &str,
        sddc_id: &str,
        node_id: &str,
    ) -> Result<RemoteTask, ClientError> {
        let span = tracing::info_span!("draas.delete", org_id, sddc_id, node_id);
        async {
            tracing::info!("starting");
            let start = Instant::now();
            let result = self.inner.delete_srm_node(org_id, sddc_id, node_id).await;
            log_submitted(&result, start);
            result
        }
        .instrument(span)
        .await
    }

    async fn get_task(&self, org_id: &str, task_id: &TaskId) -> Result<RemoteTask, ClientError> {
        let span = tracing::debug_span!("draas.get_task", org_id, task_id = %task_id);
        async {
            let result = self.inner.get_task(org_id, task_id).await;
            match &result {
                Ok(task) => tracing::debug!(status = %task.status, "polled"),
                Err(e) => tracing::warn!(error = %e, "poll failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn get_site_recovery(
        &self,
        org_id: &str,
        sddc_id: &str,
    ) -> Result<SiteRecovery, ClientError> {
        let span = tracing::debug_span!("draas.site_recovery", org_id, sddc_id);
        async {
            let start = Instant::now();
            let result = self.inner.get_site_recovery(org_id, sddc_id).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(site) => tracing::debug!(nodes = site.srm_nodes.len(), elapsed_ms, "read"),
                Err(e) if e.is_not_found() => tracing::debug!(elapsed_ms, "sddc not found"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "read failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
