// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DRaaS control-plane adapters

mod http;

pub use http::HttpDraasClient;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{DraasCall, FakeDraasClient, TaskStep};

use async_trait::async_trait;
use thiserror::Error;
use vmc_core::{ProvisionSrmConfig, RemoteTask, SiteRecovery, TaskId};

/// Errors from DRaaS operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ClientError::Unauthenticated(_))
    }
}

/// Adapter for the site-recovery endpoints of the VMC control plane
#[async_trait]
pub trait DraasClient: Clone + Send + Sync + 'static {
    /// Obtain (or refresh) an access token
    async fn authenticate(&self) -> Result<(), ClientError>;

    /// Start provisioning an SRM node on an SDDC
    async fn provision_srm_node(
        &self,
        org_id: &str,
        sddc_id: &str,
        config: &ProvisionSrmConfig,
    ) -> Result<RemoteTask, ClientError>;

    /// Start deleting an SRM node
    async fn delete_srm_node(
        &self,
        org_id: &str,
        sddc_id: &str,
        node_id: &str,
    ) -> Result<RemoteTask, ClientError>;

    /// Fetch the current state of a task
    async fn get_task(&self, org_id: &str, task_id: &TaskId) -> Result<RemoteTask, ClientError>;

    /// Fetch the site-recovery view of an SDDC, including its SRM nodes
    async fn get_site_recovery(
        &self,
        org_id: &str,
        sddc_id: &str,
    ) -> Result<SiteRecovery, ClientError>;
}
