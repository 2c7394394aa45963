// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! vmc-core: coordination core for SRM node provisioning
//!
//! This crate provides:
//! - A keyed mutex registry serializing operations per SDDC
//! - The remote task model and a poll-until-terminal waiter
//! - A deadline-bounded retry driver
//! - The SRM node domain model, identifiers and configuration

pub mod config;
pub mod coordination;
pub mod id;
pub mod retry;
pub mod srm;
pub mod task;
pub mod waiter;

// Re-exports
pub use config::{ConfigError, ProviderConfig, Timeouts};
pub use coordination::{KeyGuard, KeyedMutex};
pub use id::{validate_uuid, ImportId};
pub use retry::{retry_until, RetryError, RetryFailure, RetryPolicy};
pub use srm::{
    ExtensionKeySuffix, ProvisionSrmConfig, SiteRecovery, SrmInstance, SrmNode, SrmNodeState,
    ValidationError,
};
pub use task::{RemoteTask, TaskId, TaskOutcome, TaskStatus};
pub use waiter::{TaskWaiter, WaitError};
