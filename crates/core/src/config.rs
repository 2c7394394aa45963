// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider configuration
//!
//! Loaded from a TOML file with human-readable durations, then overridden by
//! environment variables.

use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const ENV_ORG_ID: &str = "VMC_ORG_ID";
pub const ENV_REFRESH_TOKEN: &str = "VMC_REFRESH_TOKEN";
pub const ENV_VMC_URL: &str = "VMC_URL";
pub const ENV_CSP_URL: &str = "CSP_URL";

pub const DEFAULT_VMC_URL: &str = "https://vmc.vmware.com";
pub const DEFAULT_CSP_URL: &str = "https://console.cloud.vmware.com";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("org ID is not configured (set org_id or {})", ENV_ORG_ID)]
    MissingOrgId,
    #[error("API refresh token is not configured (set refresh_token or {})", ENV_REFRESH_TOKEN)]
    MissingRefreshToken,
}

/// Deadlines and polling cadence for remote operations
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Overall bound on a create, from submission until the node is read back
    #[serde(with = "humantime_serde")]
    pub create: Duration,
    /// Overall bound on a delete, from submission until the task is terminal
    #[serde(with = "humantime_serde")]
    pub delete: Duration,
    /// Interval between two polls of a remote task
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub retry_min_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub retry_max_delay: Duration,
    /// Read-back attempts after a successful create before giving up
    pub read_back_attempts: u32,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: Duration::from_secs(30 * 60),
            delete: Duration::from_secs(20 * 60),
            poll_interval: Duration::from_secs(10),
            retry_min_delay: Duration::from_millis(500),
            retry_max_delay: Duration::from_secs(10),
            read_back_attempts: 3,
        }
    }
}

impl Timeouts {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_min_delay, self.retry_max_delay)
    }
}

/// Connection and behavior settings for the SRM node provider
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub org_id: Option<String>,
    pub refresh_token: Option<String>,
    pub vmc_url: String,
    pub csp_url: String,
    /// Write logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
    pub timeouts: Timeouts,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            org_id: None,
            refresh_token: None,
            vmc_url: DEFAULT_VMC_URL.to_string(),
            csp_url: DEFAULT_CSP_URL.to_string(),
            log_file: None,
            timeouts: Timeouts::default(),
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("org_id", &self.org_id)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("vmc_url", &self.vmc_url)
            .field("csp_url", &self.csp_url)
            .field("log_file", &self.log_file)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl ProviderConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(org_id) = non_empty(ENV_ORG_ID) {
            self.org_id = Some(org_id);
        }
        if let Some(token) = non_empty(ENV_REFRESH_TOKEN) {
            self.refresh_token = Some(token);
        }
        if let Some(url) = non_empty(ENV_VMC_URL) {
            self.vmc_url = url;
        }
        if let Some(url) = non_empty(ENV_CSP_URL) {
            self.csp_url = url;
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_process_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    pub fn org_id(&self) -> Result<&str, ConfigError> {
        self.org_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingOrgId)
    }

    pub fn refresh_token(&self) -> Result<&str, ConfigError> {
        self.refresh_token
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingRefreshToken)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
