// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration file discovery

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use vmc_core::ProviderConfig;

/// `<config dir>/vmc/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vmc").join("config.toml"))
}

/// Load configuration with environment and command-line overrides.
///
/// An explicit `--config` file must exist; the default location is optional.
pub fn load(path: Option<&Path>, org_id: Option<String>) -> Result<ProviderConfig> {
    let mut config = match path {
        Some(path) => ProviderConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => match default_path() {
            Some(path) => ProviderConfig::load_or_default(&path)?,
            None => ProviderConfig::default(),
        },
    };
    config.apply_process_env();
    if let Some(org_id) = org_id {
        config.org_id = Some(org_id);
    }
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
