// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use vmc_core::SrmNodeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Printable SRM node state, with `srm_instance` flattened to a string map
#[derive(Debug, Serialize)]
pub struct NodeView {
    pub id: String,
    pub sddc_id: String,
    pub srm_node_extension_key_suffix: String,
    pub srm_instance: BTreeMap<String, String>,
}

impl From<SrmNodeState> for NodeView {
    fn from(state: SrmNodeState) -> Self {
        Self {
            srm_instance: state.srm_instance.to_map(),
            id: state.id,
            sddc_id: state.sddc_id,
            srm_node_extension_key_suffix: state.srm_node_extension_key_suffix,
        }
    }
}

impl fmt::Display for NodeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SRM Node: {}", self.id)?;
        writeln!(f, "  SDDC: {}", self.sddc_id)?;
        write!(f, "  Suffix: {}", self.srm_node_extension_key_suffix)?;
        for (key, value) in &self.srm_instance {
            write!(f, "\n  {}: {}", key, value)?;
        }
        Ok(())
    }
}

/// Outcome of a command that has no node state to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    NotFound,
    Deleted,
}

#[derive(Debug, Serialize)]
pub struct StatusView {
    pub id: String,
    pub sddc_id: String,
    pub status: NodeStatus,
}

impl StatusView {
    pub fn new(id: &str, sddc_id: &str, status: NodeStatus) -> Self {
        Self {
            id: id.to_string(),
            sddc_id: sddc_id.to_string(),
            status,
        }
    }
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            NodeStatus::NotFound => {
                write!(f, "SRM Node {} not found on SDDC {}", self.id, self.sddc_id)
            }
            NodeStatus::Deleted => write!(f, "Deleted SRM Node {}", self.id),
        }
    }
}

/// Render a value in the specified format
pub fn render<T: Serialize + fmt::Display>(
    value: &T,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(value),
    }
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(
    value: &T,
    format: OutputFormat,
) -> serde_json::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
