// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SRM node domain model
//!
//! Wire shapes of the site-recovery API plus the observable state derived
//! from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Prefix of every SRM extension key
pub const EXTENSION_KEY_PREFIX: &str = "com.vmware.vcDr-";
/// Host names of SRM appliances start with this prefix
pub const SRM_HOST_PREFIX: &str = "srm-";
/// Separates the extension suffix from the SDDC part of a host name
pub const SDDC_HOST_SEPARATOR: &str = ".sddc-";
/// Longest accepted extension key suffix
pub const MAX_SUFFIX_LEN: usize = 13;

/// Errors from validating user input before any remote call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("srm_node_extension_key_suffix must be 1 to {max} characters long, got {len}", max = MAX_SUFFIX_LEN)]
    SuffixLength { len: usize },
    #[error("srm_node_extension_key_suffix may only contain letters, numbers, '.' and '-', found {0:?}")]
    SuffixCharacter(char),
    #[error("unexpected format of ID ({0:?}), expected id,sddc_id")]
    ImportIdFormat(String),
    #[error("invalid format for {field} : {reason}")]
    InvalidUuid { field: &'static str, reason: String },
}

/// Custom suffix of the SRM extension key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExtensionKeySuffix(String);

impl ExtensionKeySuffix {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let len = s.chars().count();
        if len == 0 || len > MAX_SUFFIX_LEN {
            return Err(ValidationError::SuffixLength { len });
        }
        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '-'))
        {
            return Err(ValidationError::SuffixCharacter(c));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The full extension key registered with vCenter
    pub fn extension_key(&self) -> String {
        format!("{}{}", EXTENSION_KEY_PREFIX, self.0)
    }

    /// Recover the suffix from an appliance host name such as
    /// `srm-dr01.sddc-10-2-3-4.vmwarevmc.com`.
    pub fn from_host_name(host_name: &str) -> Option<String> {
        let rest = host_name.strip_prefix(SRM_HOST_PREFIX).unwrap_or(host_name);
        let suffix = rest.split(SDDC_HOST_SEPARATOR).next().unwrap_or(rest);
        if suffix.is_empty() {
            None
        } else {
            Some(suffix.to_string())
        }
    }
}

impl TryFrom<String> for ExtensionKeySuffix {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ExtensionKeySuffix> for String {
    fn from(suffix: ExtensionKeySuffix) -> Self {
        suffix.0
    }
}

impl std::fmt::Display for ExtensionKeySuffix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request body for provisioning an SRM node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionSrmConfig {
    pub srm_extension_key_suffix: String,
}

impl From<&ExtensionKeySuffix> for ProvisionSrmConfig {
    fn from(suffix: &ExtensionKeySuffix) -> Self {
        Self {
            srm_extension_key_suffix: suffix.as_str().to_string(),
        }
    }
}

/// An SRM appliance as listed by the site-recovery API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrmNode {
    pub id: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    // Absent while the appliance VM is still being deployed
    #[serde(default)]
    pub vm_moref_id: Option<String>,
}

/// Site-recovery view of one SDDC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecovery {
    // Some responses omit it; callers fall back to the SDDC they asked for
    #[serde(default)]
    pub sddc_id: String,
    #[serde(default)]
    pub site_recovery_state: Option<String>,
    #[serde(default)]
    pub srm_nodes: Vec<SrmNode>,
}

impl SiteRecovery {
    pub fn find_node(&self, node_id: &str) -> Option<&SrmNode> {
        self.srm_nodes.iter().find(|node| node.id == node_id)
    }

    /// The reported SDDC id, or `requested` when the response left it out
    pub fn sddc_id_or<'a>(&'a self, requested: &'a str) -> &'a str {
        if self.sddc_id.is_empty() {
            requested
        } else {
            &self.sddc_id
        }
    }
}

/// The `srm_instance` attributes of a managed node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrmInstance {
    pub id: String,
    pub ip_address: String,
    pub host_name: String,
    pub state: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_moref_id: Option<String>,
}

impl SrmInstance {
    /// Flatten into the string map exposed as `srm_instance`
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("id".to_string(), self.id.clone());
        map.insert("ip_address".to_string(), self.ip_address.clone());
        map.insert("host_name".to_string(), self.host_name.clone());
        map.insert("state".to_string(), self.state.clone());
        map.insert("type".to_string(), self.node_type.clone());
        if let Some(moref) = &self.vm_moref_id {
            map.insert("vm_moref_id".to_string(), moref.clone());
        }
        map
    }
}

impl From<&SrmNode> for SrmInstance {
    fn from(node: &SrmNode) -> Self {
        Self {
            id: node.id.clone(),
            ip_address: node.ip_address.clone().unwrap_or_default(),
            host_name: node.hostname.clone().unwrap_or_default(),
            state: node.state.clone().unwrap_or_default(),
            node_type: node.node_type.clone().unwrap_or_default(),
            vm_moref_id: node.vm_moref_id.clone(),
        }
    }
}

/// Observable state of a managed SRM node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrmNodeState {
    pub id: String,
    pub sddc_id: String,
    pub srm_node_extension_key_suffix: String,
    pub srm_instance: SrmInstance,
}

impl SrmNodeState {
    pub fn from_node(sddc_id: &str, node: &SrmNode) -> Self {
        let srm_instance = SrmInstance::from(node);
        let srm_node_extension_key_suffix =
            ExtensionKeySuffix::from_host_name(&srm_instance.host_name).unwrap_or_default();
        Self {
            id: node.id.clone(),
            sddc_id: sddc_id.to_string(),
            srm_node_extension_key_suffix,
            srm_instance,
        }
    }
}

#[cfg(test)]
#[path = "srm_tests.rs"]
mod tests;
