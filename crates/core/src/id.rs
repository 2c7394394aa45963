// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Import identifiers and UUID validation

use crate::srm::ValidationError;
use uuid::Uuid;

/// Identifier used to import an existing node: `<node-id>,<sddc-id>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    pub node_id: String,
    pub sddc_id: String,
}

impl ImportId {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let parts: Vec<&str> = raw.split(',').collect();
        let [node_id, sddc_id] = parts.as_slice() else {
            return Err(ValidationError::ImportIdFormat(raw.to_string()));
        };
        if node_id.is_empty() || sddc_id.is_empty() {
            return Err(ValidationError::ImportIdFormat(raw.to_string()));
        }
        validate_uuid("id", node_id)?;
        validate_uuid("sddc_id", sddc_id)?;
        Ok(Self {
            node_id: node_id.to_string(),
            sddc_id: sddc_id.to_string(),
        })
    }
}

impl std::fmt::Display for ImportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.node_id, self.sddc_id)
    }
}

/// Check that `value` is a hyphenated UUID
pub fn validate_uuid(field: &'static str, value: &str) -> Result<(), ValidationError> {
    match Uuid::try_parse(value) {
        Ok(uuid) if uuid.hyphenated().to_string() == value.to_ascii_lowercase() => Ok(()),
        Ok(_) => Err(ValidationError::InvalidUuid {
            field,
            reason: format!("{:?} is not a hyphenated UUID", value),
        }),
        Err(e) => Err(ValidationError::InvalidUuid {
            field,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
