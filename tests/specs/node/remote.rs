//! Remote failure specs
//!
//! Endpoints point at an unreachable address, so every operation fails at
//! authentication without touching any SDDC.

use crate::prelude::*;

#[test]
fn create_reports_authentication_failure() {
    let project = Project::empty();
    let config = project.unreachable_config();
    project
        .vmc()
        .args(&["--config", config.to_str().unwrap(), "create", "--sddc-id", SDDC_ID, "--suffix", "dr01"])
        .fails()
        .stderr_has("authentication error from Cloud Service Provider");
}

#[test]
fn delete_reports_authentication_failure() {
    let project = Project::empty();
    let config = project.unreachable_config();
    project
        .vmc()
        .args(&["--config", config.to_str().unwrap(), "delete", "--sddc-id", SDDC_ID, "--id", NODE_ID])
        .fails()
        .stderr_has("authentication error from Cloud Service Provider");
}

#[test]
fn import_reports_authentication_failure() {
    let project = Project::empty();
    let config = project.unreachable_config();
    project
        .vmc()
        .args(&["--config", config.to_str().unwrap(), "import", &format!("{},{}", NODE_ID, SDDC_ID)])
        .fails()
        .stderr_has("authentication error from Cloud Service Provider");
}
