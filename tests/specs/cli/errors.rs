//! Configuration error specs

use crate::prelude::*;

#[test]
fn missing_org_id_is_reported() {
    let project = Project::empty();
    project
        .vmc()
        .args(&["read", "--sddc-id", SDDC_ID, "--id", NODE_ID])
        .fails()
        .stderr_has("org ID is not configured");
}

#[test]
fn missing_refresh_token_is_reported() {
    let project = Project::empty();
    project
        .vmc()
        .args(&["--org-id", "org-1", "read", "--sddc-id", SDDC_ID, "--id", NODE_ID])
        .fails()
        .stderr_has("API refresh token is not configured");
}

#[test]
fn token_from_environment_is_accepted() {
    let project = Project::empty();
    project
        .vmc()
        .env("VMC_ORG_ID", "org-1")
        .env("VMC_REFRESH_TOKEN", "token")
        .env("CSP_URL", UNREACHABLE_URL)
        .args(&["read", "--sddc-id", SDDC_ID, "--id", NODE_ID])
        .fails()
        .stderr_lacks("not configured")
        .stderr_has("authentication error from Cloud Service Provider");
}

#[test]
fn explicit_config_must_exist() {
    let project = Project::empty();
    let missing = project.path().join("nope.toml");
    project
        .vmc()
        .args(&["--config", missing.to_str().unwrap(), "delete", "--sddc-id", SDDC_ID, "--id", NODE_ID])
        .fails()
        .stderr_has("cannot load config");
}

#[test]
fn malformed_config_is_reported() {
    let project = Project::empty();
    let path = project.file("bad.toml", "org_id = [\n");
    project
        .vmc()
        .args(&["--config", path.to_str().unwrap(), "delete", "--sddc-id", SDDC_ID, "--id", NODE_ID])
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn default_config_location_is_used() {
    let project = Project::empty();
    project.file(".config/vmc/config.toml", "org_id = \"org-from-default\"\n");
    project
        .vmc()
        .args(&["read", "--sddc-id", SDDC_ID, "--id", NODE_ID])
        .fails()
        .stderr_lacks("org ID is not configured")
        .stderr_has("API refresh token is not configured");
}
