//! Local validation specs
//!
//! Invalid input is rejected before configuration is read, so these pass
//! without any config file or credentials.

use crate::prelude::*;

#[test]
fn create_rejects_long_suffix() {
    let project = Project::empty();
    project
        .vmc()
        .args(&["create", "--sddc-id", SDDC_ID, "--suffix", "abcdefghijklmn"])
        .fails()
        .stderr_has("1 to 13 characters")
        .stderr_lacks("not configured");
}

#[test]
fn create_rejects_invalid_suffix_character() {
    let project = Project::empty();
    project
        .vmc()
        .args(&["create", "--sddc-id", SDDC_ID, "--suffix", "dr_01"])
        .fails()
        .stderr_has("srm_node_extension_key_suffix may only contain")
        .stderr_lacks("not configured");
}

#[test]
fn import_rejects_id_without_sddc() {
    let project = Project::empty();
    project
        .vmc()
        .args(&["import", NODE_ID])
        .fails()
        .stderr_has("expected id,sddc_id");
}

#[test]
fn import_rejects_non_uuid_node_id() {
    let project = Project::empty();
    project
        .vmc()
        .args(&["import", &format!("node-1,{}", SDDC_ID)])
        .fails()
        .stderr_has("invalid format for id");
}

#[test]
fn import_rejects_non_uuid_sddc_id() {
    let project = Project::empty();
    project
        .vmc()
        .args(&["import", &format!("{},sddc-1", NODE_ID)])
        .fails()
        .stderr_has("invalid format for sddc_id");
}

#[test]
fn valid_suffix_proceeds_to_configuration() {
    let project = Project::empty();
    project
        .vmc()
        .args(&["create", "--sddc-id", SDDC_ID, "--suffix", "dr-01.a"])
        .fails()
        .stderr_has("org ID is not configured");
}
