//! Help and usage specs

use crate::prelude::*;

#[test]
fn help_lists_node_commands() {
    let project = Project::empty();
    project
        .vmc()
        .args(&["--help"])
        .passes()
        .stdout_has("create")
        .stdout_has("read")
        .stdout_has("delete")
        .stdout_has("import");
}

#[test]
fn create_help_describes_suffix() {
    let project = Project::empty();
    project
        .vmc()
        .args(&["create", "--help"])
        .passes()
        .stdout_has("--sddc-id")
        .stdout_has("com.vmware.vcDr-");
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let project = Project::empty();
    project.vmc().fails().stderr_has("Usage");
}
