// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn paths_follow_draas_layout() {
    assert_eq!(
        task_path("org-1", &TaskId::from("t1")),
        "/vmc/draas/api/orgs/org-1/tasks/t1"
    );
    assert_eq!(
        site_recovery_path("org-1", "sddc-1"),
        "/vmc/draas/api/orgs/org-1/sddcs/sddc-1/site-recovery"
    );
    assert_eq!(
        srm_nodes_path("org-1", "sddc-1"),
        "/vmc/draas/api/orgs/org-1/sddcs/sddc-1/site-recovery/srm-nodes"
    );
    assert_eq!(
        srm_node_path("org-1", "sddc-1", "node-1"),
        "/vmc/draas/api/orgs/org-1/sddcs/sddc-1/site-recovery/srm-nodes/node-1"
    );
}

#[test]
fn success_statuses_are_not_errors() {
    assert_eq!(classify_status(200, "{}"), None);
    assert_eq!(classify_status(202, ""), None);
}

#[test]
fn unauthorized_maps_to_unauthenticated() {
    let err = classify_status(401, r#"{"error_messages":["token expired"]}"#).unwrap();
    assert_eq!(err, ClientError::Unauthenticated("token expired".to_string()));
    assert!(err.is_unauthenticated());
}

#[test]
fn missing_resource_maps_to_not_found() {
    let err = classify_status(404, r#"{"message":"SDDC not found"}"#).unwrap();
    assert_eq!(err, ClientError::NotFound("SDDC not found".to_string()));
    assert!(err.is_not_found());
}

#[test]
fn other_failures_keep_status_and_message() {
    let err = classify_status(
        409,
        r#"{"error_code":"conflict","error_messages":["node busy","retry later"]}"#,
    )
    .unwrap();
    assert_eq!(
        err,
        ClientError::Api {
            status: 409,
            message: "node busy; retry later".to_string()
        }
    );
}

#[test]
fn non_json_error_body_is_passed_through() {
    assert_eq!(error_message("  gateway timeout \n"), "gateway timeout");
    assert_eq!(error_message(""), "empty response body");
}

#[test]
fn decode_reports_malformed_json() {
    let err = decode::<RemoteTask>("{not json").unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn requests_before_authenticate_are_unauthenticated() {
    let client = HttpDraasClient::new("http://127.0.0.1:1", "http://127.0.0.1:1", "token");

    let err = client
        .get_task("org-1", &TaskId::from("t1"))
        .await
        .unwrap_err();

    assert!(err.is_unauthenticated());
}

#[test]
fn from_config_requires_refresh_token() {
    let config = ProviderConfig::default();
    assert!(matches!(
        HttpDraasClient::from_config(&config),
        Err(ConfigError::MissingRefreshToken)
    ));
}
