// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! REST adapter for the DRaaS API
//!
//! Requests are blocking (ureq) and run on tokio's blocking pool. The access
//! token is exchanged from the API refresh token on `authenticate` and sent
//! in the `csp-auth-token` header.

use super::{ClientError, DraasClient};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use ureq::http::Response;
use ureq::{Agent, Body};
use vmc_core::{ConfigError, ProviderConfig, ProvisionSrmConfig, RemoteTask, SiteRecovery, TaskId};

const AUTH_HEADER: &str = "csp-auth-token";
const AUTHORIZE_PATH: &str = "/csp/gateway/am/api/auth/api-tokens/authorize";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) fn task_path(org_id: &str, task_id: &TaskId) -> String {
    format!("/vmc/draas/api/orgs/{}/tasks/{}", org_id, task_id)
}

pub(crate) fn site_recovery_path(org_id: &str, sddc_id: &str) -> String {
    format!("/vmc/draas/api/orgs/{}/sddcs/{}/site-recovery", org_id, sddc_id)
}

pub(crate) fn srm_nodes_path(org_id: &str, sddc_id: &str) -> String {
    format!("{}/srm-nodes", site_recovery_path(org_id, sddc_id))
}

pub(crate) fn srm_node_path(org_id: &str, sddc_id: &str, node_id: &str) -> String {
    format!("{}/{}", srm_nodes_path(org_id, sddc_id), node_id)
}

#[derive(Deserialize)]
struct AccessToken {
    access_token: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Best-effort human message from an error response body
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error_messages.is_empty() => parsed.error_messages.join("; "),
        Ok(ApiErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ if body.trim().is_empty() => "empty response body".to_string(),
        _ => body.trim().to_string(),
    }
}

/// Map a non-success HTTP status to an error
pub(crate) fn classify_status(status: u16, body: &str) -> Option<ClientError> {
    match status {
        200..=299 => None,
        401 => Some(ClientError::Unauthenticated(error_message(body))),
        404 => Some(ClientError::NotFound(error_message(body))),
        _ => Some(ClientError::Api {
            status,
            message: error_message(body),
        }),
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

fn read_response(mut response: Response<Body>) -> Result<(u16, String), ClientError> {
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ClientError::Decode(format!("failed to read response: {}", e)))?;
    Ok((status, body))
}

fn transport(e: ureq::Error) -> ClientError {
    ClientError::Transport(e.to_string())
}

enum Method {
    Get,
    Post(String),
    Delete,
}

struct Inner {
    agent: Agent,
    vmc_url: String,
    csp_url: String,
    refresh_token: String,
    access_token: Mutex<Option<String>>,
}

impl Inner {
    fn authorize(&self) -> Result<(), ClientError> {
        let url = format!("{}{}", self.csp_url.trim_end_matches('/'), AUTHORIZE_PATH);
        let response = self
            .agent
            .post(&url)
            .send_form([("refresh_token", self.refresh_token.as_str())])
            .map_err(transport)?;
        let (status, body) = read_response(response)?;

        if let Some(err) = classify_status(status, &body) {
            // CSP answers a bad refresh token with 400
            return Err(match err {
                ClientError::Api { status: 400, message } => {
                    ClientError::Unauthenticated(message)
                }
                other => other,
            });
        }

        let token: AccessToken = decode(&body)?;
        *self.access_token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.access_token);
        Ok(())
    }

    fn token(&self) -> Result<String, ClientError> {
        self.access_token
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| ClientError::Unauthenticated("not authenticated".to_string()))
    }

    fn send<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.vmc_url.trim_end_matches('/'), path);
        let token = self.token()?;

        let result = match method {
            Method::Get => self
                .agent
                .get(&url)
                .header(AUTH_HEADER, token.as_str())
                .call(),
            Method::Delete => self
                .agent
                .delete(&url)
                .header(AUTH_HEADER, token.as_str())
                .call(),
            Method::Post(body) => self
                .agent
                .post(&url)
                .header(AUTH_HEADER, token.as_str())
                .header("Content-Type", "application/json")
                .send(body),
        };

        let (status, body) = read_response(result.map_err(transport)?)?;
        if let Some(err) = classify_status(status, &body) {
            return Err(err);
        }
        decode(&body)
    }
}

/// Production DRaaS client
#[derive(Clone)]
pub struct HttpDraasClient {
    inner: Arc<Inner>,
}

impl HttpDraasClient {
    pub fn new(
        vmc_url: impl Into<String>,
        csp_url: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();

        Self {
            inner: Arc::new(Inner {
                agent: Agent::new_with_config(config),
                vmc_url: vmc_url.into(),
                csp_url: csp_url.into(),
                refresh_token: refresh_token.into(),
                access_token: Mutex::new(None),
            }),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.vmc_url.clone(),
            config.csp_url.clone(),
            config.refresh_token()?,
        ))
    }

    async fn run<T, F>(&self, f: F) -> Result<T, ClientError>
    where
        T: Send + 'static,
        F: FnOnce(&Inner) -> Result<T, ClientError> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&inner))
            .await
            .map_err(|e| ClientError::Transport(format!("request task failed: {}", e)))?
    }
}

#[async_trait]
impl DraasClient for HttpDraasClient {
    async fn authenticate(&self) -> Result<(), ClientError> {
        self.run(|inner| inner.authorize()).await
    }

    async fn provision_srm_node(
        &self,
        org_id: &str,
        sddc_id: &str,
        config: &ProvisionSrmConfig,
    ) -> Result<RemoteTask, ClientError> {
        let path = srm_nodes_path(org_id, sddc_id);
        let body = serde_json::to_string(config)
            .map_err(|e| ClientError::Decode(format!("failed to encode request: {}", e)))?;
        self.run(move |inner| inner.send(Method::Post(body), &path))
            .await
    }

    async fn delete_srm_node(
        &self,
        org_id: &str,
        sddc_id: &str,
        node_id: &str,
    ) -> Result<RemoteTask, ClientError> {
        let path = srm_node_path(org_id, sddc_id, node_id);
        self.run(move |inner| inner.send(Method::Delete, &path))
            .await
    }

    async fn get_task(&self, org_id: &str, task_id: &TaskId) -> Result<RemoteTask, ClientError> {
        let path = task_path(org_id, task_id);
        self.run(move |inner| inner.send(Method::Get, &path)).await
    }

    async fn get_site_recovery(
        &self,
        org_id: &str,
        sddc_id: &str,
    ) -> Result<SiteRecovery, ClientError> {
        let path = site_recovery_path(org_id, sddc_id);
        self.run(move |inner| inner.send(Method::Get, &path)).await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
