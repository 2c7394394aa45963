// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake DRaaS client for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ClientError, DraasClient};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use vmc_core::{ProvisionSrmConfig, RemoteTask, SiteRecovery, SrmNode, TaskId, TaskStatus};

/// Recorded DRaaS call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraasCall {
    Authenticate,
    Provision { sddc_id: String, suffix: String },
    Delete { sddc_id: String, node_id: String },
    GetTask { task_id: TaskId },
    GetSiteRecovery { sddc_id: String },
}

/// One answer to a `get_task` poll. The last step of a script repeats.
#[derive(Debug, Clone)]
pub enum TaskStep {
    Running,
    Finished,
    Failed(String),
    Error(ClientError),
}

#[derive(Debug, Clone)]
enum TaskEffect {
    Provision { sddc_id: String, node: SrmNode },
    Delete { sddc_id: String, node_id: String },
}

struct FakeTask {
    steps: VecDeque<TaskStep>,
    effect: TaskEffect,
    node_id: String,
    settled: bool,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<DraasCall>,
    sites: HashMap<String, Vec<SrmNode>>,
    scripts: VecDeque<(TaskId, Vec<TaskStep>)>,
    tasks: HashMap<TaskId, FakeTask>,
    auth_error: Option<ClientError>,
    submit_errors: VecDeque<ClientError>,
    hidden_reads: u32,
    in_flight: HashMap<String, u32>,
    max_in_flight: HashMap<String, u32>,
    next_task: u64,
}

/// Fake DRaaS client for testing
///
/// Submissions consume scripted task progressions (see [`FakeDraasClient::script_task`]);
/// unscripted submissions finish on the first poll. A task's effect on the
/// site-recovery view is applied when a poll first observes it finished.
#[derive(Clone)]
pub struct FakeDraasClient {
    state: Arc<Mutex<FakeState>>,
}

impl Default for FakeDraasClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDraasClient {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState::default())),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<DraasCall> {
        self.state().calls.clone()
    }

    /// Register an SDDC with the given nodes
    pub fn add_sddc(&self, sddc_id: &str, nodes: Vec<SrmNode>) {
        self.state().sites.insert(sddc_id.to_string(), nodes);
    }

    /// Remove an SDDC entirely
    pub fn remove_sddc(&self, sddc_id: &str) {
        self.state().sites.remove(sddc_id);
    }

    /// Current nodes of an SDDC
    pub fn nodes(&self, sddc_id: &str) -> Vec<SrmNode> {
        self.state().sites.get(sddc_id).cloned().unwrap_or_default()
    }

    /// Script the next submission: it returns `task_id` and polls answer `steps`
    pub fn script_task(&self, task_id: &str, steps: impl IntoIterator<Item = TaskStep>) {
        self.state()
            .scripts
            .push_back((TaskId::from(task_id), steps.into_iter().collect()));
    }

    /// Make every `authenticate` call fail
    pub fn fail_auth(&self, error: ClientError) {
        self.state().auth_error = Some(error);
    }

    /// Make the next submission fail
    pub fn fail_next_submit(&self, error: ClientError) {
        self.state().submit_errors.push_back(error);
    }

    /// The next `reads` site-recovery reads list no nodes
    pub fn hide_nodes_for_reads(&self, reads: u32) {
        self.state().hidden_reads = reads;
    }

    /// Highest number of unsettled tasks ever observed at once for an SDDC
    pub fn max_in_flight(&self, sddc_id: &str) -> u32 {
        self.state()
            .max_in_flight
            .get(sddc_id)
            .copied()
            .unwrap_or(0)
    }

    fn submit(&self, sddc_id: &str, node_id: String, effect: TaskEffect) -> RemoteTask {
        let mut state = self.state();
        let (task_id, steps) = match state.scripts.pop_front() {
            Some(script) => script,
            None => {
                state.next_task += 1;
                (
                    TaskId(format!("task-{}", state.next_task)),
                    vec![TaskStep::Finished],
                )
            }
        };

        let in_flight = state.in_flight.entry(sddc_id.to_string()).or_insert(0);
        *in_flight += 1;
        let now = *in_flight;
        let max = state.max_in_flight.entry(sddc_id.to_string()).or_insert(0);
        *max = (*max).max(now);

        state.tasks.insert(
            task_id.clone(),
            FakeTask {
                steps: steps.into(),
                effect,
                node_id: node_id.clone(),
                settled: false,
            },
        );

        RemoteTask::new(task_id, TaskStatus::Started).with_resource_id(node_id)
    }

    fn fake_node(&self, suffix: &str) -> SrmNode {
        let id = Uuid::new_v4().to_string();
        SrmNode {
            hostname: Some(format!("srm-{}.sddc-10-0-0-1.vmwarevmc.com", suffix)),
            ip_address: Some("10.0.0.20".to_string()),
            state: Some("READY".to_string()),
            node_type: Some("SRM".to_string()),
            vm_moref_id: Some(format!("vm-{}", &id[..8])),
            id,
        }
    }
}

fn effect_sddc(effect: &TaskEffect) -> &str {
    match effect {
        TaskEffect::Provision { sddc_id, .. } | TaskEffect::Delete { sddc_id, .. } => sddc_id,
    }
}

#[async_trait]
impl DraasClient for FakeDraasClient {
    async fn authenticate(&self) -> Result<(), ClientError> {
        let mut state = self.state();
        state.calls.push(DraasCall::Authenticate);
        match &state.auth_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn provision_srm_node(
        &self,
        _org_id: &str,
        sddc_id: &str,
        config: &ProvisionSrmConfig,
    ) -> Result<RemoteTask, ClientError> {
        {
            let mut state = self.state();
            state.calls.push(DraasCall::Provision {
                sddc_id: sddc_id.to_string(),
                suffix: config.srm_extension_key_suffix.clone(),
            });
            if let Some(error) = state.submit_errors.pop_front() {
                return Err(error);
            }
        }

        let node = self.fake_node(&config.srm_extension_key_suffix);
        let node_id = node.id.clone();
        let effect = TaskEffect::Provision {
            sddc_id: sddc_id.to_string(),
            node,
        };
        Ok(self.submit(sddc_id, node_id, effect))
    }

    async fn delete_srm_node(
        &self,
        _org_id: &str,
        sddc_id: &str,
        node_id: &str,
    ) -> Result<RemoteTask, ClientError> {
        {
            let mut state = self.state();
            state.calls.push(DraasCall::Delete {
                sddc_id: sddc_id.to_string(),
                node_id: node_id.to_string(),
            });
            if let Some(error) = state.submit_errors.pop_front() {
                return Err(error);
            }
            let exists = state
                .sites
                .get(sddc_id)
                .is_some_and(|nodes| nodes.iter().any(|n| n.id == node_id));
            if !exists {
                return Err(ClientError::NotFound(format!("SRM node {}", node_id)));
            }
        }

        let effect = TaskEffect::Delete {
            sddc_id: sddc_id.to_string(),
            node_id: node_id.to_string(),
        };
        Ok(self.submit(sddc_id, node_id.to_string(), effect))
    }

    async fn get_task(&self, _org_id: &str, task_id: &TaskId) -> Result<RemoteTask, ClientError> {
        let mut state = self.state();
        state.calls.push(DraasCall::GetTask {
            task_id: task_id.clone(),
        });

        let task = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| ClientError::NotFound(format!("task {}", task_id)))?;

        let step = if task.steps.len() > 1 {
            task.steps.pop_front()
        } else {
            task.steps.front().cloned()
        }
        .unwrap_or(TaskStep::Finished);

        let status = match &step {
            TaskStep::Error(error) => return Err(error.clone()),
            TaskStep::Running => TaskStatus::Started,
            TaskStep::Finished => TaskStatus::Finished,
            TaskStep::Failed(_) => TaskStatus::Failed,
        };

        let mut remote = RemoteTask::new(task_id.clone(), status.clone())
            .with_resource_id(task.node_id.clone());
        if let TaskStep::Failed(detail) = &step {
            remote = remote.with_error_message(detail.clone());
        }

        if status.is_terminal() && !task.settled {
            task.settled = true;
            let effect = task.effect.clone();
            let sddc_id = effect_sddc(&effect).to_string();
            if let Some(count) = state.in_flight.get_mut(&sddc_id) {
                *count = count.saturating_sub(1);
            }
            if status == TaskStatus::Finished {
                match effect {
                    TaskEffect::Provision { sddc_id, node } => {
                        state.sites.entry(sddc_id).or_default().push(node);
                    }
                    TaskEffect::Delete { sddc_id, node_id } => {
                        if let Some(nodes) = state.sites.get_mut(&sddc_id) {
                            nodes.retain(|n| n.id != node_id);
                        }
                    }
                }
            }
        }

        Ok(remote)
    }

    async fn get_site_recovery(
        &self,
        _org_id: &str,
        sddc_id: &str,
    ) -> Result<SiteRecovery, ClientError> {
        let mut state = self.state();
        state.calls.push(DraasCall::GetSiteRecovery {
            sddc_id: sddc_id.to_string(),
        });

        let nodes = state
            .sites
            .get(sddc_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("SDDC {}", sddc_id)))?;

        let srm_nodes = if state.hidden_reads > 0 {
            state.hidden_reads -= 1;
            Vec::new()
        } else {
            nodes
        };

        Ok(SiteRecovery {
            sddc_id: sddc_id.to_string(),
            site_recovery_state: Some("ACTIVATED".to_string()),
            srm_nodes,
        })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
