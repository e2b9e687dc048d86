//! In-memory stand-ins for the cluster API and the exec transport.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use pexec_model::{
    ExecError, ExecutionRequest, InstanceTarget, LabelSet, WorkloadKind, WorkloadReference,
};

use crate::{ClusterApi, CoreError, RemoteExecutor};

#[derive(Default)]
pub struct FakeCluster {
    workloads: HashMap<(WorkloadKind, String), LabelSet>,
    pods: Vec<(String, LabelSet)>,
    list_error: Option<String>,
    forbidden: bool,
    metadata_delay: Duration,
    metadata_calls: AtomicUsize,
    list_calls: AtomicUsize,
    last_selector: Mutex<Option<String>>,
}

impl FakeCluster {
    pub fn with_workload(mut self, kind: WorkloadKind, name: &str, labels: LabelSet) -> Self {
        self.workloads.insert((kind, name.to_string()), labels);
        self
    }

    pub fn with_pod(mut self, name: &str, labels: &str) -> Self {
        self.pods
            .push((name.to_string(), LabelSet::parse(labels).unwrap()));
        self
    }

    pub fn failing_list(mut self, reason: &str) -> Self {
        self.list_error = Some(reason.to_string());
        self
    }

    pub fn with_metadata_delay(mut self, delay: Duration) -> Self {
        self.metadata_delay = delay;
        self
    }

    pub fn forbidden(mut self) -> Self {
        self.forbidden = true;
        self
    }

    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn last_selector(&self) -> Option<String> {
        self.last_selector.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClusterApi for FakeCluster {
    async fn workload_labels(&self, workload: &WorkloadReference) -> Result<LabelSet, CoreError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        if !self.metadata_delay.is_zero() {
            tokio::time::sleep(self.metadata_delay).await;
        }
        if self.forbidden {
            return Err(CoreError::AccessDenied(format!("cannot get {}", workload)));
        }
        self.workloads
            .get(&(workload.kind, workload.name.clone()))
            .cloned()
            .ok_or_else(|| CoreError::ResourceNotFound {
                kind: workload.kind,
                name: workload.name.clone(),
                namespace: workload.namespace.clone(),
            })
    }

    async fn list_instances(
        &self,
        _namespace: &str,
        selector: &str,
    ) -> Result<Vec<String>, CoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_selector.lock().unwrap() = Some(selector.to_string());
        if self.forbidden {
            return Err(CoreError::AccessDenied("cannot list pods".into()));
        }
        if let Some(reason) = &self.list_error {
            return Err(CoreError::Transport(reason.clone()));
        }
        let wanted = LabelSet::parse(selector).unwrap();
        Ok(self
            .pods
            .iter()
            .filter(|(_, labels)| wanted.iter().all(|(k, v)| labels.get(k) == Some(v)))
            .map(|(name, _)| name.clone())
            .collect())
    }
}

/// Executor whose behaviour is scripted per instance name.
#[derive(Default)]
pub struct FakeExecutor {
    delay: Duration,
    failures: HashMap<String, ExecError>,
    hanging: HashSet<String>,
    panicking: HashSet<String>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeExecutor {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing(mut self, name: &str, error: ExecError) -> Self {
        self.failures.insert(name.to_string(), error);
        self
    }

    pub fn hanging(mut self, name: &str) -> Self {
        self.hanging.insert(name.to_string());
        self
    }

    pub fn panicking(mut self, name: &str) -> Self {
        self.panicking.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteExecutor for FakeExecutor {
    async fn exec(
        &self,
        target: &InstanceTarget,
        _request: &ExecutionRequest,
    ) -> Result<(), ExecError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if self.panicking.contains(&target.name) {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            panic!("executor exploded on {}", target.name);
        }
        if self.hanging.contains(&target.name) {
            tokio::time::sleep(Duration::from_secs(24 * 3600)).await;
        } else if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.failures.get(&target.name) {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

pub fn targets(names: &[&str]) -> Vec<InstanceTarget> {
    names
        .iter()
        .map(|n| InstanceTarget::new(*n, "default"))
        .collect()
}

pub fn request() -> ExecutionRequest {
    ExecutionRequest::new(vec!["hostname".to_string()]).unwrap()
}
