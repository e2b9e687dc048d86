//! Fan-out of one execution task per instance, joined behind a completion barrier.
//!
//! Every dispatched instance produces exactly one [`ExecutionResult`]: executor errors,
//! timeouts, cancellation and panics are all recorded as failures rather than dropped.

mod config;
pub use config::DispatchConfig;

mod sink;
use sink::ResultSink;

use std::{collections::HashMap, future::Future, sync::Arc, time::Duration};

use pexec_model::{ExecError, ExecutionRequest, ExecutionResult, InstanceTarget, TaskStatus};
use tokio::{sync::Semaphore, task::JoinSet, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::RemoteExecutor;

pub struct Orchestrator {
    config: DispatchConfig,
    cancel: CancellationToken,
}

impl Orchestrator {
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Use `token` to cancel in-flight executions; cancelled tasks record [`ExecError::Cancelled`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token observed by every stage of a run, not only by dispatched tasks.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Run `request` on every target concurrently and wait for all of them.
    ///
    /// Results are returned in completion order. A failing instance never
    /// cancels or delays its siblings.
    #[instrument(level = "debug", skip_all, fields(instances = targets.len()))]
    pub async fn dispatch(
        &self,
        targets: Vec<InstanceTarget>,
        request: &ExecutionRequest,
        executor: Arc<dyn RemoteExecutor>,
    ) -> Vec<ExecutionResult> {
        if targets.is_empty() {
            debug!(target: "pexec.core.dispatch", "no instances to dispatch");
            return Vec::new();
        }
        if self.cancel.is_cancelled() {
            warn!(target: "pexec.core.dispatch", instances = targets.len(), "cancelled before dispatch");
            return Vec::new();
        }

        info!(
            target: "pexec.core.dispatch",
            instances = targets.len(),
            command = %request.command_line(),
            max_concurrency = ?self.config.max_concurrency,
            "dispatching"
        );

        let sink = ResultSink::with_capacity(targets.len());
        let request = Arc::new(request.clone());
        let permits = self
            .config
            .max_concurrency
            .map(|n| Arc::new(Semaphore::new(n.get())));

        let mut tasks = JoinSet::new();
        let mut names = HashMap::with_capacity(targets.len());
        for target in targets {
            let name = target.name.clone();
            let task = InstanceTask {
                target,
                request: Arc::clone(&request),
                executor: Arc::clone(&executor),
                permits: permits.clone(),
                timeout: self.config.task_timeout,
                cancel: self.cancel.clone(),
            };
            let sink = sink.clone();
            let handle = tasks.spawn(async move {
                let result = task.run().await;
                sink.record(result);
            });
            names.insert(handle.id(), name);
        }

        // completion barrier; a task that died is recorded as soon as it is reaped
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                let name = names.remove(&e.id()).unwrap_or_default();
                let error = if e.is_panic() {
                    ExecError::Panicked
                } else {
                    ExecError::Cancelled
                };
                warn!(target: "pexec.core.dispatch", instance = %name, %error, "task did not report");
                sink.record(ExecutionResult::failure(name, error, Duration::ZERO));
            }
        }

        let (results, failed) = sink.into_parts();
        info!(
            target: "pexec.core.dispatch",
            total = results.len(),
            failed,
            "all instances completed"
        );
        results
    }
}

/// Task-local state for one instance.
struct InstanceTask {
    target: InstanceTarget,
    request: Arc<ExecutionRequest>,
    executor: Arc<dyn RemoteExecutor>,
    permits: Option<Arc<Semaphore>>,
    timeout: Option<Duration>,
    cancel: CancellationToken,
}

impl InstanceTask {
    async fn run(self) -> ExecutionResult {
        let started = Instant::now();
        let name = self.target.name.as_str();
        debug!(target: "pexec.core.task", instance = name, status = ?TaskStatus::Pending);

        let _permit = match &self.permits {
            Some(permits) => {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => {
                        return self.finish(Err(ExecError::Cancelled), started);
                    }
                    permit = Arc::clone(permits).acquire_owned() => permit.ok(),
                }
            }
            None => None,
        };

        debug!(target: "pexec.core.task", instance = name, status = ?TaskStatus::Running);
        let exec = with_timeout(
            self.executor.exec(&self.target, &self.request),
            self.timeout,
        );
        let outcome = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ExecError::Cancelled),
            outcome = exec => outcome,
        };

        self.finish(outcome, started)
    }

    fn finish(&self, outcome: Result<(), ExecError>, started: Instant) -> ExecutionResult {
        let result = ExecutionResult::from_outcome(&self.target.name, outcome, started.elapsed());
        match &result.error {
            None => debug!(
                target: "pexec.core.task",
                instance = %self.target.name,
                status = ?result.status(),
                elapsed = ?result.elapsed
            ),
            Some(error) => warn!(
                target: "pexec.core.task",
                instance = %self.target.name,
                status = ?result.status(),
                %error
            ),
        }
        result
    }
}

async fn with_timeout<F>(exec: F, timeout: Option<Duration>) -> Result<(), ExecError>
where
    F: Future<Output = Result<(), ExecError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, exec)
            .await
            .unwrap_or(Err(ExecError::Timeout {
                secs: limit.as_secs(),
            })),
        None => exec.await,
    }
}
