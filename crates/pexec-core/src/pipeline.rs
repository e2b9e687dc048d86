use std::sync::Arc;

use pexec_model::{InstanceTarget, LabelSet, RunSummary};
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use crate::{
    ClusterApi, CoreError, InstanceLister, Invocation, Orchestrator, RemoteExecutor,
    WorkloadResolver, summarize,
};

/// Resolve, list, dispatch and summarize one invocation.
///
/// Errors are only returned for failures before dispatch; per-instance
/// failures are reported inside the [`RunSummary`]. Cancelling the
/// orchestrator's token before dispatch yields [`CoreError::Interrupted`].
#[instrument(level = "debug", skip_all, fields(workload = %invocation.workload))]
pub async fn run_pipeline(
    cluster: &dyn ClusterApi,
    executor: Arc<dyn RemoteExecutor>,
    orchestrator: &Orchestrator,
    invocation: &Invocation,
) -> Result<RunSummary, CoreError> {
    let cancel = orchestrator.cancellation();
    let (labels, targets) = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!(target: "pexec.core.pipeline", "interrupted during resolution");
            return Err(CoreError::Interrupted);
        }
        found = locate(cluster, invocation) => found?,
    };
    info!(
        target: "pexec.core.pipeline",
        selector = %labels,
        instances = targets.len(),
        "resolved instances"
    );

    let started = Instant::now();
    let results = orchestrator
        .dispatch(targets, &invocation.request, executor)
        .await;
    Ok(summarize(&results, started))
}

async fn locate(
    cluster: &dyn ClusterApi,
    invocation: &Invocation,
) -> Result<(LabelSet, Vec<InstanceTarget>), CoreError> {
    let labels = WorkloadResolver::new(cluster)
        .resolve(&invocation.workload, invocation.selector.as_ref())
        .await?;
    let targets = InstanceLister::new(cluster)
        .list(&invocation.workload.namespace, &labels)
        .await?;
    Ok((labels, targets))
}
