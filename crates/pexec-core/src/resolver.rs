use pexec_model::{LabelSet, WorkloadKind, WorkloadReference};
use tracing::{debug, warn};

use crate::{ClusterApi, CoreError};

/// Maps a workload reference to the labels selecting its instances.
pub struct WorkloadResolver<'a> {
    cluster: &'a dyn ClusterApi,
}

impl<'a> WorkloadResolver<'a> {
    pub fn new(cluster: &'a dyn ClusterApi) -> Self {
        Self { cluster }
    }

    /// Resolve the label set for `workload`.
    ///
    /// Pods pass `selector` through unchanged and never touch the cluster;
    /// controller kinds read the resource metadata once and ignore `selector`.
    pub async fn resolve(
        &self,
        workload: &WorkloadReference,
        selector: Option<&LabelSet>,
    ) -> Result<LabelSet, CoreError> {
        if workload.kind == WorkloadKind::Pod {
            let labels = selector
                .filter(|s| !s.is_empty())
                .cloned()
                .ok_or(CoreError::MissingSelector {
                    kind: workload.kind,
                })?;
            debug!(target: "pexec.core.resolve", selector = %labels, "using explicit selector");
            return Ok(labels);
        }

        let labels = self.cluster.workload_labels(workload).await?;
        if labels.is_empty() {
            warn!(
                target: "pexec.core.resolve",
                workload = %workload,
                "workload has no labels; every pod in the namespace will match"
            );
        }
        debug!(target: "pexec.core.resolve", workload = %workload, selector = %labels, "resolved labels");
        Ok(labels)
    }
}
