use async_trait::async_trait;
use pexec_model::{LabelSet, WorkloadReference};

use crate::CoreError;

/// Read-only view of the cluster API needed for resolution.
///
/// Implementations are shared across the pipeline and must be stateless after construction.
#[async_trait]
pub trait ClusterApi: Send + Sync + 'static {
    /// Fetch the labels of a controller workload (`Deployment`, `StatefulSet`, `DaemonSet`).
    ///
    /// Must fail with [`CoreError::ResourceNotFound`], [`CoreError::AccessDenied`]
    /// or [`CoreError::Transport`].
    async fn workload_labels(&self, workload: &WorkloadReference) -> Result<LabelSet, CoreError>;

    /// Names of running instances in `namespace` matching the equality `selector`.
    ///
    /// An empty selector matches every instance.
    async fn list_instances(&self, namespace: &str, selector: &str)
    -> Result<Vec<String>, CoreError>;
}
