use pexec_model::{InstanceTarget, LabelSet};
use tracing::debug;

use crate::{ClusterApi, CoreError};

/// Turns a label set into the concrete list of running instances.
pub struct InstanceLister<'a> {
    cluster: &'a dyn ClusterApi,
}

impl<'a> InstanceLister<'a> {
    pub fn new(cluster: &'a dyn ClusterApi) -> Self {
        Self { cluster }
    }

    /// Issue one list query for `labels` in `namespace`.
    ///
    /// An empty label set matches every instance in the namespace.
    /// No match yields an empty list; any API failure is a [`CoreError::Transport`].
    pub async fn list(
        &self,
        namespace: &str,
        labels: &LabelSet,
    ) -> Result<Vec<InstanceTarget>, CoreError> {
        let selector = labels.to_selector();
        let names = self
            .cluster
            .list_instances(namespace, &selector)
            .await
            .map_err(|e| match e {
                CoreError::Transport(_) => e,
                other => CoreError::Transport(other.to_string()),
            })?;

        debug!(
            target: "pexec.core.list",
            namespace,
            selector = %selector,
            count = names.len(),
            "listed instances"
        );

        Ok(names
            .into_iter()
            .map(|name| InstanceTarget::new(name, namespace))
            .collect())
    }
}
