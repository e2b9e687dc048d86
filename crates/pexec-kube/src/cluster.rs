use std::fmt::Debug;

use async_trait::async_trait;
use k8s_openapi::{
    NamespaceResourceScope,
    api::{
        apps::v1::{DaemonSet, Deployment, StatefulSet},
        core::v1::Pod,
    },
};
use kube::{
    Client, Resource,
    api::{Api, ListParams},
};
use pexec_core::{ClusterApi, CoreError};
use pexec_model::{LabelSet, WorkloadKind, WorkloadReference};
use tracing::{debug, instrument};

/// Only pods that can accept an exec.
const RUNNING_PODS: &str = "status.phase=Running";

/// [`ClusterApi`] backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn labels_of<K>(&self, workload: &WorkloadReference) -> Result<LabelSet, CoreError>
    where
        K: Resource<Scope = NamespaceResourceScope> + Clone + Debug + serde::de::DeserializeOwned,
        <K as Resource>::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), &workload.namespace);
        let meta = api
            .get_metadata(&workload.name)
            .await
            .map_err(|e| resolution_error(e, workload))?;
        Ok(meta.metadata.labels.unwrap_or_default().into())
    }
}

#[async_trait]
impl ClusterApi for KubeCluster {
    #[instrument(level = "debug", skip_all, fields(workload = %workload))]
    async fn workload_labels(&self, workload: &WorkloadReference) -> Result<LabelSet, CoreError> {
        match workload.kind {
            WorkloadKind::Deployment => self.labels_of::<Deployment>(workload).await,
            WorkloadKind::StatefulSet => self.labels_of::<StatefulSet>(workload).await,
            WorkloadKind::DaemonSet => self.labels_of::<DaemonSet>(workload).await,
            WorkloadKind::Pod => Err(CoreError::MissingSelector {
                kind: WorkloadKind::Pod,
            }),
        }
    }

    async fn list_instances(
        &self,
        namespace: &str,
        selector: &str,
    ) -> Result<Vec<String>, CoreError> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let mut params = ListParams::default().fields(RUNNING_PODS);
        if !selector.is_empty() {
            params = params.labels(selector);
        }

        let list = pods
            .list(&params)
            .await
            .map_err(|e| CoreError::Transport(e.to_string()))?;
        debug!(target: "pexec.kube.list", namespace, selector, count = list.items.len(), "pods listed");

        Ok(list
            .items
            .into_iter()
            .filter_map(|pod| pod.metadata.name)
            .collect())
    }
}

/// Classify a metadata read failure.
fn resolution_error(e: kube::Error, workload: &WorkloadReference) -> CoreError {
    match e {
        kube::Error::Api(resp) if resp.code == 404 => CoreError::ResourceNotFound {
            kind: workload.kind,
            name: workload.name.clone(),
            namespace: workload.namespace.clone(),
        },
        kube::Error::Api(resp) if resp.code == 401 || resp.code == 403 => {
            CoreError::AccessDenied(resp.message)
        }
        other => CoreError::Transport(other.to_string()),
    }
}
