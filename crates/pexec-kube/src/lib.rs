//! Kubernetes implementations of the cluster and exec capabilities.

mod config;
pub use config::{ClusterConfig, connect, kubeconfig_path};

mod cluster;
pub use cluster::KubeCluster;

mod exec;
pub use exec::KubeExecutor;
