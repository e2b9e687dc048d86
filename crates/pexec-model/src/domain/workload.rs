use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Kind of workload whose instances are targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
    DaemonSet,
    /// Bare pods addressed by an explicit label selector.
    Pod,
}

impl WorkloadKind {
    /// Returns `true` if the kind is backed by a controller resource with its own labels.
    pub fn is_controller(&self) -> bool {
        !matches!(self, WorkloadKind::Pod)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "Deployment",
            WorkloadKind::StatefulSet => "StatefulSet",
            WorkloadKind::DaemonSet => "DaemonSet",
            WorkloadKind::Pod => "Pod",
        }
    }
}

impl FromStr for WorkloadKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deployment" | "deploy" => Ok(WorkloadKind::Deployment),
            "statefulset" | "ss" => Ok(WorkloadKind::StatefulSet),
            "daemonset" | "ds" => Ok(WorkloadKind::DaemonSet),
            "pod" | "po" => Ok(WorkloadKind::Pod),
            _ => Err(ModelError::InvalidKind(s.to_string())),
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a workload inside a namespace.
///
/// For [`WorkloadKind::Pod`] the name is empty: pods are addressed by selector only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadReference {
    pub kind: WorkloadKind,
    pub name: String,
    pub namespace: String,
}

impl WorkloadReference {
    pub fn new<N, S>(kind: WorkloadKind, name: N, namespace: S) -> Self
    where
        N: Into<String>,
        S: Into<String>,
    {
        Self {
            kind,
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl fmt::Display for WorkloadReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{} in {}", self.kind, self.namespace)
        } else {
            write!(f, "{}/{} in {}", self.kind, self.name, self.namespace)
        }
    }
}
