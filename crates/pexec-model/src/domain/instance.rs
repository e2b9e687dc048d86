use std::fmt;

use serde::{Deserialize, Serialize};

/// One resolved running instance (pod) a command is dispatched to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceTarget {
    pub name: String,
    pub namespace: String,
}

impl InstanceTarget {
    pub fn new<N, S>(name: N, namespace: S) -> Self
    where
        N: Into<String>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl fmt::Display for InstanceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
