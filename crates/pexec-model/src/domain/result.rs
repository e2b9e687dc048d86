use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ExecError, TaskStatus};

/// Outcome of the execution on one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub instance_name: String,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ExecError>,
    /// Time spent from task start to completion.
    #[serde(with = "crate::domain::secs_f64")]
    pub elapsed: Duration,
}

impl ExecutionResult {
    pub fn success(instance_name: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            instance_name: instance_name.into(),
            succeeded: true,
            error: None,
            elapsed,
        }
    }

    pub fn failure(instance_name: impl Into<String>, error: ExecError, elapsed: Duration) -> Self {
        Self {
            instance_name: instance_name.into(),
            succeeded: false,
            error: Some(error),
            elapsed,
        }
    }

    /// Build from an executor outcome.
    pub fn from_outcome(
        instance_name: impl Into<String>,
        outcome: Result<(), ExecError>,
        elapsed: Duration,
    ) -> Self {
        match outcome {
            Ok(()) => Self::success(instance_name, elapsed),
            Err(e) => Self::failure(instance_name, e, elapsed),
        }
    }

    pub fn status(&self) -> TaskStatus {
        if self.succeeded {
            TaskStatus::Succeeded
        } else {
            TaskStatus::Failed
        }
    }
}
