use serde::{Deserialize, Serialize};

/// Lifecycle of a single per-instance execution task.
///
/// Transitions are `Pending -> Running -> {Succeeded, Failed}`; there are no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// Task is spawned but waiting for a dispatch permit.
    Pending,
    /// Remote command is executing.
    Running,
    /// Remote command completed successfully.
    Succeeded,
    /// Transport or remote command failed.
    Failed,
}
