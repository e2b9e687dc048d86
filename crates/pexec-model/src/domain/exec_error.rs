use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single instance execution failed.
///
/// Always recorded in the instance result; never aborts sibling executions.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExecError {
    #[error("non-zero exit code: {code}")]
    NonZeroExit { code: i32 },
    #[error("remote command failed: {reason}")]
    Remote { reason: String },
    #[error("transport error: {reason}")]
    Transport { reason: String },
    #[error("timed out after {secs}s")]
    Timeout { secs: u64 },
    #[error("cancelled")]
    Cancelled,
    #[error("execution task panicked")]
    Panicked,
}

impl ExecError {
    pub fn transport(reason: impl Into<String>) -> Self {
        ExecError::Transport {
            reason: reason.into(),
        }
    }

    pub fn remote(reason: impl Into<String>) -> Self {
        ExecError::Remote {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for ExecError {
    fn from(e: std::io::Error) -> Self {
        ExecError::transport(e.to_string())
    }
}
