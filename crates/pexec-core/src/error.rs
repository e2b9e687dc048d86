use pexec_model::{ModelError, WorkloadKind};
use thiserror::Error;

/// Errors raised before dispatch begins.
///
/// Any of these stops the pipeline; nothing is executed on any instance.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("unknown workload kind: {0}")]
    UnknownKind(String),

    #[error("{kind} requires a label selector, pass --labels key1=value1,...")]
    MissingSelector { kind: WorkloadKind },

    #[error("not enough arguments: {0}")]
    MissingArguments(&'static str),

    #[error("command is empty")]
    EmptyCommand,

    #[error("invalid label selector: {0}")]
    InvalidLabels(#[source] ModelError),

    #[error("{kind} {name} not found in namespace {namespace}")]
    ResourceNotFound {
        kind: WorkloadKind,
        name: String,
        namespace: String,
    },

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("cluster api error: {0}")]
    Transport(String),

    #[error("failed to build cluster client: {0}")]
    Client(String),

    #[error("interrupted before any command was dispatched")]
    Interrupted,
}

impl CoreError {
    /// Invalid invocation, detected without any network activity.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CoreError::UnknownKind(_)
                | CoreError::MissingSelector { .. }
                | CoreError::MissingArguments(_)
                | CoreError::EmptyCommand
                | CoreError::InvalidLabels(_)
        )
    }

    /// Failure while resolving the workload or listing its instances.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            CoreError::ResourceNotFound { .. } | CoreError::AccessDenied(_) | CoreError::Transport(_)
        )
    }
}

impl From<ModelError> for CoreError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::InvalidKind(token) => CoreError::UnknownKind(token),
            ModelError::EmptyCommand => CoreError::EmptyCommand,
            e @ ModelError::InvalidLabel { .. } => CoreError::InvalidLabels(e),
        }
    }
}
