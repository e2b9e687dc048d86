use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid workload kind: {0} (expected: deployment|deploy|statefulset|ss|daemonset|ds|pod|po)")]
    InvalidKind(String),
    #[error("invalid label `{segment}`: {reason}")]
    InvalidLabel { segment: String, reason: &'static str },
    #[error("command is empty")]
    EmptyCommand,
}
