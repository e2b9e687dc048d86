use thiserror::Error;

/// Failures while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format `{0}` (expected text, json or journald)")]
    InvalidFormat(String),
    #[error("journald logging is unavailable on this platform or build")]
    JournaldNotSupported,
    #[error("a global logger is already installed")]
    AlreadyInitialized,
    #[error("logger initialization failed: {0}")]
    InitializationFailed(String),
    #[error("invalid log filter `{directive}`: {reason}")]
    InvalidLogLevel { directive: String, reason: String },
}
