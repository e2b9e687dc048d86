mod config;
mod error;
mod format;
mod subscriber;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;

/// Install the global `tracing` subscriber described by `cfg`.
///
/// Events are written to stderr; stdout is reserved for command output.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    subscriber::install(cfg)
}
