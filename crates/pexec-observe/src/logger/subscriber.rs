use std::io;

use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::logger::{config::LoggerConfig, error::LoggerError, format::LoggerFormat};

/// Build the subscriber for `cfg` and install it as the global default.
pub(crate) fn install(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = build_filter(&cfg.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    match cfg.format {
        LoggerFormat::Text => {
            let layer = fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(cfg.use_color)
                .with_target(cfg.with_targets)
                .with_timer(local_timer());
            try_install(registry.with(layer))
        }
        LoggerFormat::Json => {
            let layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_writer(io::stderr)
                .with_target(cfg.with_targets)
                .with_timer(local_timer());
            try_install(registry.with(layer))
        }
        LoggerFormat::Journald => journald(registry),
    }
}

fn build_filter(directive: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(directive).map_err(|e| LoggerError::InvalidLogLevel {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}

fn local_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn try_install<S>(subscriber: S) -> Result<(), LoggerError>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber.try_init().map_err(|e| {
        let msg = e.to_string();
        if msg.contains("global default") {
            LoggerError::AlreadyInitialized
        } else {
            LoggerError::InitializationFailed(msg)
        }
    })
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald<S>(registry: S) -> Result<(), LoggerError>
where
    S: Subscriber + Send + Sync + 'static + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let layer = tracing_journald::layer()
        .map_err(|e| LoggerError::InitializationFailed(format!("journald: {e}")))?
        .with_syslog_identifier("kubectl-pexec".to_string());
    try_install(registry.with(layer))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald<S>(_registry: S) -> Result<(), LoggerError> {
    Err(LoggerError::JournaldNotSupported)
}
