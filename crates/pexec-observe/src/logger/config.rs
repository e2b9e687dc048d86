use std::io::IsTerminal;

use crate::logger::format::LoggerFormat;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `warn` or `pexec=debug,kube=info`.
    pub level: String,
    pub with_targets: bool,
    /// ANSI colors for the text format.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: "warn".to_string(),
            with_targets: true,
            use_color: std::io::stderr().is_terminal(),
        }
    }
}
