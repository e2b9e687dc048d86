//! Presentation of a [`RunSummary`]; aggregation stays unaware of output formats.

use pexec_model::RunSummary;
use tracing::warn;

const GREEN_BOLD: &str = "\x1b[1;32m";
const RED_BOLD: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[0m";

/// Turns a summary into the text printed at the end of a run.
pub trait SummaryRenderer: Send + Sync {
    fn render(&self, summary: &RunSummary) -> String;
}

/// One-line human readable summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    pub color: bool,
}

impl TextRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn line(summary: &RunSummary) -> String {
        format!(
            "All pods execution done in {:.3}s. Success: {}, Fail: {}, Failed pods: [{}]",
            summary.elapsed.as_secs_f64(),
            summary.succeeded,
            summary.failed,
            summary.failed_instance_names.join(" "),
        )
    }
}

impl SummaryRenderer for TextRenderer {
    fn render(&self, summary: &RunSummary) -> String {
        let line = Self::line(summary);
        if !self.color {
            return line;
        }
        let color = if summary.has_failures() {
            RED_BOLD
        } else {
            GREEN_BOLD
        };
        format!("{color}{line}{RESET}")
    }
}

/// Machine readable summary as a single-line JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl SummaryRenderer for JsonRenderer {
    fn render(&self, summary: &RunSummary) -> String {
        serde_json::to_string(summary).unwrap_or_else(|e| {
            warn!(target: "pexec.core.render", error = %e, "json rendering failed; falling back to text");
            TextRenderer::line(summary)
        })
    }
}
