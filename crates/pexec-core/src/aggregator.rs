use std::time::Duration;

use pexec_model::{ExecutionResult, RunSummary};
use tokio::time::Instant;

/// Merge per-instance results into a [`RunSummary`], measuring elapsed time from `started`.
pub fn summarize(results: &[ExecutionResult], started: Instant) -> RunSummary {
    summarize_elapsed(results, started.elapsed())
}

/// Merge per-instance results with an already measured `elapsed`.
///
/// Failed names keep the order of `results`, i.e. completion order.
pub fn summarize_elapsed(results: &[ExecutionResult], elapsed: Duration) -> RunSummary {
    let failed_instance_names: Vec<String> = results
        .iter()
        .filter(|r| !r.succeeded)
        .map(|r| r.instance_name.clone())
        .collect();
    let total = results.len();
    let failed = failed_instance_names.len();

    RunSummary {
        total,
        succeeded: total - failed,
        failed,
        failed_instance_names,
        elapsed,
    }
}
