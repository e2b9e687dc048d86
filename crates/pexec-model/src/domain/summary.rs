use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Aggregated outcome of one run.
///
/// `succeeded + failed == total` holds for every summary built by the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Names of failed instances in completion order.
    pub failed_instance_names: Vec<String>,
    #[serde(with = "crate::domain::secs_f64")]
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
