use std::{num::NonZeroUsize, time::Duration};

/// Limits applied to one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Upper bound on concurrently running executions.
    ///
    /// `None` starts every instance at once.
    pub max_concurrency: Option<NonZeroUsize>,
    /// Per-instance deadline; `None` waits for the remote command indefinitely.
    pub task_timeout: Option<Duration>,
}

impl DispatchConfig {
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = NonZeroUsize::new(limit);
        self
    }

    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }
}
