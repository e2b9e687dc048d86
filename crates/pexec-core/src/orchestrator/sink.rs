use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pexec_model::ExecutionResult;

/// Shared, append-only collection of per-instance results.
#[derive(Clone)]
pub(super) struct ResultSink {
    inner: Arc<Mutex<SinkInner>>,
}

struct SinkInner {
    results: Vec<ExecutionResult>,
    failed: usize,
}

impl ResultSink {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SinkInner {
                results: Vec::with_capacity(capacity),
                failed: 0,
            })),
        }
    }

    /// Append one result; the only operation that takes the lock.
    pub(super) fn record(&self, result: ExecutionResult) {
        let mut inner = self.lock();
        if !result.succeeded {
            inner.failed += 1;
        }
        inner.results.push(result);
    }

    /// Take the collected results and failure count.
    ///
    /// Must only be called after the completion barrier.
    pub(super) fn into_parts(self) -> (Vec<ExecutionResult>, usize) {
        let mut inner = self.lock();
        (std::mem::take(&mut inner.results), inner.failed)
    }

    fn lock(&self) -> MutexGuard<'_, SinkInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
