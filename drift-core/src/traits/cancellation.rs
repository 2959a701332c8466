//! Cooperative cancellation for long-running scans.
//!
//! A `CancellationToken` wraps the process-wide monotonic revision counter:
//! requesting a new analysis bumps the revision, and any in-flight pipeline
//! observes a stale revision and unwinds at its next poll point (between
//! files, and between recursive descents in the visitor engine).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct CancellationToken {
    inner: Arc<AtomicU64>,
    observed: u64,
}

impl CancellationToken {
    /// Creates a token bound to the current revision of `counter`.
    pub fn new(counter: Arc<AtomicU64>) -> Self {
        let observed = counter.load(Ordering::Acquire);
        Self {
            inner: counter,
            observed,
        }
    }

    /// True once the shared revision counter has advanced past the revision
    /// this token was created with.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Acquire) != self.observed
    }

    /// Bumps the shared revision counter, cancelling every token created
    /// against the previous revision.
    pub fn cancel(counter: &Arc<AtomicU64>) {
        counter.fetch_add(1, Ordering::AcqRel);
    }
}
