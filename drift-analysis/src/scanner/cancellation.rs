//! Scan-level cancellation flag, shared with the parallel walker.

use std::sync::atomic::{AtomicBool, Ordering};

/// A resettable cancellation flag for a single scan invocation.
///
/// Distinct from `drift_core::traits::CancellationToken` (which guards
/// analysis-phase work against a monotonic revision counter): this one is
/// scoped to a single `Scanner::scan` call and is reset at the start of
/// each scan rather than superseded by a new revision.
#[derive(Debug, Default)]
pub struct ScanCancellation {
    flag: AtomicBool,
}

impl ScanCancellation {
    pub fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn as_atomic(&self) -> &AtomicBool {
        &self.flag
    }
}
