//! `IDriftReader` trait — read-only bridge evidence interface.
//!
//! The bridge crate needs read-only access to drift.db for grounding evidence
//! collection. This trait replaces the `ATTACH DATABASE` pattern with a clean
//! abstraction that works for both SQLite (local) and Postgres (cloud).
//!
//! Maps 1:1 to `cortex-drift-bridge/src/query/drift_queries.rs`.

use crate::errors::StorageError;
use std::sync::Arc;

/// Read-only interface to drift.db for cross-DB evidence collection.
///
/// Each method corresponds to one evidence type in the bridge grounding system.
/// All methods are read-only — no writes allowed.
pub trait IDriftReader: Send + Sync {
    /// Get the posterior mean confidence for a pattern.
    fn pattern_confidence(&self, pattern_id: &str) -> Result<Option<f64>, StorageError>;

    /// Get the occurrence rate for a pattern (detection count / file count).
    fn pattern_occurrence_rate(&self, pattern_id: &str) -> Result<Option<f64>, StorageError>;

    /// Get the false positive rate for a pattern (dismiss count / total feedback).
    fn false_positive_rate(&self, pattern_id: &str) -> Result<Option<f64>, StorageError>;

    /// Get the tracked confidence for a contract.
    fn contract_confidence(&self, contract_id: &str) -> Result<Option<f64>, StorageError>;

    /// Get the crypto health score for files matching a prefix (0.0-1.0).
    fn crypto_health(&self, file_prefix: &str) -> Result<Option<f64>, StorageError>;

    /// Count how many of the given pattern IDs exist in the confidence table.
    fn count_matching_patterns(&self, pattern_ids: &[String]) -> Result<u32, StorageError>;

    /// Get the latest scan timestamp as an ISO 8601 string.
    fn latest_scan_timestamp(&self) -> Result<Option<String>, StorageError>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: IDriftReader + ?Sized> IDriftReader for Arc<T> {
    fn pattern_confidence(&self, pid: &str) -> Result<Option<f64>, StorageError> {
        (**self).pattern_confidence(pid)
    }
    fn pattern_occurrence_rate(&self, pid: &str) -> Result<Option<f64>, StorageError> {
        (**self).pattern_occurrence_rate(pid)
    }
    fn false_positive_rate(&self, pid: &str) -> Result<Option<f64>, StorageError> {
        (**self).false_positive_rate(pid)
    }
    fn contract_confidence(&self, cid: &str) -> Result<Option<f64>, StorageError> {
        (**self).contract_confidence(cid)
    }
    fn crypto_health(&self, file_prefix: &str) -> Result<Option<f64>, StorageError> {
        (**self).crypto_health(file_prefix)
    }
    fn count_matching_patterns(&self, pids: &[String]) -> Result<u32, StorageError> {
        (**self).count_matching_patterns(pids)
    }
    fn latest_scan_timestamp(&self) -> Result<Option<String>, StorageError> {
        (**self).latest_scan_timestamp()
    }
}
