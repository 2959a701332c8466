//! `IDriftEnforcement` trait — violations (findings) and feedback events.
//!
//! Maps to `drift-storage/src/queries/enforcement.rs`.

use crate::errors::StorageError;
use std::sync::Arc;

// ─── Row Types ──────────────────────────────────────────────────────

/// A violation/finding: one detector observation that broke an established
/// convention, contract, or crypto rule in a specific file.
#[derive(Debug, Clone)]
pub struct ViolationRow {
    pub id: String,
    pub file: String,
    pub line: u32,
    pub column: Option<u32>,
    pub end_line: Option<u32>,
    pub end_column: Option<u32>,
    pub severity: String,
    pub pattern_id: String,
    pub rule_id: String,
    pub message: String,
    pub quick_fix_strategy: Option<String>,
    pub quick_fix_description: Option<String>,
    pub cwe_id: Option<u32>,
    pub owasp_category: Option<String>,
    pub suppressed: bool,
    pub is_new: bool,
}

/// A feedback event on a violation (Fixed/Useful/Ignored/Approved-deviation/NotUseful),
/// consumed by the confidence scorer's posterior adjustment.
#[derive(Debug, Clone)]
pub struct FeedbackRow {
    pub violation_id: String,
    pub pattern_id: String,
    pub detector_id: String,
    pub action: String,
    pub dismissal_reason: Option<String>,
    pub reason: Option<String>,
    pub author: Option<String>,
    pub created_at: u64,
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackStats {
    pub total_count: u32,
    pub fix_count: u32,
    pub dismiss_count: u32,
    pub suppress_count: u32,
    pub escalate_count: u32,
}

// ─── Trait ───────────────────────────────────────────────────────────

/// Enforcement storage operations: violations and the feedback events that
/// adjust their pattern's posterior.
pub trait IDriftEnforcement: Send + Sync {
    fn insert_violation(&self, v: &ViolationRow) -> Result<(), StorageError>;
    fn query_violations_by_file(&self, file: &str) -> Result<Vec<ViolationRow>, StorageError>;
    fn query_all_violations(&self) -> Result<Vec<ViolationRow>, StorageError>;

    fn insert_feedback(&self, f: &FeedbackRow) -> Result<(), StorageError>;
    fn query_feedback_by_detector(&self, detector_id: &str) -> Result<Vec<FeedbackRow>, StorageError>;
    fn query_feedback_by_pattern(&self, pattern_id: &str) -> Result<Vec<FeedbackRow>, StorageError>;
    fn query_feedback_adjustments(&self, pattern_id: &str) -> Result<Vec<(f64, f64)>, StorageError>;
    fn get_violation_pattern_id(&self, violation_id: &str) -> Result<Option<String>, StorageError>;
    fn query_feedback_stats(&self) -> Result<FeedbackStats, StorageError>;
    fn count_needs_review(&self) -> Result<u32, StorageError>;
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: IDriftEnforcement + ?Sized> IDriftEnforcement for Arc<T> {
    fn insert_violation(&self, v: &ViolationRow) -> Result<(), StorageError> { (**self).insert_violation(v) }
    fn query_violations_by_file(&self, f: &str) -> Result<Vec<ViolationRow>, StorageError> { (**self).query_violations_by_file(f) }
    fn query_all_violations(&self) -> Result<Vec<ViolationRow>, StorageError> { (**self).query_all_violations() }
    fn insert_feedback(&self, f: &FeedbackRow) -> Result<(), StorageError> { (**self).insert_feedback(f) }
    fn query_feedback_by_detector(&self, did: &str) -> Result<Vec<FeedbackRow>, StorageError> { (**self).query_feedback_by_detector(did) }
    fn query_feedback_by_pattern(&self, pid: &str) -> Result<Vec<FeedbackRow>, StorageError> { (**self).query_feedback_by_pattern(pid) }
    fn query_feedback_adjustments(&self, pid: &str) -> Result<Vec<(f64, f64)>, StorageError> { (**self).query_feedback_adjustments(pid) }
    fn get_violation_pattern_id(&self, vid: &str) -> Result<Option<String>, StorageError> { (**self).get_violation_pattern_id(vid) }
    fn query_feedback_stats(&self) -> Result<FeedbackStats, StorageError> { (**self).query_feedback_stats() }
    fn count_needs_review(&self) -> Result<u32, StorageError> { (**self).count_needs_review() }
}
