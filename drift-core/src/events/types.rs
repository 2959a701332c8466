//! Event payload types emitted during a scan/analysis run.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ScanStartedEvent {
    pub root: PathBuf,
    pub file_count: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ScanProgressEvent {
    pub processed: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct ScanCompleteEvent {
    pub added: usize,
    pub modified: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct ScanErrorEvent {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct PatternDiscoveredEvent {
    pub pattern_id: String,
    pub category: String,
    pub confidence: f64,
}

#[derive(Debug, Clone)]
pub struct PatternApprovedEvent {
    pub pattern_id: String,
}

#[derive(Debug, Clone)]
pub struct PatternIgnoredEvent {
    pub pattern_id: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct PatternMergedEvent {
    pub kept_id: String,
    pub merged_id: String,
}

#[derive(Debug, Clone)]
pub struct ViolationDetectedEvent {
    pub violation_id: String,
    pub pattern_id: String,
    pub file: PathBuf,
    pub line: u32,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ViolationDismissedEvent {
    pub violation_id: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ViolationFixedEvent {
    pub violation_id: String,
}

#[derive(Debug, Clone)]
pub struct GateEvaluatedEvent {
    pub gate_name: String,
    pub passed: bool,
    pub score: Option<f64>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct RegressionDetectedEvent {
    pub pattern_id: String,
    pub previous_score: f64,
    pub current_score: f64,
}

#[derive(Debug, Clone)]
pub struct EnforcementChangedEvent {
    pub gate_name: String,
    pub old_level: String,
    pub new_level: String,
}

#[derive(Debug, Clone)]
pub struct ConstraintApprovedEvent {
    pub constraint_id: String,
}

#[derive(Debug, Clone)]
pub struct ConstraintViolatedEvent {
    pub constraint_id: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DecisionMinedEvent {
    pub decision_id: String,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct DecisionReversedEvent {
    pub decision_id: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct AdrDetectedEvent {
    pub adr_id: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct BoundaryDiscoveredEvent {
    pub boundary_id: String,
    pub orm: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct DetectorAlertEvent {
    pub detector_id: String,
    pub false_positive_rate: f64,
}

#[derive(Debug, Clone)]
pub struct DetectorDisabledEvent {
    pub detector_id: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct FeedbackAbuseDetectedEvent {
    pub user_id: String,
    pub pattern: String,
}

#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
