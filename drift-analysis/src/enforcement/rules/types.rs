//! Types shared by the rules evaluator: the violation model, its severity
//! scale, and the inputs an evaluation pass consumes.

use crate::patterns::confidence::types::MomentumDirection;
use crate::patterns::learning::types::ConventionCategory;

/// Violation severity, ordered low to high for dedup and downgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Hint,
    Info,
    Warning,
    Error,
}

/// One flagged location, paired with its pattern by `RulesEvaluator`.
#[derive(Debug, Clone)]
pub struct OutlierLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub message: String,
    pub deviation_score: f64,
    pub expected_value: Option<String>,
    pub actual_value: Option<String>,
}

/// The learned-convention context behind a convention-derived finding.
#[derive(Debug, Clone)]
pub struct ConventionContext {
    pub category: ConventionCategory,
    pub confidence: f64,
    pub trend: MomentumDirection,
}

/// One detected pattern and the outlier locations found for it in this scan.
#[derive(Debug, Clone)]
pub struct PatternInfo {
    pub pattern_id: String,
    pub detector_id: String,
    pub category: String,
    pub cwe_ids: Vec<u32>,
    pub outliers: Vec<OutlierLocation>,
    /// Set when this pattern's severity should derive from a learned
    /// convention's category rather than its CWE/category table.
    pub convention: Option<ConventionContext>,
}

/// Input to one evaluation pass.
#[derive(Debug, Clone, Default)]
pub struct RulesInput {
    pub patterns: Vec<PatternInfo>,
    /// `file:line:rule_id` keys from the previous baseline scan, used to
    /// flag violations that are new since then.
    pub baseline_violation_ids: std::collections::HashSet<String>,
}

/// A materialized violation: what gets persisted and reported.
#[derive(Debug, Clone)]
pub struct Violation {
    pub id: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub severity: Severity,
    pub pattern_id: String,
    pub rule_id: String,
    pub message: String,
    pub expected_value: Option<String>,
    pub actual_value: Option<String>,
    pub explanation: Option<String>,
    pub convention_category: Option<ConventionCategory>,
    pub convention_confidence: Option<f64>,
    pub convention_trend: Option<MomentumDirection>,
    /// Hints surfaced to an external AI-assistance layer; this engine never
    /// acts on them itself.
    pub ai_flag_hints: Vec<String>,
}

/// A contested convention observed where enforcement was skipped: two
/// values for the same key are close enough in frequency that neither
/// dominates.
#[derive(Debug, Clone)]
pub struct InconsistencyFinding {
    pub pattern_id: String,
    pub file: String,
    pub line: u32,
    pub message: String,
}

/// Violations plus the inconsistency findings produced where a contested
/// convention suppressed enforcement.
#[derive(Debug, Clone, Default)]
pub struct EvaluationResult {
    pub violations: Vec<Violation>,
    pub inconsistencies: Vec<InconsistencyFinding>,
}
