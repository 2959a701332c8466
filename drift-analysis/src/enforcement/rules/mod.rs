//! Evaluation of detected patterns into severity-ranked violations.

mod evaluator;
mod types;

pub use evaluator::RulesEvaluator;
pub use types::{
    ConventionContext, EvaluationResult, InconsistencyFinding, OutlierLocation, PatternInfo,
    RulesInput, Severity, Violation,
};
