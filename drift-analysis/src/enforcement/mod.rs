//! Turns detected patterns, learned conventions, and their outliers into
//! reportable violations and inconsistency findings.

pub mod rules;

pub use rules::{
    ConventionContext, EvaluationResult, InconsistencyFinding, OutlierLocation, PatternInfo,
    RulesEvaluator, RulesInput, Severity, Violation,
};
