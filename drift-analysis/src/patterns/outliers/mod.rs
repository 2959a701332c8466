//! Statistical outlier detection over per-pattern confidence values.
//!
//! Auto-selects a primary method by sample size and normality, cross-checks
//! with supplementary methods, and always runs the domain-specific rules.
//! See [`selector::OutlierDetector`].

pub mod esd;
pub mod grubbs;
pub mod iqr;
pub mod mad;
pub mod rule_based;
pub mod selector;
pub mod types;
pub mod zscore;

pub use selector::{OutlierDetector, OutlierDiagnostics};
pub use types::{
    DeviationScore, OutlierConfig, OutlierMethod, OutlierResult, SignificanceTier,
};
