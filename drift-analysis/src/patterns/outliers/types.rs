//! Shared types for outlier detection across all statistical methods.

use std::fmt;

/// Which statistical method flagged a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlierMethod {
    ZScore,
    Grubbs,
    GeneralizedEsd,
    Iqr,
    Mad,
    RuleBased,
}

/// A normalized deviation magnitude, always >= 0.
///
/// Not a raw test statistic — callers normalize each method's statistic
/// against its own threshold so different methods are comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationScore(f64);

impl DeviationScore {
    pub fn new(value: f64) -> Self {
        Self(value.max(0.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// How significant a flagged outlier is, for downstream triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignificanceTier {
    Low,
    Moderate,
    High,
    Critical,
}

impl SignificanceTier {
    /// Derive a tier from a normalized deviation score.
    pub fn from_deviation(deviation: f64) -> Self {
        if deviation >= 2.0 {
            Self::Critical
        } else if deviation >= 1.0 {
            Self::High
        } else if deviation >= 0.3 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// One detected outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierResult {
    /// Index into the input slice.
    pub index: usize,
    /// The flagged value.
    pub value: f64,
    /// The method's raw test statistic (Z-score, modified Z-score, G, etc.).
    pub test_statistic: f64,
    /// Normalized deviation magnitude, comparable across methods.
    pub deviation_score: DeviationScore,
    /// Triage tier derived from the deviation score.
    pub significance: SignificanceTier,
    /// Which method produced this result.
    pub method: OutlierMethod,
    /// Always true for entries in a result list; kept for call-site clarity
    /// when results are merged with non-outlier rows elsewhere.
    pub is_outlier: bool,
}

/// Tunable thresholds for the auto-selecting outlier detector.
#[derive(Debug, Clone)]
pub struct OutlierConfig {
    /// Below this sample size, only rule-based detection runs.
    pub min_sample_size: usize,
    /// Z-Score threshold (number of standard deviations).
    pub z_threshold: f64,
    /// Max iterations for iterative Z-Score outlier removal.
    pub max_iterations: usize,
    /// Significance level for Grubbs' test and Generalized ESD.
    pub alpha: f64,
    /// IQR multiplier (1.5 = standard Tukey fence).
    pub iqr_multiplier: f64,
    /// Modified Z-Score (MAD-based) threshold.
    pub mad_threshold: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            min_sample_size: 10,
            z_threshold: 3.0,
            max_iterations: 5,
            alpha: 0.05,
            iqr_multiplier: 1.5,
            mad_threshold: 3.5,
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ZScore => "z_score",
            Self::Grubbs => "grubbs",
            Self::GeneralizedEsd => "generalized_esd",
            Self::Iqr => "iqr",
            Self::Mad => "mad",
            Self::RuleBased => "rule_based",
        };
        f.write_str(name)
    }
}
