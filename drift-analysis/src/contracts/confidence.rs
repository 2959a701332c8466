//! Seven-signal contract confidence: weighted combination with exponential
//! decay since the contract was last verified.

use super::types::ConfidenceSignals;

const WEIGHT_MATCH: f64 = 0.25;
const WEIGHT_EXTRACTION: f64 = 0.20;
const WEIGHT_SOURCE_QUALITY: f64 = 0.20;
const WEIGHT_TEST_COVERAGE: f64 = 0.10;
const WEIGHT_HISTORICAL_STABILITY: f64 = 0.10;
const WEIGHT_USAGE_FREQUENCY: f64 = 0.05;
const WEIGHT_CROSS_VALIDATION: f64 = 0.10;

const DECAY_RATE: f64 = 0.01;
const NEVER_VERIFIED_PENALTY: f64 = 0.05;

/// Combine the seven signals and apply verification-age decay.
pub fn compute(signals: &ConfidenceSignals) -> f64 {
    let combined = WEIGHT_MATCH * signals.match_confidence
        + WEIGHT_EXTRACTION * signals.extraction_confidence
        + WEIGHT_SOURCE_QUALITY * signals.source_quality
        + WEIGHT_TEST_COVERAGE * signals.test_coverage
        + WEIGHT_HISTORICAL_STABILITY * signals.historical_stability
        + WEIGHT_USAGE_FREQUENCY * signals.usage_frequency
        + WEIGHT_CROSS_VALIDATION * signals.cross_validation;

    match signals.days_since_last_verified {
        Some(days) => combined * (-DECAY_RATE * days).exp(),
        None => combined * (1.0 - NEVER_VERIFIED_PENALTY),
    }
    .clamp(0.0, 1.0)
}
