//! Convention promotion — moving a discovered convention to `Approved` once
//! it has enough file spread and confidence to be safely enforced.

use std::collections::HashMap;

use drift_core::constants;

use super::types::{Convention, PromotionStatus};

#[derive(Debug, Clone)]
pub struct PromotionConfig {
    pub min_files: u64,
    pub min_confidence: f64,
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self {
            min_files: constants::ENFORCEMENT_MIN_FILES as u64,
            min_confidence: constants::ENFORCEMENT_MIN_CONFIDENCE,
        }
    }
}

/// Whether `convention` qualifies for promotion given its file spread.
///
/// `file_spread` is supplied by the caller (from the aggregation pass) since
/// `Convention` itself does not retain per-scan location data.
pub fn check_promotion(
    convention: &Convention,
    config: &PromotionConfig,
    file_spread: Option<u64>,
) -> bool {
    if convention.promotion_status != PromotionStatus::Discovered {
        return false;
    }
    let spread_ok = file_spread.is_some_and(|f| f >= config.min_files);
    let confidence_ok = convention.confidence_score.posterior_mean >= config.min_confidence;
    spread_ok && confidence_ok
}

/// Promote every eligible convention in place. Returns the number promoted.
pub fn promote_batch_with_spread(
    conventions: &mut [Convention],
    config: &PromotionConfig,
    spread_map: &HashMap<String, u64>,
) -> usize {
    let mut promoted = 0;
    for convention in conventions.iter_mut() {
        let spread = spread_map.get(&convention.pattern_id).copied();
        if check_promotion(convention, config, spread) {
            convention.promotion_status = PromotionStatus::Approved;
            promoted += 1;
        }
    }
    promoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::confidence::types::{ConfidenceScore, MomentumDirection};
    use crate::patterns::learning::types::{ConventionCategory, ConventionScope};

    fn make_convention(pattern_id: &str) -> Convention {
        Convention {
            id: format!("conv_{pattern_id}"),
            pattern_id: pattern_id.to_string(),
            category: ConventionCategory::ProjectSpecific,
            scope: ConventionScope::Project,
            confidence_score: ConfidenceScore::from_params(200.0, 10.0, MomentumDirection::Stable),
            dominance_ratio: 0.8,
            discovery_date: 1000,
            last_seen: 1000,
            promotion_status: PromotionStatus::Discovered,
            observation_count: 100,
            scan_count: 5,
        }
    }

    #[test]
    fn already_approved_not_reconsidered() {
        let mut conv = make_convention("a");
        conv.promotion_status = PromotionStatus::Approved;
        assert!(!check_promotion(&conv, &PromotionConfig::default(), Some(10)));
    }

    #[test]
    fn insufficient_spread_not_promoted() {
        let conv = make_convention("a");
        assert!(!check_promotion(&conv, &PromotionConfig::default(), Some(1)));
    }

    #[test]
    fn sufficient_spread_and_confidence_promoted() {
        let conv = make_convention("a");
        assert!(check_promotion(&conv, &PromotionConfig::default(), Some(10)));
    }
}
