//! Bayesian confidence scorer — blends a pattern's Beta-Binomial posterior
//! with weighted frequency/consistency/age/spread/momentum factors.

use drift_core::constants;

use crate::patterns::aggregation::types::AggregatedPattern;

use super::beta;
use super::types::{ConfidenceScore, ConfidenceTier, MomentumDirection};

/// A closed-loop feedback source: per-pattern (alpha_delta, beta_delta)
/// adjustments accumulated from Fixed/Useful/Ignored/Approved-deviation/NotUseful
/// actions, applied to the posterior before scoring.
pub trait FeedbackStore: Send + Sync {
    fn adjustments_for(&self, pattern_id: &str) -> (f64, f64);
}

/// Tunable weights for the confidence scorer. Defaults match the engine's
/// documented factor weights.
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    pub weight_frequency: f64,
    pub weight_consistency: f64,
    pub weight_age: f64,
    pub weight_spread: f64,
    pub weight_momentum: f64,
    pub min_age_factor: f64,
    pub max_age_days: f64,
    pub posterior_half_saturation: f64,
    pub posterior_weight_cap: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            weight_frequency: constants::WEIGHT_FREQUENCY,
            weight_consistency: constants::WEIGHT_CONSISTENCY,
            weight_age: constants::WEIGHT_AGE,
            weight_spread: constants::WEIGHT_SPREAD,
            weight_momentum: constants::WEIGHT_MOMENTUM,
            min_age_factor: constants::MIN_AGE_FACTOR,
            max_age_days: constants::MAX_AGE_DAYS,
            posterior_half_saturation: constants::POSTERIOR_HALF_SATURATION,
            posterior_weight_cap: constants::POSTERIOR_WEIGHT_CAP,
        }
    }
}

/// Computes blended confidence scores for aggregated patterns.
pub struct ConfidenceScorer {
    config: ScorerConfig,
    feedback_store: Option<Box<dyn FeedbackStore>>,
}

impl ConfidenceScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self {
            config,
            feedback_store: None,
        }
    }

    /// Attach a feedback store for closed-loop posterior adjustment.
    pub fn with_feedback_store(mut self, store: Box<dyn FeedbackStore>) -> Self {
        self.feedback_store = Some(store);
        self
    }

    /// Score a single aggregated pattern.
    ///
    /// `momentum`: precomputed trend direction (the caller owns scan-history
    /// tracking; this scorer is stateless per call).
    /// `days_since_first_seen`: age in days, drives the age factor.
    /// `category_total`: total location count across the pattern's category,
    /// for the frequency factor; `None` treats the pattern as its own category.
    /// `previous_frequency`: prior scan's frequency, for age-factor decay when
    /// frequency has declined between scans.
    pub fn score(
        &self,
        pattern: &AggregatedPattern,
        momentum: MomentumDirection,
        days_since_first_seen: u64,
        category_total: Option<u64>,
        previous_frequency: Option<f64>,
    ) -> ConfidenceScore {
        let total_files = category_total.unwrap_or(pattern.location_count as u64).max(1);
        let frequency = pattern.location_count as f64 / total_files as f64;

        let variance = pattern.confidence_stddev.powi(2);
        let consistency = 1.0 - variance.clamp(0.0, 1.0);

        let age_factor = self.age_factor(days_since_first_seen, frequency, previous_frequency);

        let spread = if pattern.location_count > 0 {
            pattern.file_spread as f64 / pattern.location_count.max(1) as f64
        } else {
            0.0
        };

        let momentum_value = match momentum {
            MomentumDirection::Rising => 1.0,
            MomentumDirection::Stable => 0.0,
            MomentumDirection::Falling => -1.0,
        };

        let weighted = self.config.weight_frequency * frequency
            + self.config.weight_consistency * consistency
            + self.config.weight_age * age_factor
            + self.config.weight_spread * spread
            + self.config.weight_momentum * ((momentum_value + 1.0) / 2.0);

        let (alpha_delta, beta_delta) = self
            .feedback_store
            .as_ref()
            .map(|s| s.adjustments_for(&pattern.pattern_id))
            .unwrap_or((0.0, 0.0));

        let alpha = constants::PRIOR_ALPHA + pattern.location_count as f64 + alpha_delta;
        let beta_param = constants::PRIOR_BETA + pattern.outlier_count as f64 + beta_delta;

        let posterior = beta::posterior_mean(alpha, beta_param);
        let (ci_low, ci_high) = beta::credible_interval_95(alpha, beta_param);
        let ci_width = ci_high - ci_low;

        let n_effective = (alpha + beta_param - 2.0).max(0.0);
        let posterior_weight = (n_effective / (n_effective + self.config.posterior_half_saturation))
            .min(self.config.posterior_weight_cap);

        let score = (posterior * posterior_weight + weighted * (1.0 - posterior_weight)).clamp(0.0, 1.0);

        let v1_score = constants::V1_WEIGHT_FREQUENCY * frequency
            + constants::V1_WEIGHT_CONSISTENCY * consistency
            + constants::V1_WEIGHT_AGE * age_factor
            + constants::V1_WEIGHT_SPREAD * spread;

        ConfidenceScore {
            alpha,
            beta: beta_param,
            posterior_mean: posterior,
            ci_low,
            ci_high,
            tier: ConfidenceTier::classify(posterior, ci_width),
            momentum,
            score,
            v1_score: v1_score.clamp(0.0, 1.0),
        }
    }

    /// Score every pattern in a batch.
    pub fn score_batch(
        &self,
        patterns: &[AggregatedPattern],
        momentum: MomentumDirection,
        days_since_first_seen: u64,
    ) -> Vec<(String, ConfidenceScore)> {
        patterns
            .iter()
            .map(|p| {
                (
                    p.pattern_id.clone(),
                    self.score(p, momentum, days_since_first_seen, None, None),
                )
            })
            .collect()
    }

    /// Linear age factor from `min_age_factor` at day 0 to 1.0 at `max_age_days`,
    /// multiplicatively decayed by current/previous frequency when frequency
    /// has declined between scans (no decay if stable or rising).
    fn age_factor(&self, days: u64, current_freq: f64, previous_freq: Option<f64>) -> f64 {
        let linear = self.config.min_age_factor
            + (1.0 - self.config.min_age_factor)
                * (days as f64 / self.config.max_age_days).clamp(0.0, 1.0);

        match previous_freq {
            Some(prev) if prev > 0.0 && current_freq < prev => linear * (current_freq / prev),
            _ => linear,
        }
    }
}
