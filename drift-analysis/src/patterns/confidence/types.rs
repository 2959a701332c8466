//! Confidence score, tier, and momentum — the output of the Bayesian scorer.

use drift_core::constants;

use super::beta;

/// Direction of a pattern's frequency trend between scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MomentumDirection {
    Rising,
    Stable,
    Falling,
}

/// Enforcement tier derived from the posterior mean and credible-interval width.
///
/// Maps to enforcement behavior: Established -> enforce, Emerging -> flag,
/// Tentative -> inform, Uncertain -> silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceTier {
    Established,
    Emerging,
    Tentative,
    Uncertain,
}

impl ConfidenceTier {
    /// Classify from posterior mean and 95% credible-interval width.
    pub fn classify(mean: f64, ci_width: f64) -> Self {
        if mean > constants::ESTABLISHED_MEAN && ci_width < constants::ESTABLISHED_CI_WIDTH {
            Self::Established
        } else if mean > constants::EMERGING_MEAN && ci_width < constants::EMERGING_CI_WIDTH {
            Self::Emerging
        } else if mean > constants::TENTATIVE_MEAN && ci_width < constants::TENTATIVE_CI_WIDTH {
            Self::Tentative
        } else {
            Self::Uncertain
        }
    }
}

/// The scorer's full output for one pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceScore {
    pub alpha: f64,
    pub beta: f64,
    pub posterior_mean: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    pub tier: ConfidenceTier,
    pub momentum: MomentumDirection,
    /// Final blended score in [0, 1]: posterior mean weighted by sample size,
    /// combined with the weighted factor score.
    pub score: f64,
    /// Backward-compatible v1 score, computed and persisted alongside `score`
    /// during the migration period.
    pub v1_score: f64,
}

impl ConfidenceScore {
    /// Construct directly from posterior parameters, defaulting the weighted
    /// factors to neutral values. Used where only the posterior/tier/momentum
    /// matter (convention classification, tests).
    pub fn from_params(alpha: f64, beta: f64, momentum: MomentumDirection) -> Self {
        let mean = beta::posterior_mean(alpha, beta);
        let (ci_low, ci_high) = beta::credible_interval_95(alpha, beta);
        let tier = ConfidenceTier::classify(mean, ci_high - ci_low);
        Self {
            alpha,
            beta,
            posterior_mean: mean,
            ci_low,
            ci_high,
            tier,
            momentum,
            score: mean,
            v1_score: mean,
        }
    }

    /// Beta(1,1) uniform prior with no evidence: mean 0.5, maximally wide
    /// interval, Uncertain tier.
    pub fn uniform_prior() -> Self {
        Self::from_params(
            constants::PRIOR_ALPHA,
            constants::PRIOR_BETA,
            MomentumDirection::Stable,
        )
    }

    /// Width of the 95% credible interval.
    pub fn ci_width(&self) -> f64 {
        self.ci_high - self.ci_low
    }

    /// A [0, 1] convergence signal: 1.0 when the credible interval has fully
    /// collapsed, 0.0 at the maximally-wide uniform-prior interval.
    pub fn convergence_score(&self) -> f64 {
        (1.0 - self.ci_width()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_prior_is_uncertain() {
        let score = ConfidenceScore::uniform_prior();
        assert_eq!(score.tier, ConfidenceTier::Uncertain);
        assert!((score.posterior_mean - 0.5).abs() < 1e-9);
    }

    #[test]
    fn strong_evidence_high_mean_is_established() {
        let score = ConfidenceScore::from_params(200.0, 10.0, MomentumDirection::Stable);
        assert_eq!(score.tier, ConfidenceTier::Established);
    }

    #[test]
    fn convergence_score_narrow_for_strong_evidence() {
        let score = ConfidenceScore::from_params(200.0, 10.0, MomentumDirection::Stable);
        assert!(score.convergence_score() > 0.8);
    }
}
