//! Beta-distribution posterior math shared by the confidence scorer and the
//! convention classifier.

use statrs::distribution::{Beta, ContinuousCDF};

/// Posterior mean of Beta(alpha, beta): alpha / (alpha + beta).
///
/// Defined whenever alpha + beta > 0, which always holds for a Beta(1,1)
/// prior plus non-negative observation counts.
pub fn posterior_mean(alpha: f64, beta: f64) -> f64 {
    if alpha + beta <= 0.0 {
        return 0.5;
    }
    alpha / (alpha + beta)
}

/// 95% central credible interval [BetaInverseCDF(0.025), BetaInverseCDF(0.975)].
///
/// Falls back to the full [0, 1] interval if the Beta distribution cannot be
/// constructed (non-positive shape parameters).
pub fn credible_interval_95(alpha: f64, beta: f64) -> (f64, f64) {
    match Beta::new(alpha.max(f64::MIN_POSITIVE), beta.max(f64::MIN_POSITIVE)) {
        Ok(dist) => (dist.inverse_cdf(0.025), dist.inverse_cdf(0.975)),
        Err(_) => (0.0, 1.0),
    }
}

/// Width of the 95% credible interval — the engine's primary uncertainty signal.
pub fn credible_interval_width(alpha: f64, beta: f64) -> f64 {
    let (low, high) = credible_interval_95(alpha, beta);
    high - low
}
