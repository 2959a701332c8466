//! Domain-specific outlier rules — always active regardless of sample size.
//!
//! Unlike the statistical methods, these encode knowledge specific to
//! confidence-value distributions rather than generic distributional
//! assumptions, so they still fire on tiny samples where no statistical
//! test has enough power.

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

/// A named rule: given the full value slice, returns flagged indices.
pub struct OutlierRule {
    pub name: &'static str,
    check: Box<dyn Fn(&[f64]) -> Vec<(usize, f64)> + Send + Sync>,
}

impl OutlierRule {
    pub fn new(
        name: &'static str,
        check: impl Fn(&[f64]) -> Vec<(usize, f64)> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            check: Box::new(check),
        }
    }
}

/// Flags any exact-zero confidence value as a critical outlier.
pub fn zero_confidence_rule() -> OutlierRule {
    OutlierRule::new("zero_confidence", |values| {
        values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v <= 0.0)
            .map(|(i, &v)| (i, 1.0 - v))
            .collect()
    })
}

/// Flags a value that drops sharply (>0.5) below the median of the rest.
pub fn confidence_cliff_rule() -> OutlierRule {
    OutlierRule::new("confidence_cliff", |values| {
        if values.len() < 2 {
            return Vec::new();
        }
        let mut sorted: Vec<f64> = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = sorted[sorted.len() / 2];

        values
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| {
                let gap = median - v;
                if gap > 0.5 {
                    Some((i, gap))
                } else {
                    None
                }
            })
            .collect()
    })
}

/// Flags a value that is the sole representative of its bucket — i.e. no
/// other value within 0.05 — in a sample large enough for clustering to
/// be meaningful.
pub fn file_isolation_rule() -> OutlierRule {
    OutlierRule::new("file_isolation", |values| {
        if values.len() < 5 {
            return Vec::new();
        }
        values
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| {
                let neighbors = values
                    .iter()
                    .enumerate()
                    .filter(|(j, &w)| *j != i && (w - v).abs() <= 0.05)
                    .count();
                if neighbors == 0 {
                    Some((i, 1.0))
                } else {
                    None
                }
            })
            .collect()
    })
}

pub fn detect(values: &[f64], rules: &[OutlierRule]) -> Vec<OutlierResult> {
    let mut results = Vec::new();
    for rule in rules {
        for (idx, magnitude) in (rule.check)(values) {
            let deviation = DeviationScore::new(magnitude);
            results.push(OutlierResult {
                index: idx,
                value: values[idx],
                test_statistic: magnitude,
                deviation_score: deviation,
                significance: SignificanceTier::from_deviation(deviation.value()),
                method: OutlierMethod::RuleBased,
                is_outlier: true,
            });
        }
    }
    results
}
