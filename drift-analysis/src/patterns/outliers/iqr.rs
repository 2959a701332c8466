//! Interquartile-range (Tukey fence) outlier detection.
//!
//! Robust to skewed, non-normal data — the primary method selected for
//! large non-normal samples.

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

pub fn detect(values: &[f64], multiplier: f64) -> Vec<OutlierResult> {
    if values.len() < 4 {
        return Vec::new();
    }

    let mut sorted: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile(&sorted, 0.25);
    let q3 = percentile(&sorted, 0.75);
    let iqr = q3 - q1;

    if iqr <= 0.0 {
        return Vec::new();
    }

    let lower = q1 - multiplier * iqr;
    let upper = q3 + multiplier * iqr;

    let mut results = Vec::new();
    for &(idx, val) in &sorted {
        if val < lower || val > upper {
            let fence_distance = if val < lower { lower - val } else { val - upper };
            let deviation = DeviationScore::new(fence_distance / iqr);
            results.push(OutlierResult {
                index: idx,
                value: val,
                test_statistic: fence_distance / iqr,
                deviation_score: deviation,
                significance: SignificanceTier::from_deviation(deviation.value()),
                method: OutlierMethod::Iqr,
                is_outlier: true,
            });
        }
    }
    results
}

/// Linear-interpolation percentile over an already-sorted (index, value) slice.
fn percentile(sorted: &[(usize, f64)], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0].1;
    }
    let rank = p * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo].1
    } else {
        let frac = rank - lo as f64;
        sorted[lo].1 + frac * (sorted[hi].1 - sorted[lo].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_outliers_in_tight_cluster() {
        let values: Vec<f64> = (0..40).map(|i| 0.8 + (i as f64 % 5.0) * 0.01).collect();
        assert!(detect(&values, 1.5).is_empty());
    }

    #[test]
    fn flags_value_outside_fence() {
        let mut values = vec![1.0; 40];
        values[0] = 1000.0;
        let results = detect(&values, 1.5);
        assert!(!results.is_empty());
    }

    #[test]
    fn too_few_values_returns_empty() {
        assert!(detect(&[1.0, 2.0, 3.0], 1.5).is_empty());
    }
}
