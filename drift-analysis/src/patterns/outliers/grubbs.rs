//! Grubbs' test — single-outlier detection for approximately-normal samples.
//!
//! Selected when 10 <= n < 30 and the data passes the normality check.

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

pub fn detect(values: &[f64], alpha: f64) -> Vec<OutlierResult> {
    let n = values.len();
    if n < 3 {
        return Vec::new();
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    let stddev = variance.sqrt();
    if stddev <= 0.0 {
        return Vec::new();
    }

    let (idx, worst_deviation) = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i, (v - mean).abs()))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap();

    let g = worst_deviation / stddev;
    let critical = critical_value(n, alpha);

    if g > critical {
        let deviation = DeviationScore::new((g - critical) / critical);
        vec![OutlierResult {
            index: idx,
            value: values[idx],
            test_statistic: g,
            deviation_score: deviation,
            significance: SignificanceTier::from_deviation(deviation.value()),
            method: OutlierMethod::Grubbs,
            is_outlier: true,
        }]
    } else {
        Vec::new()
    }
}

/// Grubbs' critical value: G_crit = (n-1)/sqrt(n) * sqrt(t^2 / (n-2+t^2)),
/// where t is the upper-(alpha/2n) critical value of the t-distribution
/// with n-2 degrees of freedom.
fn critical_value(n: usize, alpha: f64) -> f64 {
    let nf = n as f64;
    let dof = (nf - 2.0).max(1.0);
    let t_dist = StudentsT::new(0.0, 1.0, dof).expect("valid degrees of freedom");
    let p = alpha / (2.0 * nf);
    let t = t_dist.inverse_cdf(1.0 - p);
    ((nf - 1.0) / nf.sqrt()) * (t * t / (dof + t * t)).sqrt()
}
