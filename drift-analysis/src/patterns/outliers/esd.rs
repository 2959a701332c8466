//! Generalized ESD (Extreme Studentized Deviate) test.
//!
//! Iteratively applies a Grubbs-style test up to `max_outliers` times,
//! recomputing mean/stddev on the shrinking active set each round, then
//! keeps only the prefix of rounds whose test statistic exceeded its
//! critical value (the standard "number of outliers" determination step).

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

pub fn detect(values: &[f64], max_outliers: usize, alpha: f64) -> Vec<OutlierResult> {
    let n = values.len();
    if n < 3 || max_outliers == 0 {
        return Vec::new();
    }

    let mut excluded = vec![false; n];
    let mut rounds: Vec<(usize, f64, f64, f64)> = Vec::new(); // (index, value, statistic, critical)

    for i in 0..max_outliers.min(n - 2) {
        let active: Vec<(usize, f64)> = values
            .iter()
            .enumerate()
            .filter(|(idx, _)| !excluded[*idx])
            .map(|(idx, &v)| (idx, v))
            .collect();

        let k = active.len();
        if k < 3 {
            break;
        }

        let mean = active.iter().map(|(_, v)| v).sum::<f64>() / k as f64;
        let variance = active.iter().map(|(_, v)| (v - mean).powi(2)).sum::<f64>() / k as f64;
        let stddev = variance.sqrt();
        if stddev <= 0.0 {
            break;
        }

        let (idx, deviation) = active
            .iter()
            .map(|(idx, v)| (*idx, (v - mean).abs()))
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap();

        let statistic = deviation / stddev;
        let critical = esd_critical_value(k, i, alpha);

        rounds.push((idx, values[idx], statistic, critical));
        excluded[idx] = true;
    }

    // The number of true outliers is the largest round index r such that
    // every round up to and including r exceeded its critical value.
    let mut last_significant = None;
    for (round_idx, &(_, _, statistic, critical)) in rounds.iter().enumerate() {
        if statistic > critical {
            last_significant = Some(round_idx);
        }
    }

    match last_significant {
        Some(last) => rounds[..=last]
            .iter()
            .map(|&(idx, value, statistic, critical)| {
                let deviation = DeviationScore::new((statistic - critical) / critical);
                OutlierResult {
                    index: idx,
                    value,
                    test_statistic: statistic,
                    deviation_score: deviation,
                    significance: SignificanceTier::from_deviation(deviation.value()),
                    method: OutlierMethod::GeneralizedEsd,
                    is_outlier: true,
                }
            })
            .collect(),
        None => Vec::new(),
    }
}

/// Critical value for ESD round `i` (0-indexed) out of `k` remaining active points.
fn esd_critical_value(k: usize, i: usize, alpha: f64) -> f64 {
    let kf = k as f64;
    let dof = (kf - i as f64 - 2.0).max(1.0);
    let t_dist = StudentsT::new(0.0, 1.0, dof).expect("valid degrees of freedom");
    let p = alpha / (2.0 * (kf - i as f64));
    let t = t_dist.inverse_cdf(1.0 - p);
    ((kf - i as f64 - 1.0) * t) / ((dof + t * t).sqrt() * (kf - i as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_outliers_in_uniform_data() {
        let values = vec![0.9; 25];
        assert!(detect(&values, 5, 0.05).is_empty());
    }

    #[test]
    fn flags_extreme_outliers() {
        let mut values = vec![10.0; 25];
        values[0] = 1000.0;
        values[1] = 900.0;
        let results = detect(&values, 5, 0.05);
        assert!(!results.is_empty());
    }

    #[test]
    fn zero_max_outliers_returns_empty() {
        let values = vec![10.0; 25];
        assert!(detect(&values, 0, 0.05).is_empty());
    }
}
