//! Iterative Z-Score outlier detection.
//!
//! Standard method for n >= 30 approximately-normal data. Iterative: after
//! removing the most extreme outlier, the mean/stddev are recomputed so a
//! single huge outlier doesn't mask smaller ones sitting beneath its shadow.

use super::types::{DeviationScore, OutlierMethod, OutlierResult, SignificanceTier};

pub fn detect(values: &[f64], threshold: f64, max_iterations: usize) -> Vec<OutlierResult> {
    if values.len() < 3 {
        return Vec::new();
    }

    let mut excluded = vec![false; values.len()];
    let mut results = Vec::new();

    for _ in 0..max_iterations {
        let active: Vec<(usize, f64)> = values
            .iter()
            .enumerate()
            .filter(|(i, _)| !excluded[*i])
            .map(|(i, &v)| (i, v))
            .collect();

        if active.len() < 3 {
            break;
        }

        let n = active.len() as f64;
        let mean = active.iter().map(|(_, v)| v).sum::<f64>() / n;
        let variance = active.iter().map(|(_, v)| (v - mean).powi(2)).sum::<f64>() / n;
        let stddev = variance.sqrt();

        if stddev <= 0.0 {
            break;
        }

        let worst = active
            .iter()
            .map(|(i, v)| (*i, (v - mean) / stddev))
            .max_by(|a, b| a.1.abs().partial_cmp(&b.1.abs()).unwrap_or(std::cmp::Ordering::Equal));

        match worst {
            Some((idx, z)) if z.abs() > threshold => {
                let deviation = DeviationScore::new((z.abs() - threshold) / threshold);
                results.push(OutlierResult {
                    index: idx,
                    value: values[idx],
                    test_statistic: z,
                    deviation_score: deviation,
                    significance: SignificanceTier::from_deviation(deviation.value()),
                    method: OutlierMethod::ZScore,
                    is_outlier: true,
                });
                excluded[idx] = true;
            }
            _ => break,
        }
    }

    results
}
