//! Five-factor weighted path similarity, used to match a code-first
//! operation against a specification-declared one when no exact path match
//! exists.

use std::collections::HashSet;

pub struct SimilarityWeights {
    pub jaccard: f64,
    pub segment_count: f64,
    pub suffix_match: f64,
    pub resource_name: f64,
    pub param_position: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        SimilarityWeights {
            jaccard: 0.30,
            segment_count: 0.15,
            suffix_match: 0.20,
            resource_name: 0.25,
            param_position: 0.10,
        }
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn is_param(segment: &str) -> bool {
    segment.starts_with(':')
}

fn jaccard_non_param_segments(a: &[&str], b: &[&str]) -> f64 {
    let sa: HashSet<&str> = a.iter().copied().filter(|s| !is_param(s)).collect();
    let sb: HashSet<&str> = b.iter().copied().filter(|s| !is_param(s)).collect();
    if sa.is_empty() && sb.is_empty() {
        return 1.0;
    }
    let intersection = sa.intersection(&sb).count() as f64;
    let union = sa.union(&sb).count() as f64;
    if union == 0.0 { 0.0 } else { intersection / union }
}

fn segment_count_similarity(a: &[&str], b: &[&str]) -> f64 {
    let (la, lb) = (a.len() as f64, b.len() as f64);
    if la == 0.0 && lb == 0.0 {
        return 1.0;
    }
    1.0 - (la - lb).abs() / la.max(lb)
}

fn suffix_match_score(a: &[&str], b: &[&str]) -> f64 {
    let mut matched = 0;
    for (sa, sb) in a.iter().rev().zip(b.iter().rev()) {
        if sa == sb || (is_param(sa) && is_param(sb)) {
            matched += 1;
        } else {
            break;
        }
    }
    let max_len = a.len().max(b.len()).max(1);
    matched as f64 / max_len as f64
}

fn resource_name_equality(a: &[&str], b: &[&str]) -> f64 {
    let last_non_param = |segs: &[&str]| segs.iter().rev().find(|s| !is_param(s)).copied();
    match (last_non_param(a), last_non_param(b)) {
        (Some(x), Some(y)) if x == y => 1.0,
        _ => 0.0,
    }
}

fn param_position_alignment(a: &[&str], b: &[&str]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    if a.is_empty() {
        return 1.0;
    }
    let aligned = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| is_param(x) == is_param(y))
        .count();
    aligned as f64 / a.len() as f64
}

/// Score the similarity between two normalized paths. Exact matches
/// short-circuit to 1.0.
pub fn similarity(a: &str, b: &str, weights: &SimilarityWeights) -> f64 {
    if a == b {
        return 1.0;
    }

    let sa = segments(a);
    let sb = segments(b);

    weights.jaccard * jaccard_non_param_segments(&sa, &sb)
        + weights.segment_count * segment_count_similarity(&sa, &sb)
        + weights.suffix_match * suffix_match_score(&sa, &sb)
        + weights.resource_name * resource_name_equality(&sa, &sb)
        + weights.param_position * param_position_alignment(&sa, &sb)
}
