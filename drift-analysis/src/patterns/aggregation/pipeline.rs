//! Aggregation pipeline — collapses raw per-match pattern observations from a
//! scan into one `AggregatedPattern` per pattern ID, computing location spread,
//! confidence statistics, and merge candidates for near-duplicate pattern IDs.

use std::collections::HashMap;

use crate::engine::types::PatternMatch;

use super::types::{
    AggregatedPattern, AggregationConfig, MergeCandidate, MergeDecision, PatternLocation,
};

/// Output of a single aggregation run.
#[derive(Debug, Clone, Default)]
pub struct AggregationResult {
    pub patterns: Vec<AggregatedPattern>,
    pub merge_candidates: Vec<MergeCandidate>,
}

/// Collapses raw `PatternMatch` observations into `AggregatedPattern`s.
pub struct AggregationPipeline {
    config: AggregationConfig,
}

impl AggregationPipeline {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(AggregationConfig::default())
    }

    /// Aggregate raw matches into per-pattern-id summaries.
    pub fn run(&self, matches: &[PatternMatch]) -> AggregationResult {
        let mut by_pattern: HashMap<String, Vec<&PatternMatch>> = HashMap::new();
        for m in matches {
            by_pattern.entry(m.pattern_id.clone()).or_default().push(m);
        }

        let mut patterns: Vec<AggregatedPattern> = by_pattern
            .into_iter()
            .map(|(pattern_id, group)| self.aggregate_one(pattern_id, group))
            .collect();
        patterns.sort_by(|a, b| a.pattern_id.cmp(&b.pattern_id));

        let merge_candidates = self.find_merge_candidates(&patterns);

        AggregationResult {
            patterns,
            merge_candidates,
        }
    }

    fn aggregate_one(&self, pattern_id: String, group: Vec<&PatternMatch>) -> AggregatedPattern {
        let category = group[0].category;

        let mut locations: Vec<PatternLocation> = group
            .iter()
            .map(|m| PatternLocation {
                file: m.file.clone(),
                line: m.line,
                column: m.column,
                confidence: m.confidence,
                is_outlier: false,
                matched_text: if m.matched_text.is_empty() {
                    None
                } else {
                    Some(m.matched_text.clone())
                },
            })
            .collect();
        locations.truncate(self.config.max_locations_per_pattern);

        let mut files: Vec<&str> = group.iter().map(|m| m.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();

        let mut confidence_values: Vec<f64> =
            group.iter().map(|m| m.confidence as f64).collect();
        confidence_values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = confidence_values.len().max(1) as f64;
        let confidence_mean = confidence_values.iter().sum::<f64>() / n;
        let variance = confidence_values
            .iter()
            .map(|c| (c - confidence_mean).powi(2))
            .sum::<f64>()
            / n;
        let confidence_stddev = variance.sqrt();

        let location_hash = hash_locations(&locations);

        AggregatedPattern {
            pattern_id,
            category,
            location_count: group.len() as u32,
            outlier_count: 0,
            file_spread: files.len() as u32,
            hierarchy: None,
            locations,
            aliases: Vec::new(),
            merged_from: Vec::new(),
            confidence_mean,
            confidence_stddev,
            confidence_values,
            is_dirty: true,
            location_hash,
        }
    }

    /// Find pairs of patterns whose file sets are similar enough to be
    /// candidates for deduplication (same underlying convention, different ID).
    fn find_merge_candidates(&self, patterns: &[AggregatedPattern]) -> Vec<MergeCandidate> {
        let mut candidates = Vec::new();
        for i in 0..patterns.len() {
            for j in (i + 1)..patterns.len() {
                let a = &patterns[i];
                let b = &patterns[j];
                let similarity = jaccard_file_similarity(a, b);
                if similarity >= self.config.duplicate_flag_threshold {
                    candidates.push(MergeCandidate {
                        pattern_a: a.pattern_id.clone(),
                        pattern_b: b.pattern_id.clone(),
                        similarity,
                        decision: MergeDecision::from_similarity(similarity),
                    });
                }
            }
        }
        candidates
    }
}

fn jaccard_file_similarity(a: &AggregatedPattern, b: &AggregatedPattern) -> f64 {
    let files_a: std::collections::HashSet<&str> =
        a.locations.iter().map(|l| l.file.as_str()).collect();
    let files_b: std::collections::HashSet<&str> =
        b.locations.iter().map(|l| l.file.as_str()).collect();
    if files_a.is_empty() && files_b.is_empty() {
        return 0.0;
    }
    let intersection = files_a.intersection(&files_b).count();
    let union = files_a.union(&files_b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

fn hash_locations(locations: &[PatternLocation]) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = rustc_hash::FxHasher::default();
    for loc in locations {
        loc.file.hash(&mut hasher);
        loc.line.hash(&mut hasher);
        loc.column.hash(&mut hasher);
    }
    hasher.finish()
}
