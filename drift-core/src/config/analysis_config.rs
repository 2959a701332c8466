//! Convention-learning / detection configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum occurrences before a candidate is promoted to a convention. Default: 3.
    pub min_occurrences: Option<u32>,
    /// Dominance threshold (fraction of the majority choice) to call a convention established.
    /// Default: 0.60.
    pub dominance_threshold: Option<f64>,
    /// Minimum distinct files a pattern must appear in. Default: 2.
    pub min_files: Option<u32>,
    /// Frequency delta that triggers re-evaluation of an established convention. Default: 0.20.
    pub relearn_threshold: Option<f64>,
    #[serde(default)]
    pub enabled_categories: Vec<String>,
    pub incremental: Option<bool>,
}

impl AnalysisConfig {
    pub fn effective_min_occurrences(&self) -> u32 {
        self.min_occurrences.unwrap_or(3)
    }

    pub fn effective_dominance_threshold(&self) -> f64 {
        self.dominance_threshold.unwrap_or(0.60)
    }

    pub fn effective_min_files(&self) -> u32 {
        self.min_files.unwrap_or(2)
    }

    pub fn effective_relearn_threshold(&self) -> f64 {
        self.relearn_threshold.unwrap_or(0.20)
    }
}
