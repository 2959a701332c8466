//! Core types for convention learning: the learned convention itself, its
//! classification/scope/lifecycle enums, and the persistence seam.

use std::collections::HashMap;

use drift_core::constants;

use crate::patterns::confidence::types::ConfidenceScore;

/// Five-way classification of a learned convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConventionCategory {
    Universal,
    ProjectSpecific,
    Emerging,
    Legacy,
    Contested,
}

impl ConventionCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Universal => "universal",
            Self::ProjectSpecific => "project_specific",
            Self::Emerging => "emerging",
            Self::Legacy => "legacy",
            Self::Contested => "contested",
        }
    }
}

/// Scope a convention applies to; most-specific wins during enforcement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConventionScope {
    Project,
    Directory(String),
    Package(String),
}

/// Lifecycle state of a discovered convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionStatus {
    Discovered,
    Approved,
    Rejected,
    Expired,
}

/// A learned convention: one per (detector, convention key, value, scope).
#[derive(Debug, Clone, PartialEq)]
pub struct Convention {
    pub id: String,
    pub pattern_id: String,
    pub category: ConventionCategory,
    pub scope: ConventionScope,
    pub confidence_score: ConfidenceScore,
    pub dominance_ratio: f64,
    pub discovery_date: u64,
    pub last_seen: u64,
    pub promotion_status: PromotionStatus,
    pub observation_count: u64,
    pub scan_count: u64,
}

impl Convention {
    /// Convergence signal from the underlying confidence score's credible
    /// interval — 1.0 once the posterior has fully collapsed.
    pub fn convergence_score(&self) -> f64 {
        self.confidence_score.convergence_score()
    }
}

/// Thresholds governing discovery, contested detection, and scope inference.
#[derive(Debug, Clone)]
pub struct LearningConfig {
    pub min_occurrences: u64,
    pub min_files: u64,
    pub dominance_threshold: f64,
    pub contested_threshold: f64,
    pub universal_spread_threshold: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            min_occurrences: constants::ENFORCEMENT_MIN_OCCURRENCES as u64,
            min_files: constants::ENFORCEMENT_MIN_FILES as u64,
            dominance_threshold: constants::MIN_CONTESTED_FREQUENCY,
            contested_threshold: constants::CONTESTED_THRESHOLD,
            universal_spread_threshold: constants::UNIVERSAL_FREQUENCY,
        }
    }
}

/// Aggregate diagnostics over a batch of discovered conventions.
#[derive(Debug, Clone, Default)]
pub struct LearningDiagnostics {
    pub total_conventions: usize,
    pub per_category: HashMap<ConventionCategory, usize>,
    pub per_status: HashMap<PromotionStatus, usize>,
}

impl LearningDiagnostics {
    pub fn from_conventions(conventions: &[Convention]) -> Self {
        let mut per_category: HashMap<ConventionCategory, usize> = HashMap::new();
        let mut per_status: HashMap<PromotionStatus, usize> = HashMap::new();
        for c in conventions {
            *per_category.entry(c.category).or_insert(0) += 1;
            *per_status.entry(c.promotion_status).or_insert(0) += 1;
        }
        Self {
            total_conventions: conventions.len(),
            per_category,
            per_status,
        }
    }
}

/// Persistence seam for conventions, implemented by the storage crate.
pub trait ConventionStore {
    fn load_all(&self) -> Vec<Convention>;
    fn load_by_pattern_id(&self, pattern_id: &str) -> Option<Convention>;
    fn save(&mut self, convention: &Convention);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory `ConventionStore`, keyed by pattern ID — used by tests and as a
/// reference implementation for the SQLite-backed store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConventionStore {
    by_pattern_id: HashMap<String, Convention>,
}

impl InMemoryConventionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConventionStore for InMemoryConventionStore {
    fn load_all(&self) -> Vec<Convention> {
        self.by_pattern_id.values().cloned().collect()
    }

    fn load_by_pattern_id(&self, pattern_id: &str) -> Option<Convention> {
        self.by_pattern_id.get(pattern_id).cloned()
    }

    fn save(&mut self, convention: &Convention) {
        self.by_pattern_id
            .insert(convention.pattern_id.clone(), convention.clone());
    }

    fn len(&self) -> usize {
        self.by_pattern_id.len()
    }
}
