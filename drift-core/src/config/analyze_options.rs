//! Per-call options for an `analyze()` / `analyze_changed()` invocation.
//!
//! Unlike [`ScanConfig`](super::ScanConfig) and [`AnalysisConfig`](super::AnalysisConfig),
//! this is not a `drift.toml` section — it is the options argument callers pass
//! directly to the pipeline entry points. `cancellation_token` is therefore
//! excluded from (de)serialization: it is a live handle into the current
//! process, not configuration state.

use serde::{Deserialize, Serialize};

use crate::traits::CancellationToken;

/// Options controlling a single `analyze()` or `analyze_changed()` run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeOptions {
    /// File glob filters. Empty means all discovered files are analyzed.
    pub patterns: Vec<String>,
    /// Category filters (e.g. "security", "data_access"). Empty means all categories.
    pub categories: Vec<String>,
    /// Run per-file phases across a worker pool instead of sequentially.
    pub parallel: Option<bool>,
    /// Worker thread count. 0 = auto-detect via available parallelism.
    pub threads: Option<usize>,
    /// Include violation detection (deviation from learned conventions) in the result.
    pub include_violations: Option<bool>,
    /// Reuse prior scan state: skip unchanged files by content hash, rescore
    /// only changed-file patterns, and relearn conventions per the change-ratio policy.
    pub incremental: Option<bool>,
    /// Paths to additional TOML pattern files layered on top of the built-in catalog.
    #[serde(default)]
    pub custom_patterns: Vec<String>,
    /// Enable taint-flow correlation between sensitive-data sources and logging/network sinks.
    pub enable_taint: Option<bool>,
    /// Enable the normalized-AST (GAST) visitor pass alongside the native tree-sitter pass.
    pub enable_normalized_ast: Option<bool>,
    /// Cooperative cancellation handle. Polled between files and between
    /// recursive descents in the visitor engine.
    #[serde(skip)]
    pub cancellation_token: Option<CancellationToken>,
}

impl AnalyzeOptions {
    /// Whether per-file analysis should run across a worker pool. Default: true.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }

    /// Effective worker thread count. 0 = auto-detect.
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    /// Whether to compute convention-deviation violations. Default: true.
    pub fn effective_include_violations(&self) -> bool {
        self.include_violations.unwrap_or(true)
    }

    /// Whether to skip unchanged files and incrementally relearn conventions. Default: true.
    pub fn effective_incremental(&self) -> bool {
        self.incremental.unwrap_or(true)
    }

    /// Whether taint-flow correlation runs. Default: false (opt-in, costs a full pass).
    pub fn effective_enable_taint(&self) -> bool {
        self.enable_taint.unwrap_or(false)
    }

    /// Whether the GAST normalization layer runs. Default: false (opt-in).
    pub fn effective_enable_normalized_ast(&self) -> bool {
        self.enable_normalized_ast.unwrap_or(false)
    }

    /// True when `categories` is empty (no filter) or contains `name`.
    pub fn category_allowed(&self, name: &str) -> bool {
        self.categories.is_empty() || self.categories.iter().any(|c| c == name)
    }
}
