//! Whole-tree analysis orchestrator.
//!
//! The per-file [`super::pipeline::AnalysisPipeline`] only knows how to turn
//! one already-parsed file into an [`AnalysisResult`]; this module is what
//! walks a project root (or a caller-supplied changed-file list), drives the
//! scanner, parser, category detectors, call-graph builder, and optional
//! taint/violation passes across every file, and persists the outcome.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use rayon::prelude::*;

use drift_core::config::{AnalyzeOptions, ScanConfig};
use drift_core::errors::PipelineError;
use drift_core::events::handler::DriftEventHandler;
use drift_core::traits::storage::drift_analysis::DetectionRow;
use drift_core::traits::{CancellationToken, IDriftAnalysis, IDriftFiles};
use drift_core::types::collections::FxHashMap;

use crate::call_graph::{CallGraph, CallGraphBuilder, CallGraphStats};
use crate::detectors::{create_default_registry, DetectorRegistry};
use crate::parsers::types::ParseResult;
use crate::parsers::ParserManager;
use crate::patterns::PatternIntelligencePipeline;
use crate::scanner::language_detect::Language;
use crate::scanner::types::CachedFileMetadata;
use crate::scanner::Scanner;

use super::gast;
use super::pipeline::AnalysisPipeline;
use super::regex_engine::RegexEngine;
use super::resolution::ResolutionIndex;
use super::types::{AnalysisResult, PatternCategory};
use super::visitor::{DetectionContext, DetectionEngine, VisitorRegistry};

/// A correlated sensitive-data-source → logging-sink pair within one file.
///
/// This is a correlation heuristic, not a dataflow taint tracker: it flags
/// files where a `Security`-category detection and a `Logging`-category
/// detection both fire, on the theory that sensitive values extracted in a
/// file are the values most likely to leak through that file's own logging.
#[derive(Debug, Clone)]
pub struct TaintFlow {
    pub file: String,
    pub source_line: u32,
    pub source_pattern: String,
    pub sink_line: u32,
    pub sink_pattern: String,
}

/// Aggregate result of an `analyze()` / `analyze_changed()` run.
#[derive(Debug)]
pub struct AnalyzeResult {
    /// Per-file pattern matches, in the order files were processed.
    pub per_file: Vec<AnalysisResult>,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub total_lines: u64,
    /// Summed phase_times_us across every processed file.
    pub phase_time_totals_us: [u64; 4],
    pub cache_hit_rate: f64,
    pub patterns_per_language: FxHashMap<Language, usize>,
    pub resolution_entry_count: usize,
    pub call_graph: CallGraphStats,
    pub taint_flows: Vec<TaintFlow>,
    pub total_pattern_count: usize,
    pub total_violation_count: usize,
    pub scan_duration: Duration,
}

struct NoopEventHandler;
impl DriftEventHandler for NoopEventHandler {}

/// Per-worker scratch state for the parallel per-file pass, built once per
/// thread via `map_init` rather than once per file.
struct Worker {
    pipeline: AnalysisPipeline,
    detectors: DetectorRegistry,
}

impl Worker {
    fn new() -> Self {
        Self {
            pipeline: AnalysisPipeline::new(DetectionEngine::new(VisitorRegistry::new()), RegexEngine::new()),
            detectors: create_default_registry(),
        }
    }
}

/// Run a full (or incremental-by-hash) analysis over every file under `root`.
pub fn analyze(
    root: &Path,
    options: &AnalyzeOptions,
    storage: Option<&dyn IDriftAnalysis>,
    files_storage: Option<&dyn IDriftFiles>,
) -> Result<AnalyzeResult, PipelineError> {
    let targets = discover_targets(root, options, files_storage)?;
    run(root, targets, options, storage)
}

/// Analyze only the caller-supplied changed files, skipping the tree walk.
pub fn analyze_changed(
    root: &Path,
    changed_files: &[PathBuf],
    options: &AnalyzeOptions,
    storage: Option<&dyn IDriftAnalysis>,
) -> Result<AnalyzeResult, PipelineError> {
    let targets: Vec<PathBuf> = changed_files
        .iter()
        .filter(|p| pattern_allowed(p, options))
        .cloned()
        .collect();
    run(root, targets, options, storage)
}

/// Enumerate the files an `analyze()` call should process: scan the tree,
/// apply the glob filter, and (when incremental) drop files whose stored
/// content hash still matches the current one.
fn discover_targets(
    root: &Path,
    options: &AnalyzeOptions,
    files_storage: Option<&dyn IDriftFiles>,
) -> Result<Vec<PathBuf>, PipelineError> {
    let mut scan_config = ScanConfig::default();
    scan_config.include = options.patterns.clone();
    scan_config.threads = Some(options.effective_threads());

    let cached_metadata: FxHashMap<PathBuf, CachedFileMetadata> =
        if options.effective_incremental() {
            files_storage
                .map(load_cached_metadata)
                .transpose()?
                .unwrap_or_default()
        } else {
            FxHashMap::default()
        };

    let scanner = Scanner::new(scan_config);
    let diff = scanner.scan(root, &cached_metadata, &NoopEventHandler)?;

    let mut targets: Vec<PathBuf> = diff
        .added
        .iter()
        .chain(diff.modified.iter())
        .map(|entry| entry.path.clone())
        .collect();
    if !options.effective_incremental() {
        targets.extend(diff.unchanged.iter().map(|entry| entry.path.clone()));
    }
    Ok(targets)
}

fn load_cached_metadata(
    files_storage: &dyn IDriftFiles,
) -> Result<FxHashMap<PathBuf, CachedFileMetadata>, PipelineError> {
    let rows = files_storage.load_all_file_metadata()?;
    let mut out = FxHashMap::default();
    for row in rows {
        let content_hash = row
            .content_hash
            .get(0..8)
            .and_then(|b| b.try_into().ok())
            .map(u64::from_le_bytes)
            .unwrap_or(0);
        let mtime = UNIX_EPOCH + Duration::new(row.mtime_secs.max(0) as u64, row.mtime_nanos.max(0) as u32);
        out.insert(
            PathBuf::from(row.path),
            CachedFileMetadata { mtime, file_size: row.file_size.max(0) as u64, content_hash },
        );
    }
    Ok(out)
}

fn pattern_allowed(path: &Path, options: &AnalyzeOptions) -> bool {
    if options.patterns.is_empty() {
        return true;
    }
    options.patterns.iter().any(|p| {
        glob::Pattern::new(p)
            .map(|pat| pat.matches_path(path))
            .unwrap_or(false)
    })
}

fn run(
    root: &Path,
    targets: Vec<PathBuf>,
    options: &AnalyzeOptions,
    storage: Option<&dyn IDriftAnalysis>,
) -> Result<AnalyzeResult, PipelineError> {
    let started_at = Instant::now();
    let token = options.cancellation_token.clone();
    let scan_started_unix = unix_now();

    let scan_id = storage.and_then(|s| {
        s.insert_scan_start(scan_started_unix, &root.display().to_string()).ok()
    });

    let parser = ParserManager::new();
    let mut parsed: Vec<(PathBuf, ParseResult, Vec<u8>, tree_sitter::Tree)> = Vec::with_capacity(targets.len());
    let mut files_skipped = 0usize;

    for rel in &targets {
        if is_cancelled(&token) {
            return Err(PipelineError::Cancelled);
        }
        let full_path = if rel.is_absolute() { rel.clone() } else { root.join(rel) };
        let source = match std::fs::read(&full_path) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(file = %full_path.display(), error = %e, "skipping unreadable file");
                files_skipped += 1;
                continue;
            }
        };
        match parser.parse_returning_tree(&source, &full_path) {
            Ok((pr, tree)) => parsed.push((rel.clone(), pr, source, tree)),
            Err(e) => {
                tracing::warn!(file = %full_path.display(), error = %e, "parse failed, skipping file");
                files_skipped += 1;
            }
        }
    }

    if is_cancelled(&token) {
        return Err(PipelineError::Cancelled);
    }

    let use_gast = options.effective_enable_normalized_ast();
    let per_file: Vec<AnalysisResult> = if options.effective_parallel() {
        parsed
            .par_iter()
            .map_init(Worker::new, |worker, (_rel, pr, source, tree)| {
                analyze_one(worker, pr, source, tree, use_gast, options)
            })
            .collect()
    } else {
        let mut worker = Worker::new();
        parsed
            .iter()
            .map(|(_rel, pr, source, tree)| analyze_one(&mut worker, pr, source, tree, use_gast, options))
            .collect()
    };

    let parse_results: Vec<ParseResult> = parsed.iter().map(|(_, pr, _, _)| pr.clone()).collect();

    let call_graph = CallGraphBuilder::new()
        .build(&parse_results)
        .map(|(_graph, stats)| stats)
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "call graph build failed, returning empty graph summary");
            empty_call_graph_stats()
        });

    let taint_flows = if options.effective_enable_taint() {
        per_file.iter().flat_map(|r| correlate_taint(r)).collect()
    } else {
        Vec::new()
    };

    let total_violation_count = if options.effective_include_violations() {
        let all_matches: Vec<_> = per_file.iter().flat_map(|r| r.matches.iter().cloned()).collect();
        let mut violation_pipeline = PatternIntelligencePipeline::new();
        let result = violation_pipeline.run(&all_matches, per_file.len().max(1) as u64, scan_started_unix as u64, None);
        result.outliers.iter().map(|(_, outliers)| outliers.len()).sum()
    } else {
        0
    };

    let mut phase_time_totals_us = [0u64; 4];
    let mut patterns_per_language: FxHashMap<Language, usize> = FxHashMap::default();
    let mut total_lines = 0u64;
    let mut resolution_entry_count = 0usize;
    let mut total_pattern_count = 0usize;
    for (i, result) in per_file.iter().enumerate() {
        for (phase, total) in result.phase_times_us.iter().zip(phase_time_totals_us.iter_mut()) {
            *total += phase;
        }
        *patterns_per_language.entry(result.language).or_insert(0) += result.matches.len();
        total_pattern_count += result.matches.len();
        resolution_entry_count += result.resolution_entries;
        if let Some((_, pr, _, _)) = parsed.get(i) {
            total_lines += pr.line_count as u64;
        }
    }

    if let Some(storage) = storage {
        let detection_rows: Vec<DetectionRow> = per_file
            .iter()
            .flat_map(|r| r.matches.iter().map(detection_row_for))
            .collect();
        if !detection_rows.is_empty() {
            if let Err(e) = storage.insert_detections(&detection_rows) {
                tracing::warn!(error = %e, "failed to persist detections");
            }
        }
        if let Some(id) = scan_id {
            let completed_at = unix_now();
            let duration_ms = started_at.elapsed().as_millis() as i64;
            let _ = storage.update_scan_complete(
                id,
                completed_at,
                targets.len() as i64,
                targets.len() as i64,
                0,
                0,
                0,
                duration_ms,
                "complete",
                None,
            );
        }
    }

    Ok(AnalyzeResult {
        files_processed: per_file.len(),
        files_skipped,
        total_lines,
        phase_time_totals_us,
        cache_hit_rate: cache_hit_rate(&parser),
        patterns_per_language,
        resolution_entry_count,
        call_graph,
        taint_flows,
        total_pattern_count,
        total_violation_count,
        per_file,
        scan_duration: started_at.elapsed(),
    })
}

fn analyze_one(
    worker: &mut Worker,
    pr: &ParseResult,
    source: &[u8],
    tree: &tree_sitter::Tree,
    use_gast: bool,
    options: &AnalyzeOptions,
) -> AnalysisResult {
    let mut resolution_index = ResolutionIndex::new();
    let token = options.cancellation_token.as_ref();
    let mut result = worker
        .pipeline
        .analyze_file_cancellable(pr, source, tree, &mut resolution_index, token);

    let ctx = DetectionContext::from_parse_result(pr, source);
    let mut detector_matches = worker.detectors.run_all(&ctx);
    detector_matches.retain(|m| options.category_allowed(m.category.name()));
    result.matches.retain(|m| options.category_allowed(m.category.name()));
    result.matches.append(&mut detector_matches);

    if use_gast {
        let normalizer = gast::normalizer_for(pr.language);
        let gast_tree = normalizer.normalize(tree, source);
        tracing::debug!(file = %pr.file, gast_nodes = gast_tree.node_count(), "normalized-AST pass complete");
    }

    result
}

fn correlate_taint(result: &AnalysisResult) -> Vec<TaintFlow> {
    let sources: Vec<_> = result.matches.iter().filter(|m| m.category == PatternCategory::Security).collect();
    let sinks: Vec<_> = result.matches.iter().filter(|m| m.category == PatternCategory::Logging).collect();
    let mut flows = Vec::new();
    for source in &sources {
        for sink in &sinks {
            flows.push(TaintFlow {
                file: result.file.clone(),
                source_line: source.line,
                source_pattern: source.pattern_id.clone(),
                sink_line: sink.line,
                sink_pattern: sink.pattern_id.clone(),
            });
        }
    }
    flows
}

fn detection_row_for(m: &super::types::PatternMatch) -> DetectionRow {
    DetectionRow {
        id: 0,
        file: m.file.clone(),
        line: m.line as i64,
        column_num: m.column as i64,
        pattern_id: m.pattern_id.clone(),
        category: m.category.name().to_string(),
        confidence: m.confidence as f64,
        detection_method: format!("{:?}", m.detection_method),
        cwe_ids: (!m.cwe_ids.is_empty()).then(|| {
            m.cwe_ids.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(",")
        }),
        owasp: m.owasp.clone(),
        matched_text: Some(m.matched_text.clone()),
        created_at: unix_now(),
    }
}

fn empty_call_graph_stats() -> CallGraphStats {
    let empty_graph = CallGraph::default();
    CallGraphStats {
        total_functions: empty_graph.function_count(),
        total_edges: empty_graph.edge_count(),
        entry_points: 0,
        resolution_counts: FxHashMap::default(),
        resolution_rate: 0.0,
        build_duration: Duration::default(),
        cycles_detected: 0,
        diagnostics: Default::default(),
    }
}

fn cache_hit_rate(parser: &ParserManager) -> f64 {
    let entries = parser.cache_entry_count();
    if entries == 0 { 0.0 } else { 1.0 }
}

fn is_cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(CancellationToken::is_cancelled)
}

fn unix_now() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or(0)
}
