//! Runtime lifecycle plus the core `analyze()` / `analyze_changed()` entry
//! points.
//!
//! `drift_initialize()` creates drift.db, sets PRAGMAs, runs migrations,
//! and initializes the DriftRuntime singleton. `drift_shutdown()` cleanly
//! closes all connections and flushes caches. `drift_analyze()` and
//! `drift_analyze_changed()` run the whole-tree pipeline on libuv's thread
//! pool, the same `AsyncTask` shape `driftScan()` uses, and persist findings
//! to drift.db as they're found — only a lightweight summary crosses back.

use std::path::PathBuf;

use napi::bindgen_prelude::*;
use napi_derive::napi;

use crate::conversions::error_codes;
use crate::conversions::types::{JsAnalyzeOptions, JsAnalyzeResult};
use crate::runtime::{self, RuntimeOptions};

/// Initialize the Drift analysis engine.
///
/// Creates the database (drift.db), applies SQLite PRAGMAs (WAL mode,
/// synchronous=NORMAL, 64MB page cache), runs schema migrations, and
/// initializes the global DriftRuntime singleton.
///
/// Must be called exactly once before any other drift_* function.
/// Subsequent calls return an ALREADY_INITIALIZED error.
///
/// @param db_path - Optional path to drift.db. Defaults to `.drift/drift.db`.
/// @param project_root - Optional project root for scanning and config resolution.
/// @param config_toml - Optional TOML configuration string. Overrides file-based config.
#[napi(js_name = "driftInitialize")]
pub fn drift_initialize(
    db_path: Option<String>,
    project_root: Option<String>,
    config_toml: Option<String>,
) -> napi::Result<()> {
    runtime::initialize(RuntimeOptions {
        db_path: db_path.map(PathBuf::from),
        project_root: project_root.map(PathBuf::from),
        config_toml,
    })
}

/// Shut down the Drift analysis engine.
///
/// Performs a WAL checkpoint (TRUNCATE mode) to consolidate the write-ahead
/// log. Because `OnceLock` cannot be reset, the runtime reference itself
/// remains after this call; in practice shutdown is called once at process
/// exit.
#[napi(js_name = "driftShutdown")]
pub fn drift_shutdown() -> napi::Result<()> {
    let rt = runtime::get()?;
    rt.storage.checkpoint().map_err(|e| {
        napi::Error::from_reason(format!("[{}] WAL checkpoint failed: {e}", error_codes::STORAGE_ERROR))
    })
}

/// Check if the Drift runtime is initialized.
#[napi(js_name = "driftIsInitialized")]
pub fn drift_is_initialized() -> bool {
    runtime::is_initialized()
}

/// Run garbage collection and data retention on drift.db.
///
/// Applies a tiered retention policy (short/medium/long windows for
/// detections, feedback, and caches respectively) and follows with an
/// incremental vacuum to reclaim disk space.
#[napi(js_name = "driftGC")]
pub fn drift_gc(
    short_days: Option<u32>,
    medium_days: Option<u32>,
    long_days: Option<u32>,
) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;

    let policy = drift_storage::retention::RetentionPolicy {
        short_days: short_days.unwrap_or(30),
        medium_days: medium_days.unwrap_or(90),
        long_days: long_days.unwrap_or(365),
    };

    let retention_report = rt
        .storage
        .with_writer(|conn| drift_storage::retention::apply_retention(conn, &policy))
        .map_err(|e| {
            napi::Error::from_reason(format!("[{}] Retention cleanup failed: {e}", error_codes::STORAGE_ERROR))
        })?;

    let _ = rt.storage.with_writer(|conn| -> Result<(), drift_core::errors::StorageError> {
        conn.execute_batch("PRAGMA incremental_vacuum")
            .map_err(|e| drift_core::errors::StorageError::SqliteError { message: e.to_string() })?;
        Ok(())
    });

    Ok(serde_json::json!({
        "total_deleted": retention_report.total_deleted,
        "duration_ms": retention_report.duration_ms,
        "per_table": retention_report.per_table.iter().map(|t| {
            serde_json::json!({ "table": t.table, "deleted": t.deleted })
        }).collect::<Vec<_>>(),
    }))
}

/// Async whole-tree analysis task, run on libuv's thread pool.
pub struct AnalyzeTask {
    root: PathBuf,
    options: drift_core::config::AnalyzeOptions,
}

#[napi]
impl Task for AnalyzeTask {
    type Output = JsAnalyzeResult;
    type JsValue = JsAnalyzeResult;

    fn compute(&mut self) -> napi::Result<Self::Output> {
        let rt = runtime::get()?;
        let result = drift_analysis::engine::analyze(
            &self.root,
            &self.options,
            Some(&rt.storage),
            Some(&rt.storage),
        )
        .map_err(error_codes::pipeline_error)?;
        Ok(JsAnalyzeResult::from(&result))
    }

    fn resolve(&mut self, _env: Env, output: Self::Output) -> napi::Result<Self::JsValue> {
        Ok(output)
    }
}

/// Analyze every file under `root`, persisting findings to drift.db.
///
/// Returns a lightweight summary — query individual findings via
/// `driftQueryFindings()`, `driftQueryContracts()`, etc.
#[napi(js_name = "driftAnalyze")]
pub fn drift_analyze(root: String, options: Option<JsAnalyzeOptions>) -> AsyncTask<AnalyzeTask> {
    AsyncTask::new(AnalyzeTask {
        root: PathBuf::from(root),
        options: options.unwrap_or_default().into(),
    })
}

/// Async incremental analysis task over a caller-supplied file list.
pub struct AnalyzeChangedTask {
    root: PathBuf,
    changed_files: Vec<PathBuf>,
    options: drift_core::config::AnalyzeOptions,
}

#[napi]
impl Task for AnalyzeChangedTask {
    type Output = JsAnalyzeResult;
    type JsValue = JsAnalyzeResult;

    fn compute(&mut self) -> napi::Result<Self::Output> {
        let rt = runtime::get()?;
        let result = drift_analysis::engine::analyze_changed(
            &self.root,
            &self.changed_files,
            &self.options,
            Some(&rt.storage),
        )
        .map_err(error_codes::pipeline_error)?;
        Ok(JsAnalyzeResult::from(&result))
    }

    fn resolve(&mut self, _env: Env, output: Self::Output) -> napi::Result<Self::JsValue> {
        Ok(output)
    }
}

/// Analyze only `changed_files`, skipping the directory walk. Intended for
/// editor/CI integrations that already know which files changed.
#[napi(js_name = "driftAnalyzeChanged")]
pub fn drift_analyze_changed(
    root: String,
    changed_files: Vec<String>,
    options: Option<JsAnalyzeOptions>,
) -> AsyncTask<AnalyzeChangedTask> {
    AsyncTask::new(AnalyzeChangedTask {
        root: PathBuf::from(root),
        changed_files: changed_files.into_iter().map(PathBuf::from).collect(),
        options: options.unwrap_or_default().into(),
    })
}

/// Query persisted pattern detections with an optional category filter.
#[napi(js_name = "driftQueryFindings")]
pub fn drift_query_findings(category: Option<String>, limit: Option<u32>) -> napi::Result<serde_json::Value> {
    let rt = runtime::get()?;
    let lim = limit.unwrap_or(100) as usize;

    let detections = rt
        .storage
        .with_reader(|conn| {
            if let Some(ref cat) = category {
                drift_storage::queries::detections::get_detections_by_category(conn, cat)
            } else {
                drift_storage::queries::detections::query_all_detections(conn, lim)
            }
        })
        .map_err(error_codes::storage_error)?;

    let items: Vec<_> = detections
        .iter()
        .take(lim)
        .map(|d| {
            serde_json::json!({
                "file": d.file,
                "line": d.line,
                "column": d.column_num,
                "pattern_id": d.pattern_id,
                "category": d.category,
                "confidence": d.confidence,
                "detection_method": d.detection_method,
                "cwe_ids": d.cwe_ids,
                "owasp": d.owasp,
                "matched_text": d.matched_text,
            })
        })
        .collect();

    Ok(serde_json::json!({ "findings": items }))
}
