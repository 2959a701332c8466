//! `DriftStorageEngine` — unified storage engine implementing all 6 drift storage traits.
//!
//! Wraps `DatabaseManager` (read/write routing) + `BatchWriter` (async batch writes).
//! All reads go through `with_reader()`, all writes through `with_writer()`.
//! This is the single owner of both — no code outside this module should touch
//! a raw `&Connection` for drift.db operations.

use std::path::Path;
use std::sync::Arc;

use drift_core::errors::StorageError;
use drift_core::traits::storage::drift_files::{
    FileMetadataRow, IDriftFiles, ParseCacheRow,
};
use drift_core::traits::storage::drift_analysis::{
    BoundaryRow, CallEdgeRow, ConventionRow, DetectionRow, DetectionSummaryRow,
    FunctionRow, IDriftAnalysis, OutlierRow, PatternConfidenceRow, ScanHistoryRow,
};
use drift_core::traits::storage::drift_structural::{
    ContractMismatchRow, ContractRow, CryptoFindingRow, IDriftStructural,
};
use drift_core::traits::storage::drift_enforcement::{
    FeedbackRow, FeedbackStats, IDriftEnforcement, ViolationRow,
};
use drift_core::traits::storage::drift_batch::{IDriftBatchWriter, WriteStats};
use drift_core::traits::storage::drift_reader::IDriftReader;

use crate::batch::commands::BatchCommand;
use crate::batch::BatchWriter;
use crate::connection::DatabaseManager;
use crate::queries;

/// The unified Drift storage engine.
///
/// Owns `DatabaseManager` (single write connection + read pool) and
/// `BatchWriter` (async batch writes via crossbeam channel).
/// Implements all 6 drift storage traits from `drift-core`.
pub struct DriftStorageEngine {
    db: DatabaseManager,
    batch: BatchWriter,
}

impl DriftStorageEngine {
    /// Open a file-backed storage engine at the given path.
    /// Runs migrations and applies pragmas.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let db = DatabaseManager::open(path)?;
        let batch_conn = db.open_batch_connection()?;
        let batch = BatchWriter::new(batch_conn);
        Ok(Self { db, batch })
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = DatabaseManager::open_in_memory()?;
        let batch_conn = db.open_batch_connection()?;
        let batch = BatchWriter::new(batch_conn);
        Ok(Self { db, batch })
    }

    /// Send a typed `BatchCommand` to the batch writer.
    /// This is the concrete method for NAPI bindings — NOT on the trait.
    pub fn send_batch(&self, command: BatchCommand) -> Result<(), StorageError> {
        self.batch.send(command)
    }

    /// WAL checkpoint delegation.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.db.checkpoint()
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    /// Expose as `Arc<dyn IDriftReader>` for bridge consumption.
    pub fn as_drift_reader(self: &Arc<Self>) -> Arc<dyn IDriftReader> {
        Arc::clone(self) as Arc<dyn IDriftReader>
    }

    /// Flush pending batch writes (fire-and-forget).
    pub fn flush_batch(&self) -> Result<(), StorageError> {
        self.batch.flush()
    }

    /// Flush pending batch writes and block until complete.
    pub fn flush_batch_sync(&self) -> Result<(), StorageError> {
        self.batch.flush_sync().map(|_| ())
    }

    /// Raw read access — for operations not yet covered by a trait method.
    /// Prefer trait methods where possible.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_reader(f)
    }

    /// Raw write access — for operations not yet covered by a trait method.
    /// Prefer trait methods where possible.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_writer(f)
    }

    /// Open a batch connection from the underlying DatabaseManager.
    /// Used during runtime construction for event handlers that need
    /// their own connection.
    pub fn open_batch_connection(&self) -> Result<rusqlite::Connection, StorageError> {
        self.db.open_batch_connection()
    }
}

// ─── Helper: StorageError from rusqlite ─────────────────────────────────────

fn sqe(e: impl std::fmt::Display) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// From impls: drift-storage record types → drift-core trait row types
// ═══════════════════════════════════════════════════════════════════════════════

impl From<queries::files::FileMetadataRecord> for FileMetadataRow {
    fn from(r: queries::files::FileMetadataRecord) -> Self {
        Self {
            path: r.path,
            language: r.language,
            file_size: r.file_size,
            content_hash: r.content_hash,
            mtime_secs: r.mtime_secs,
            mtime_nanos: r.mtime_nanos,
            last_scanned_at: r.last_scanned_at,
            scan_duration_us: r.scan_duration_us,
            pattern_count: r.pattern_count,
            function_count: r.function_count,
            error_count: r.error_count,
            error: r.error,
        }
    }
}

impl From<queries::parse_cache::ParseCacheRecord> for ParseCacheRow {
    fn from(r: queries::parse_cache::ParseCacheRecord) -> Self {
        Self {
            content_hash: r.content_hash,
            language: r.language,
            parse_result_json: r.parse_result_json,
            created_at: r.created_at,
        }
    }
}

impl From<queries::functions::FunctionRecord> for FunctionRow {
    fn from(r: queries::functions::FunctionRecord) -> Self {
        Self {
            id: r.id,
            file: r.file,
            name: r.name,
            qualified_name: r.qualified_name,
            language: r.language,
            line: r.line,
            end_line: r.end_line,
            parameter_count: r.parameter_count,
            return_type: r.return_type,
            is_exported: r.is_exported,
            is_async: r.is_async,
            body_hash: r.body_hash,
            signature_hash: r.signature_hash,
        }
    }
}

impl From<queries::detections::DetectionRecord> for DetectionRow {
    fn from(r: queries::detections::DetectionRecord) -> Self {
        Self {
            id: r.id,
            file: r.file,
            line: r.line,
            column_num: r.column_num,
            pattern_id: r.pattern_id,
            category: r.category,
            confidence: r.confidence,
            detection_method: r.detection_method,
            cwe_ids: r.cwe_ids,
            owasp: r.owasp,
            matched_text: r.matched_text,
            created_at: r.created_at,
        }
    }
}

impl From<queries::detections::DetectionSummaryRow> for DetectionSummaryRow {
    fn from(r: queries::detections::DetectionSummaryRow) -> Self {
        Self {
            detection_method: r.detection_method,
            count: r.count,
            avg_confidence: r.avg_confidence,
        }
    }
}

impl From<queries::patterns::PatternConfidenceRow> for PatternConfidenceRow {
    fn from(r: queries::patterns::PatternConfidenceRow) -> Self {
        Self {
            pattern_id: r.pattern_id,
            alpha: r.alpha,
            beta: r.beta,
            posterior_mean: r.posterior_mean,
            credible_interval_low: r.credible_interval_low,
            credible_interval_high: r.credible_interval_high,
            tier: r.tier,
            momentum: r.momentum,
            last_updated: r.last_updated,
        }
    }
}

impl From<&PatternConfidenceRow> for queries::patterns::PatternConfidenceRow {
    fn from(r: &PatternConfidenceRow) -> Self {
        Self {
            pattern_id: r.pattern_id.clone(),
            alpha: r.alpha,
            beta: r.beta,
            posterior_mean: r.posterior_mean,
            credible_interval_low: r.credible_interval_low,
            credible_interval_high: r.credible_interval_high,
            tier: r.tier.clone(),
            momentum: r.momentum.clone(),
            last_updated: r.last_updated,
        }
    }
}

impl From<queries::patterns::OutlierRow> for OutlierRow {
    fn from(r: queries::patterns::OutlierRow) -> Self {
        Self {
            id: r.id,
            pattern_id: r.pattern_id,
            file: r.file,
            line: r.line,
            deviation_score: r.deviation_score,
            significance: r.significance,
            method: r.method,
            created_at: r.created_at,
        }
    }
}

impl From<&OutlierRow> for queries::patterns::OutlierRow {
    fn from(r: &OutlierRow) -> Self {
        Self {
            id: r.id,
            pattern_id: r.pattern_id.clone(),
            file: r.file.clone(),
            line: r.line,
            deviation_score: r.deviation_score,
            significance: r.significance.clone(),
            method: r.method.clone(),
            created_at: r.created_at,
        }
    }
}

impl From<queries::patterns::ConventionRow> for ConventionRow {
    fn from(r: queries::patterns::ConventionRow) -> Self {
        Self {
            id: r.id,
            pattern_id: r.pattern_id,
            category: r.category,
            scope: r.scope,
            dominance_ratio: r.dominance_ratio,
            promotion_status: r.promotion_status,
            discovered_at: r.discovered_at,
            last_seen: r.last_seen,
            expires_at: r.expires_at,
        }
    }
}

impl From<&ConventionRow> for queries::patterns::ConventionRow {
    fn from(r: &ConventionRow) -> Self {
        Self {
            id: r.id,
            pattern_id: r.pattern_id.clone(),
            category: r.category.clone(),
            scope: r.scope.clone(),
            dominance_ratio: r.dominance_ratio,
            promotion_status: r.promotion_status.clone(),
            discovered_at: r.discovered_at,
            last_seen: r.last_seen,
            expires_at: r.expires_at,
        }
    }
}

impl From<queries::boundaries::BoundaryRecord> for BoundaryRow {
    fn from(r: queries::boundaries::BoundaryRecord) -> Self {
        Self {
            id: r.id,
            file: r.file,
            framework: r.framework,
            model_name: r.model_name,
            table_name: r.table_name,
            field_name: r.field_name,
            sensitivity: r.sensitivity,
            confidence: r.confidence,
            created_at: r.created_at,
        }
    }
}

impl From<queries::call_edges::CallEdgeRecord> for CallEdgeRow {
    fn from(r: queries::call_edges::CallEdgeRecord) -> Self {
        Self {
            caller_id: r.caller_id,
            callee_id: r.callee_id,
            resolution: r.resolution,
            confidence: r.confidence,
            call_site_line: r.call_site_line,
        }
    }
}

impl From<queries::scan_history::ScanHistoryRecord> for ScanHistoryRow {
    fn from(r: queries::scan_history::ScanHistoryRecord) -> Self {
        Self {
            id: r.id,
            started_at: r.started_at,
            completed_at: r.completed_at,
            root_path: r.root_path,
            total_files: r.total_files,
            added_files: r.added_files,
            modified_files: r.modified_files,
            removed_files: r.removed_files,
            unchanged_files: r.unchanged_files,
            duration_ms: r.duration_ms,
            status: r.status,
            error: r.error,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDriftFiles implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl IDriftFiles for DriftStorageEngine {
    fn load_all_file_metadata(&self) -> Result<Vec<FileMetadataRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::files::load_all_file_metadata(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_file_metadata(&self, path: &str) -> Result<Option<FileMetadataRow>, StorageError> {
        self.db.with_reader(|conn| {
            let row = queries::files::get_file_metadata(conn, path)?;
            Ok(row.map(Into::into))
        })
    }

    fn update_function_count(&self, path: &str, count: i64) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            queries::files::update_function_count(conn, path, count)
        })
    }

    fn update_file_error(
        &self,
        path: &str,
        error_count: i64,
        error_msg: Option<&str>,
    ) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            queries::files::update_file_error(conn, path, error_count, error_msg)
        })
    }

    fn count_files(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::files::count_files)
    }

    fn get_parse_cache_by_hash(
        &self,
        content_hash: &[u8],
    ) -> Result<Option<ParseCacheRow>, StorageError> {
        self.db.with_reader(|conn| {
            let row = queries::parse_cache::get_by_hash(conn, content_hash)?;
            Ok(row.map(Into::into))
        })
    }

    fn insert_parse_cache(
        &self,
        content_hash: &[u8],
        language: &str,
        parse_result_json: &str,
        created_at: i64,
    ) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            queries::parse_cache::insert(conn, content_hash, language, parse_result_json, created_at)
        })
    }

    fn invalidate_parse_cache(&self, content_hash: &[u8]) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            queries::parse_cache::invalidate(conn, content_hash)
        })
    }

    fn count_parse_cache(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::parse_cache::count)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDriftAnalysis implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl IDriftAnalysis for DriftStorageEngine {
    // ── functions ──

    fn get_functions_by_file(&self, file: &str) -> Result<Vec<FunctionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::functions::get_functions_by_file(conn, file)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_function_by_qualified_name(
        &self,
        qualified_name: &str,
    ) -> Result<Option<FunctionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let row = queries::functions::get_function_by_qualified_name(conn, qualified_name)?;
            Ok(row.map(Into::into))
        })
    }

    fn delete_functions_by_file(&self, file: &str) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| {
            queries::functions::delete_functions_by_file(conn, file)
        })
    }

    fn count_functions(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::functions::count_functions)
    }

    fn count_entry_points(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::functions::count_entry_points)
    }

    // ── detections ──

    fn insert_detections(&self, detections: &[DetectionRow]) -> Result<usize, StorageError> {
        let records: Vec<queries::detections::DetectionRecord> = detections
            .iter()
            .map(|d| queries::detections::DetectionRecord {
                id: d.id,
                file: d.file.clone(),
                line: d.line,
                column_num: d.column_num,
                pattern_id: d.pattern_id.clone(),
                category: d.category.clone(),
                confidence: d.confidence,
                detection_method: d.detection_method.clone(),
                cwe_ids: d.cwe_ids.clone(),
                owasp: d.owasp.clone(),
                matched_text: d.matched_text.clone(),
                created_at: d.created_at,
            })
            .collect();
        self.db.with_writer(|conn| {
            queries::detections::insert_detections(conn, &records)
        })
    }

    fn get_detections_by_file(&self, file: &str) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::get_detections_by_file(conn, file)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_detections_by_category(&self, category: &str) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::get_detections_by_category(conn, category)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn query_all_detections(&self, limit: usize) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::query_all_detections(conn, limit)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn delete_detections_by_file(&self, file: &str) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| {
            queries::detections::delete_detections_by_file(conn, file)
        })
    }

    fn count_detections(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::detections::count_detections)
    }

    fn get_detections_by_method(&self, method: &str) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::get_detections_by_method(conn, method)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_detections_by_pattern_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::get_detections_by_pattern_prefix(conn, prefix)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_detections_by_cwe(&self, cwe_id: u32) -> Result<Vec<DetectionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::get_detections_by_cwe(conn, cwe_id)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_framework_detection_summary(&self) -> Result<Vec<DetectionSummaryRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::detections::get_framework_detection_summary(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    // ── patterns ──

    fn upsert_confidence(&self, row: &PatternConfidenceRow) -> Result<(), StorageError> {
        let storage_row: queries::patterns::PatternConfidenceRow = row.into();
        self.db.with_writer(|conn| {
            queries::patterns::upsert_confidence(conn, &storage_row)
        })
    }

    fn query_confidence_by_tier(
        &self,
        tier: &str,
        after_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<PatternConfidenceRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::patterns::query_confidence_by_tier(conn, tier, after_id, limit)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn query_all_confidence(&self) -> Result<Vec<PatternConfidenceRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::patterns::query_all_confidence(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn insert_outlier(&self, row: &OutlierRow) -> Result<(), StorageError> {
        let storage_row: queries::patterns::OutlierRow = row.into();
        self.db.with_writer(|conn| {
            queries::patterns::insert_outlier(conn, &storage_row)
        })
    }

    fn query_outliers_by_pattern(
        &self,
        pattern_id: &str,
    ) -> Result<Vec<OutlierRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::patterns::query_outliers_by_pattern(conn, pattern_id)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn insert_convention(&self, row: &ConventionRow) -> Result<(), StorageError> {
        let storage_row: queries::patterns::ConventionRow = row.into();
        self.db.with_writer(|conn| {
            queries::patterns::insert_convention(conn, &storage_row)
        })
    }

    fn query_conventions_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ConventionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::patterns::query_conventions_by_category(conn, category)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn query_all_conventions(&self) -> Result<Vec<ConventionRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::patterns::query_all_conventions(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    // ── boundaries ──

    fn insert_boundaries(&self, boundaries: &[BoundaryRow]) -> Result<usize, StorageError> {
        let rows: Vec<crate::batch::commands::BoundaryRow> = boundaries
            .iter()
            .map(|b| crate::batch::commands::BoundaryRow {
                file: b.file.clone(),
                framework: b.framework.clone(),
                model_name: b.model_name.clone(),
                table_name: b.table_name.clone(),
                field_name: b.field_name.clone(),
                sensitivity: b.sensitivity.clone(),
                confidence: b.confidence,
            })
            .collect();
        self.db.with_writer(|conn| {
            queries::boundaries::insert_boundaries(conn, &rows)?;
            Ok(rows.len())
        })
    }

    fn get_boundaries_by_file(&self, file: &str) -> Result<Vec<BoundaryRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::boundaries::get_boundaries_by_file(conn, file)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_boundaries_by_framework(
        &self,
        framework: &str,
    ) -> Result<Vec<BoundaryRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::boundaries::get_boundaries_by_framework(conn, framework)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_sensitive_boundaries(&self) -> Result<Vec<BoundaryRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::boundaries::get_sensitive_boundaries(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn delete_boundaries_by_file(&self, file: &str) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| {
            queries::boundaries::delete_boundaries_by_file(conn, file)
        })
    }

    fn count_boundaries(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::boundaries::count_boundaries)
    }

    // ── call_edges ──

    fn insert_call_edges(&self, edges: &[CallEdgeRow]) -> Result<usize, StorageError> {
        let rows: Vec<crate::batch::commands::CallEdgeRow> = edges
            .iter()
            .map(|e| crate::batch::commands::CallEdgeRow {
                caller_id: e.caller_id,
                callee_id: e.callee_id,
                resolution: e.resolution.clone(),
                confidence: e.confidence,
                call_site_line: e.call_site_line,
            })
            .collect();
        self.db.with_writer(|conn| {
            queries::call_edges::insert_call_edges(conn, &rows)?;
            Ok(rows.len())
        })
    }

    fn get_edges_by_caller(&self, caller_id: i64) -> Result<Vec<CallEdgeRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::call_edges::get_edges_by_caller(conn, caller_id)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn get_edges_by_callee(&self, callee_id: i64) -> Result<Vec<CallEdgeRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::call_edges::get_edges_by_callee(conn, callee_id)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn delete_edges_by_file(&self, file: &str) -> Result<usize, StorageError> {
        self.db.with_writer(|conn| {
            queries::call_edges::delete_edges_by_file(conn, file)
        })
    }

    fn count_call_edges(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::call_edges::count_call_edges)
    }

    fn count_resolved_edges(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::call_edges::count_resolved_edges)
    }

    // ── scan_history ──

    fn insert_scan_start(&self, started_at: i64, root_path: &str) -> Result<i64, StorageError> {
        self.db.with_writer(|conn| {
            queries::scan_history::insert_scan_start(conn, started_at, root_path)
        })
    }

    fn update_scan_complete(
        &self,
        id: i64,
        completed_at: i64,
        total_files: i64,
        added_files: i64,
        modified_files: i64,
        removed_files: i64,
        unchanged_files: i64,
        duration_ms: i64,
        status: &str,
        error: Option<&str>,
    ) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            queries::scan_history::update_scan_complete(
                conn, id, completed_at, total_files, added_files, modified_files,
                removed_files, unchanged_files, duration_ms, status, error,
            )
        })
    }

    fn query_recent_scans(&self, limit: usize) -> Result<Vec<ScanHistoryRow>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = queries::scan_history::query_recent_scans(conn, limit)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn count_scans(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::scan_history::count_scans)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDriftStructural implementation
// ═══════════════════════════════════════════════════════════════════════════════
//
// Operates directly on drift-core's `ContractRow`/`ContractMismatchRow`/
// `CryptoFindingRow` — `queries::structural` already works on these types, so
// there's no conversion layer here, unlike the analysis/files traits above.

impl IDriftStructural for DriftStorageEngine {
    fn upsert_contract(&self, row: &ContractRow) -> Result<(), StorageError> {
        self.db.with_writer(|conn| queries::structural::upsert_contract(conn, row))
    }

    fn get_contract(&self, id: &str) -> Result<Option<ContractRow>, StorageError> {
        self.db.with_reader(|conn| queries::structural::get_contract(conn, id))
    }

    fn get_contracts_by_paradigm(&self, paradigm: &str) -> Result<Vec<ContractRow>, StorageError> {
        self.db.with_reader(|conn| queries::structural::get_contracts_by_paradigm(conn, paradigm))
    }

    fn insert_contract_mismatch(&self, row: &ContractMismatchRow) -> Result<(), StorageError> {
        self.db.with_writer(|conn| queries::structural::insert_contract_mismatch(conn, row))
    }

    fn query_contract_mismatches(&self) -> Result<Vec<ContractMismatchRow>, StorageError> {
        self.db.with_reader(queries::structural::query_contract_mismatches)
    }

    fn query_contract_mismatches_by_type(
        &self,
        mismatch_type: &str,
    ) -> Result<Vec<ContractMismatchRow>, StorageError> {
        self.db.with_reader(|conn| {
            queries::structural::query_contract_mismatches_by_type(conn, mismatch_type)
        })
    }

    fn insert_crypto_finding(&self, row: &CryptoFindingRow) -> Result<i64, StorageError> {
        self.db.with_writer(|conn| queries::structural::insert_crypto_finding(conn, row))
    }

    fn get_crypto_findings_by_file(&self, file: &str) -> Result<Vec<CryptoFindingRow>, StorageError> {
        self.db.with_reader(|conn| queries::structural::get_crypto_findings_by_file(conn, file))
    }

    fn get_crypto_findings_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<CryptoFindingRow>, StorageError> {
        self.db.with_reader(|conn| queries::structural::get_crypto_findings_by_category(conn, category))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDriftEnforcement implementation
// ═══════════════════════════════════════════════════════════════════════════════
//
// Same pattern as IDriftStructural: `queries::enforcement` already speaks in
// terms of `ViolationRow`/`FeedbackRow`/`FeedbackStats`, so these delegate directly.

impl IDriftEnforcement for DriftStorageEngine {
    fn insert_violation(&self, v: &ViolationRow) -> Result<(), StorageError> {
        self.db.with_writer(|conn| queries::enforcement::insert_violation(conn, v))
    }

    fn query_violations_by_file(&self, file: &str) -> Result<Vec<ViolationRow>, StorageError> {
        self.db.with_reader(|conn| queries::enforcement::query_violations_by_file(conn, file))
    }

    fn query_all_violations(&self) -> Result<Vec<ViolationRow>, StorageError> {
        self.db.with_reader(queries::enforcement::query_all_violations)
    }

    fn insert_feedback(&self, f: &FeedbackRow) -> Result<(), StorageError> {
        self.db.with_writer(|conn| queries::enforcement::insert_feedback(conn, f))
    }

    fn query_feedback_by_detector(&self, detector_id: &str) -> Result<Vec<FeedbackRow>, StorageError> {
        self.db.with_reader(|conn| queries::enforcement::query_feedback_by_detector(conn, detector_id))
    }

    fn query_feedback_by_pattern(&self, pattern_id: &str) -> Result<Vec<FeedbackRow>, StorageError> {
        self.db.with_reader(|conn| queries::enforcement::query_feedback_by_pattern(conn, pattern_id))
    }

    fn query_feedback_adjustments(&self, pattern_id: &str) -> Result<Vec<(f64, f64)>, StorageError> {
        self.db.with_reader(|conn| queries::enforcement::query_feedback_adjustments(conn, pattern_id))
    }

    fn get_violation_pattern_id(&self, violation_id: &str) -> Result<Option<String>, StorageError> {
        self.db.with_reader(|conn| queries::enforcement::get_violation_pattern_id(conn, violation_id))
    }

    fn query_feedback_stats(&self) -> Result<FeedbackStats, StorageError> {
        self.db.with_reader(queries::enforcement::query_feedback_stats)
    }

    fn count_needs_review(&self) -> Result<u32, StorageError> {
        self.db.with_reader(queries::enforcement::count_needs_review)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDriftBatchWriter implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl IDriftBatchWriter for DriftStorageEngine {
    fn send_raw(&self, _command_name: &str, _payload: &[u8]) -> Result<(), StorageError> {
        // Type-erased batch sending exists for cloud implementations that
        // receive serialized commands off the wire; the SQLite engine is
        // driven through send_batch() with a typed BatchCommand instead.
        Err(StorageError::NotSupported {
            operation: "send_raw".to_string(),
            reason: "use send_batch() with a typed BatchCommand for the SQLite backend".to_string(),
        })
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.batch.flush()
    }

    fn flush_sync(&self) -> Result<WriteStats, StorageError> {
        self.batch.flush_sync()
    }

    fn stats(&self) -> WriteStats {
        self.batch.stats()
    }

    fn shutdown(self: Box<Self>) -> Result<WriteStats, StorageError> {
        let this = *self;
        this.batch.shutdown()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IDriftReader implementation (bridge evidence interface)
// ═══════════════════════════════════════════════════════════════════════════════

impl IDriftReader for DriftStorageEngine {
    fn pattern_confidence(&self, pattern_id: &str) -> Result<Option<f64>, StorageError> {
        self.db.with_reader(|conn| {
            conn.query_row(
                "SELECT posterior_mean FROM pattern_confidence WHERE pattern_id = ?1",
                rusqlite::params![pattern_id],
                |row| row.get(0),
            )
            .optional_()
        })
    }

    fn pattern_occurrence_rate(&self, pattern_id: &str) -> Result<Option<f64>, StorageError> {
        self.db.with_reader(|conn| {
            let file_count: f64 = conn
                .query_row(
                    "SELECT COALESCE(NULLIF(CAST(COUNT(DISTINCT file) AS REAL), 0.0), 1.0) FROM detections",
                    [],
                    |row| row.get(0),
                )
                .map_err(sqe)?;
            let pattern_files: f64 = conn
                .query_row(
                    "SELECT CAST(COUNT(DISTINCT file) AS REAL) FROM detections WHERE pattern_id = ?1",
                    rusqlite::params![pattern_id],
                    |row| row.get(0),
                )
                .map_err(sqe)?;
            if pattern_files == 0.0 {
                Ok(None)
            } else {
                Ok(Some(pattern_files / file_count))
            }
        })
    }

    fn false_positive_rate(&self, pattern_id: &str) -> Result<Option<f64>, StorageError> {
        self.db.with_reader(|conn| {
            let total: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM feedback WHERE pattern_id = ?1",
                    rusqlite::params![pattern_id],
                    |row| row.get(0),
                )
                .map_err(sqe)?;
            if total == 0 {
                return Ok(None);
            }
            let dismiss: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM feedback WHERE pattern_id = ?1 AND action IN ('Dismiss', 'NotUseful')",
                    rusqlite::params![pattern_id],
                    |row| row.get(0),
                )
                .map_err(sqe)?;
            Ok(Some(dismiss as f64 / total as f64))
        })
    }

    fn contract_confidence(&self, contract_id: &str) -> Result<Option<f64>, StorageError> {
        self.db.with_reader(|conn| {
            conn.query_row(
                "SELECT confidence FROM contracts WHERE id = ?1",
                rusqlite::params![contract_id],
                |row| row.get(0),
            )
            .optional_()
        })
    }

    fn crypto_health(&self, file_prefix: &str) -> Result<Option<f64>, StorageError> {
        self.db.with_reader(|conn| {
            let like = format!("{file_prefix}%");
            let total: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM crypto_findings WHERE file LIKE ?1",
                    rusqlite::params![like],
                    |row| row.get(0),
                )
                .map_err(sqe)?;
            if total == 0 {
                return Ok(None);
            }
            let avg_confidence: f64 = conn
                .query_row(
                    "SELECT AVG(confidence) FROM crypto_findings WHERE file LIKE ?1",
                    rusqlite::params![like],
                    |row| row.get(0),
                )
                .map_err(sqe)?;
            Ok(Some(1.0 - avg_confidence))
        })
    }

    fn count_matching_patterns(&self, pattern_ids: &[String]) -> Result<u32, StorageError> {
        if pattern_ids.is_empty() {
            return Ok(0);
        }
        self.db.with_reader(|conn| {
            let placeholders: String = pattern_ids
                .iter()
                .enumerate()
                .map(|(i, _)| format!("?{}", i + 1))
                .collect::<Vec<_>>()
                .join(",");
            let sql = format!("SELECT COUNT(*) FROM pattern_confidence WHERE pattern_id IN ({placeholders})");
            let mut stmt = conn.prepare(&sql).map_err(sqe)?;
            let params: Vec<&dyn rusqlite::types::ToSql> =
                pattern_ids.iter().map(|s| s as &dyn rusqlite::types::ToSql).collect();
            let count: i64 = stmt.query_row(params.as_slice(), |row| row.get(0)).map_err(sqe)?;
            Ok(count as u32)
        })
    }

    fn latest_scan_timestamp(&self) -> Result<Option<String>, StorageError> {
        self.db.with_reader(|conn| {
            let ts = queries::scan_history::latest_scan_timestamp(conn)?;
            Ok(ts.map(|t| t.to_string()))
        })
    }
}

/// Small adapter so `query_row(...).optional()` reads naturally at call sites
/// above without importing `OptionalExtension` at module scope (it would
/// shadow the `queries::*` modules' own `use` of the same trait).
trait OptionalRow<T> {
    fn optional_(self) -> Result<Option<T>, StorageError>;
}

impl<T> OptionalRow<T> for rusqlite::Result<T> {
    fn optional_(self) -> Result<Option<T>, StorageError> {
        use rusqlite::OptionalExtension;
        self.optional().map_err(sqe)
    }
}
