//! Dedicated writer thread with crossbeam-channel bounded(1024).
//! Batches writes into single transactions for throughput.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use drift_core::errors::StorageError;
use drift_core::traits::storage::drift_batch::WriteStats;
use rusqlite::Connection;

use super::commands::{
    BatchCommand, BoundaryRow, CallEdgeRow, ContractInsertRow, ContractMismatchInsertRow,
    ConventionInsertRow, CryptoFindingInsertRow, DetectionRow, FileMetadataRow, FunctionRow,
    OutlierDetectionRow, ParseCacheRow, PatternConfidenceRow, ScanHistoryInsertRow,
    ViolationInsertRow,
};

const CHANNEL_BOUND: usize = 1024;
const BATCH_SIZE: usize = 500;
const FLUSH_TIMEOUT: Duration = Duration::from_millis(100);

/// A batch writer that accepts commands via a channel and writes them
/// in batched transactions on a dedicated thread.
pub struct BatchWriter {
    tx: Sender<BatchCommand>,
    handle: Option<JoinHandle<Result<WriteStats, StorageError>>>,
    /// Mirrors the writer thread's running totals so `stats()`/`flush_sync()`
    /// can report real numbers without joining the thread.
    stats: Arc<Mutex<WriteStats>>,
}

impl BatchWriter {
    /// Create a new batch writer with a dedicated writer thread.
    /// The `conn` is moved to the writer thread.
    pub fn new(conn: Connection) -> Self {
        let (tx, rx) = bounded(CHANNEL_BOUND);
        let stats = Arc::new(Mutex::new(WriteStats::default()));
        let thread_stats = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name("drift-batch-writer".to_string())
            .spawn(move || writer_loop(conn, rx, thread_stats))
            .expect("failed to spawn batch writer thread");

        Self { tx, handle: Some(handle), stats }
    }

    /// Send a command to the batch writer.
    pub fn send(&self, cmd: BatchCommand) -> Result<(), StorageError> {
        self.tx.send(cmd).map_err(|_| StorageError::SqliteError {
            message: "batch writer channel disconnected".to_string(),
        })
    }

    /// Flush pending writes (fire-and-forget, does NOT wait for completion).
    pub fn flush(&self) -> Result<(), StorageError> {
        self.send(BatchCommand::Flush)
    }

    /// Flush pending writes and **block** until the batch writer thread confirms
    /// all buffered commands have been committed to SQLite. Returns the running
    /// write totals as of that commit.
    ///
    /// Use this when downstream code needs to read data that was just written
    /// (e.g., reading `file_metadata` right after a scan finishes).
    pub fn flush_sync(&self) -> Result<WriteStats, StorageError> {
        let (tx, rx) = std::sync::mpsc::sync_channel(0);
        self.send(BatchCommand::FlushSync(tx))?;
        rx.recv().map_err(|_| StorageError::SqliteError {
            message: "batch writer thread did not respond to flush_sync".to_string(),
        })?;
        Ok(self.stats())
    }

    /// Snapshot of running write totals accumulated so far.
    pub fn stats(&self) -> WriteStats {
        self.stats.lock().expect("batch writer stats mutex poisoned").clone()
    }

    /// Shut down the writer thread and wait for completion.
    pub fn shutdown(mut self) -> Result<WriteStats, StorageError> {
        let _ = self.tx.send(BatchCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| StorageError::SqliteError {
                message: "batch writer thread panicked".to_string(),
            })?
        } else {
            Ok(WriteStats::default())
        }
    }
}

impl Drop for BatchWriter {
    fn drop(&mut self) {
        // Signal shutdown if not already done.
        let _ = self.tx.send(BatchCommand::Shutdown);
    }
}

fn writer_loop(
    conn: Connection,
    rx: Receiver<BatchCommand>,
    shared_stats: Arc<Mutex<WriteStats>>,
) -> Result<WriteStats, StorageError> {
    let mut buffer: Vec<BatchCommand> = Vec::with_capacity(BATCH_SIZE);
    let mut stats = WriteStats::default();

    let publish = |stats: &WriteStats, shared: &Arc<Mutex<WriteStats>>| {
        *shared.lock().expect("batch writer stats mutex poisoned") = stats.clone();
    };

    loop {
        match rx.recv_timeout(FLUSH_TIMEOUT) {
            Ok(BatchCommand::Shutdown) => {
                flush_buffer(&conn, &mut buffer, &mut stats)?;
                publish(&stats, &shared_stats);
                break;
            }
            Ok(BatchCommand::Flush) => {
                flush_buffer(&conn, &mut buffer, &mut stats)?;
                publish(&stats, &shared_stats);
            }
            Ok(BatchCommand::FlushSync(done_tx)) => {
                flush_buffer(&conn, &mut buffer, &mut stats)?;
                publish(&stats, &shared_stats);
                let _ = done_tx.send(());
            }
            Ok(cmd) => {
                buffer.push(cmd);
                if buffer.len() >= BATCH_SIZE {
                    flush_buffer(&conn, &mut buffer, &mut stats)?;
                    publish(&stats, &shared_stats);
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if !buffer.is_empty() {
                    flush_buffer(&conn, &mut buffer, &mut stats)?;
                    publish(&stats, &shared_stats);
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                flush_buffer(&conn, &mut buffer, &mut stats)?;
                publish(&stats, &shared_stats);
                break;
            }
        }
    }

    Ok(stats)
}

fn flush_buffer(
    conn: &Connection,
    buffer: &mut Vec<BatchCommand>,
    stats: &mut WriteStats,
) -> Result<(), StorageError> {
    if buffer.is_empty() {
        return Ok(());
    }

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| StorageError::SqliteError { message: format!("begin transaction: {e}") })?;

    // Tracked separately and only folded into `stats` after a successful commit.
    let mut batch_stats = WriteStats::default();

    // Iterate by reference — the buffer is NOT cleared until commit succeeds, so
    // a failed insert rolls the transaction back and leaves the buffer for retry.
    for cmd in buffer.iter() {
        match cmd {
            BatchCommand::UpsertFileMetadata(rows) => {
                upsert_file_metadata(&tx, rows)?;
                batch_stats.file_metadata_rows += rows.len();
            }
            BatchCommand::InsertParseCache(rows) => {
                insert_parse_cache(&tx, rows)?;
                batch_stats.parse_cache_rows += rows.len();
            }
            BatchCommand::InsertFunctions(rows) => {
                insert_functions(&tx, rows)?;
                batch_stats.function_rows += rows.len();
            }
            BatchCommand::DeleteFileMetadata(paths) => {
                delete_file_metadata(&tx, paths)?;
            }
            BatchCommand::InsertCallEdges(rows) => {
                insert_call_edges(&tx, rows)?;
                batch_stats.call_edge_rows += rows.len();
            }
            BatchCommand::InsertDetections(rows) => {
                insert_detections(&tx, rows)?;
                batch_stats.detection_rows += rows.len();
            }
            BatchCommand::InsertBoundaries(rows) => {
                insert_boundaries(&tx, rows)?;
                batch_stats.boundary_rows += rows.len();
            }
            BatchCommand::InsertPatternConfidence(rows) => {
                insert_pattern_confidence(&tx, rows)?;
                batch_stats.pattern_confidence_rows += rows.len();
            }
            BatchCommand::InsertOutliers(rows) => {
                insert_outlier_rows(&tx, rows)?;
                batch_stats.outlier_rows += rows.len();
            }
            BatchCommand::InsertConventions(rows) => {
                insert_convention_rows(&tx, rows)?;
                batch_stats.convention_rows += rows.len();
            }
            BatchCommand::InsertScanHistory(rows) => {
                insert_scan_history_rows(&tx, rows)?;
                batch_stats.scan_history_rows += rows.len();
            }
            BatchCommand::InsertViolations(rows) => {
                insert_violations(&tx, rows)?;
                batch_stats.violation_rows += rows.len();
            }
            BatchCommand::InsertCryptoFindings(rows) => {
                insert_crypto_findings(&tx, rows)?;
                batch_stats.crypto_finding_rows += rows.len();
            }
            BatchCommand::InsertContracts(rows) => {
                insert_contracts(&tx, rows)?;
                batch_stats.contract_rows += rows.len();
            }
            BatchCommand::InsertContractMismatches(rows) => {
                insert_contract_mismatches(&tx, rows)?;
                batch_stats.contract_mismatch_rows += rows.len();
            }
            BatchCommand::Flush | BatchCommand::FlushSync(_) | BatchCommand::Shutdown => {}
        }
    }

    tx.commit().map_err(|e| StorageError::SqliteError { message: format!("commit: {e}") })?;

    // Commit succeeded — clear buffer and merge stats.
    buffer.clear();
    stats.file_metadata_rows += batch_stats.file_metadata_rows;
    stats.parse_cache_rows += batch_stats.parse_cache_rows;
    stats.function_rows += batch_stats.function_rows;
    stats.call_edge_rows += batch_stats.call_edge_rows;
    stats.detection_rows += batch_stats.detection_rows;
    stats.boundary_rows += batch_stats.boundary_rows;
    stats.pattern_confidence_rows += batch_stats.pattern_confidence_rows;
    stats.outlier_rows += batch_stats.outlier_rows;
    stats.convention_rows += batch_stats.convention_rows;
    stats.scan_history_rows += batch_stats.scan_history_rows;
    stats.violation_rows += batch_stats.violation_rows;
    stats.crypto_finding_rows += batch_stats.crypto_finding_rows;
    stats.contract_rows += batch_stats.contract_rows;
    stats.contract_mismatch_rows += batch_stats.contract_mismatch_rows;

    Ok(())
}

fn upsert_file_metadata(conn: &Connection, rows: &[FileMetadataRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO file_metadata
             (path, language, file_size, content_hash, mtime_secs, mtime_nanos,
              last_scanned_at, scan_duration_us)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(path) DO UPDATE SET
                 language = excluded.language, file_size = excluded.file_size,
                 content_hash = excluded.content_hash, mtime_secs = excluded.mtime_secs,
                 mtime_nanos = excluded.mtime_nanos, last_scanned_at = excluded.last_scanned_at,
                 scan_duration_us = excluded.scan_duration_us",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![
            row.path, row.language, row.file_size, row.content_hash,
            row.mtime_secs, row.mtime_nanos, row.last_scanned_at, row.scan_duration_us,
        ])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_parse_cache(conn: &Connection, rows: &[ParseCacheRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT OR REPLACE INTO parse_cache
             (content_hash, language, parse_result_json, created_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![row.content_hash, row.language, row.parse_result_json, row.created_at])
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_functions(conn: &Connection, rows: &[FunctionRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO functions
             (file, name, qualified_name, language, line, end_line,
              parameter_count, return_type, is_exported, is_async,
              body_hash, signature_hash)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![
            row.file, row.name, row.qualified_name, row.language, row.line, row.end_line,
            row.parameter_count, row.return_type, row.is_exported, row.is_async,
            row.body_hash, row.signature_hash,
        ])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn delete_file_metadata(conn: &Connection, paths: &[String]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached("DELETE FROM file_metadata WHERE path = ?1")
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for path in paths {
        stmt.execute(rusqlite::params![path])
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_call_edges(conn: &Connection, rows: &[CallEdgeRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO call_edges
             (caller_id, callee_id, resolution, confidence, call_site_line)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![row.caller_id, row.callee_id, row.resolution, row.confidence, row.call_site_line])
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_detections(conn: &Connection, rows: &[DetectionRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO detections
             (file, line, column_num, pattern_id, category, confidence,
              detection_method, cwe_ids, owasp, matched_text)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![
            row.file, row.line, row.column_num, row.pattern_id,
            row.category, row.confidence, row.detection_method,
            row.cwe_ids, row.owasp, row.matched_text,
        ])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_boundaries(conn: &Connection, rows: &[BoundaryRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO boundaries
             (file, framework, model_name, table_name, field_name, sensitivity, confidence)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![
            row.file, row.framework, row.model_name, row.table_name,
            row.field_name, row.sensitivity, row.confidence,
        ])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_pattern_confidence(conn: &Connection, rows: &[PatternConfidenceRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO pattern_confidence
             (pattern_id, alpha, beta, posterior_mean, credible_interval_low,
              credible_interval_high, tier, momentum)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(pattern_id) DO UPDATE SET
                 alpha = excluded.alpha, beta = excluded.beta,
                 posterior_mean = excluded.posterior_mean,
                 credible_interval_low = excluded.credible_interval_low,
                 credible_interval_high = excluded.credible_interval_high,
                 tier = excluded.tier, momentum = excluded.momentum",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![
            row.pattern_id, row.alpha, row.beta, row.posterior_mean,
            row.credible_interval_low, row.credible_interval_high,
            row.tier, row.momentum,
        ])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_outlier_rows(conn: &Connection, rows: &[OutlierDetectionRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO outliers
             (pattern_id, file, line, deviation_score, significance, method)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![row.pattern_id, row.file, row.line, row.deviation_score, row.significance, row.method])
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_convention_rows(conn: &Connection, rows: &[ConventionInsertRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO conventions
             (pattern_id, category, scope, dominance_ratio, promotion_status,
              discovered_at, last_seen, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![
            row.pattern_id, row.category, row.scope, row.dominance_ratio,
            row.promotion_status, row.discovered_at, row.last_seen, row.expires_at,
        ])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_scan_history_rows(conn: &Connection, rows: &[ScanHistoryInsertRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO scan_history (started_at, root_path, status) VALUES (?1, ?2, 'running')")
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![row.started_at, row.root_path])
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_violations(conn: &Connection, rows: &[ViolationInsertRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT OR REPLACE INTO violations
             (id, file, line, column_num, end_line, end_column, severity,
              pattern_id, rule_id, message, quick_fix_strategy, quick_fix_description,
              cwe_id, owasp_category, suppressed, is_new)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![
            row.id, row.file, row.line, row.column_num,
            row.end_line, row.end_column, row.severity,
            row.pattern_id, row.rule_id, row.message,
            row.quick_fix_strategy, row.quick_fix_description,
            row.cwe_id, row.owasp_category, row.suppressed, row.is_new,
        ])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_crypto_findings(conn: &Connection, rows: &[CryptoFindingInsertRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO crypto_findings
             (pattern_id, file, line, category, description, evidence, confidence,
              cwe_id, additional_cwe_ids, owasp, remediation, remediation_snippet,
              language, library, algorithm, security_context, severity, content_hash)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![
            row.pattern_id, row.file, row.line, row.category, row.description, row.evidence,
            row.confidence, row.cwe_id, row.additional_cwe_ids, row.owasp, row.remediation,
            row.remediation_snippet, row.language, row.library, row.algorithm,
            row.security_context, row.severity, row.content_hash,
        ])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_contracts(conn: &Connection, rows: &[ContractInsertRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT OR REPLACE INTO contracts
             (id, paradigm, service_name, status, confidence, provenance_json,
              operations_json, types_json, consumers_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![
            row.id, row.paradigm, row.service_name, row.status, row.confidence,
            row.provenance_json, row.operations_json, row.types_json, row.consumers_json,
        ])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}

fn insert_contract_mismatches(conn: &Connection, rows: &[ContractMismatchInsertRow]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO contract_mismatches
             (contract_id, field_path, mismatch_type, severity, description, provider_value, consumer_value)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    for row in rows {
        stmt.execute(rusqlite::params![
            row.contract_id, row.field_path, row.mismatch_type,
            row.severity, row.description, row.provider_value, row.consumer_value,
        ])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    }
    Ok(())
}
