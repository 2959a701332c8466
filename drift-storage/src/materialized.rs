//! Generated columns — deterministic virtual projections over existing
//! tables, computed from sibling columns on the same row (SQLite
//! `GENERATED ALWAYS AS (...) VIRTUAL`). These exist so downstream readers
//! (the bridge's `IDriftReader` queries, NAPI summaries) can filter/sort on
//! a derived condition without duplicating the expression in every query
//! site — the schema is the single source of truth for what "strong",
//! "high severity", or "has a fix" means.
//!
//! Applied as migration v3; see `migrations.rs`.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

/// Generated-column migration, applied once as schema v3.
///
/// SQLite only allows adding a generated column via `ALTER TABLE ... ADD
/// COLUMN ... GENERATED ALWAYS AS (...)`, and the expression must be
/// deterministic — no `unixepoch()`/`random()`, only the row's own columns.
pub const MIGRATION_V003: &str = "
ALTER TABLE pattern_confidence ADD COLUMN interval_width REAL
    GENERATED ALWAYS AS (credible_interval_high - credible_interval_low) VIRTUAL;

ALTER TABLE contracts ADD COLUMN is_established INTEGER
    GENERATED ALWAYS AS (CASE WHEN status = 'Established' THEN 1 ELSE 0 END) VIRTUAL;

ALTER TABLE crypto_findings ADD COLUMN is_high_severity INTEGER
    GENERATED ALWAYS AS (CASE WHEN severity IN ('Critical', 'High') THEN 1 ELSE 0 END) VIRTUAL;

ALTER TABLE violations ADD COLUMN has_quick_fix INTEGER
    GENERATED ALWAYS AS (CASE WHEN quick_fix_strategy IS NOT NULL THEN 1 ELSE 0 END) VIRTUAL;
";

fn sqe(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

/// Posterior credible-interval width for a pattern — narrower means the
/// Beta-Binomial posterior has converged on more observations.
pub fn interval_width(conn: &Connection, pattern_id: &str) -> Result<Option<f64>, StorageError> {
    conn.query_row(
        "SELECT interval_width FROM pattern_confidence WHERE pattern_id = ?1",
        params![pattern_id],
        |row| row.get(0),
    )
    .optional_()
}

/// Count of contracts currently in the `Established` lifecycle state.
pub fn count_established_contracts(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM contracts WHERE is_established = 1", [], |row| row.get(0))
        .map_err(sqe)
}

/// Count of crypto findings at Critical/High severity for a file.
pub fn count_high_severity_crypto_findings(conn: &Connection, file: &str) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM crypto_findings WHERE file = ?1 AND is_high_severity = 1",
        params![file],
        |row| row.get(0),
    )
    .map_err(sqe)
}

/// Count of open violations that already carry a quick-fix strategy.
pub fn count_violations_with_quick_fix(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM violations WHERE suppressed = 0 AND has_quick_fix = 1",
        [],
        |row| row.get(0),
    )
    .map_err(sqe)
}

trait OptionalRow<T> {
    fn optional_(self) -> Result<Option<T>, StorageError>;
}

impl<T> OptionalRow<T> for rusqlite::Result<T> {
    fn optional_(self) -> Result<Option<T>, StorageError> {
        use rusqlite::OptionalExtension;
        self.optional().map_err(sqe)
    }
}
