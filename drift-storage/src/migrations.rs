//! Forward-only schema migrations, tracked via `PRAGMA user_version`.
//!
//! Each migration is a single idempotent-on-fresh-db SQL batch. Migrations
//! never get rewritten once shipped — a new behavior change ships as a new
//! version and `run_migrations` replays every version above the db's current
//! one, in order, inside one transaction per version.

use drift_core::errors::StorageError;
use rusqlite::Connection;

/// Latest schema version this build knows how to produce.
pub const LATEST_VERSION: u32 = 3;

/// Read `PRAGMA user_version`.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .map(|v| v as u32)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

fn set_version(conn: &Connection, version: u32) -> Result<(), StorageError> {
    conn.pragma_update(None, "user_version", version)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Apply every migration above the database's current version, in order.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let mut version = current_version(conn)?;

    if version < 1 {
        apply(conn, 1, MIGRATION_V001)?;
        version = 1;
    }
    if version < 2 {
        apply(conn, 2, MIGRATION_V002)?;
        version = 2;
    }
    if version < 3 {
        apply(conn, 3, crate::materialized::MIGRATION_V003)?;
        version = 3;
    }

    Ok(())
}

fn apply(conn: &Connection, version: u32, sql: &str) -> Result<(), StorageError> {
    conn.execute_batch(sql)
        .map_err(|e| StorageError::MigrationFailed { version, message: e.to_string() })?;
    set_version(conn, version)
}

/// v001 — core file/parse/analysis tables: file metadata, parse cache,
/// functions, call edges, detections, boundaries, pattern posteriors,
/// outliers, conventions, scan history.
const MIGRATION_V001: &str = "
CREATE TABLE IF NOT EXISTS file_metadata (
    path             TEXT PRIMARY KEY,
    language         TEXT,
    file_size        INTEGER NOT NULL,
    content_hash     BLOB NOT NULL,
    mtime_secs       INTEGER NOT NULL,
    mtime_nanos      INTEGER NOT NULL,
    last_scanned_at  INTEGER NOT NULL,
    scan_duration_us INTEGER,
    pattern_count    INTEGER NOT NULL DEFAULT 0,
    function_count   INTEGER NOT NULL DEFAULT 0,
    error_count      INTEGER NOT NULL DEFAULT 0,
    error            TEXT
);

CREATE TABLE IF NOT EXISTS parse_cache (
    content_hash       BLOB PRIMARY KEY,
    language           TEXT NOT NULL,
    parse_result_json  TEXT NOT NULL,
    created_at         INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS functions (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    file             TEXT NOT NULL,
    name             TEXT NOT NULL,
    qualified_name   TEXT,
    language         TEXT NOT NULL,
    line             INTEGER NOT NULL,
    end_line         INTEGER NOT NULL,
    parameter_count  INTEGER NOT NULL,
    return_type      TEXT,
    is_exported      INTEGER NOT NULL DEFAULT 0,
    is_async         INTEGER NOT NULL DEFAULT 0,
    body_hash        BLOB,
    signature_hash   BLOB
);
CREATE INDEX IF NOT EXISTS idx_functions_file ON functions(file);
CREATE INDEX IF NOT EXISTS idx_functions_qualified_name ON functions(qualified_name);

CREATE TABLE IF NOT EXISTS call_edges (
    caller_id       INTEGER NOT NULL,
    callee_id       INTEGER NOT NULL,
    resolution      TEXT NOT NULL,
    confidence      REAL NOT NULL,
    call_site_line  INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_call_edges_caller ON call_edges(caller_id);
CREATE INDEX IF NOT EXISTS idx_call_edges_callee ON call_edges(callee_id);

CREATE TABLE IF NOT EXISTS detections (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    file              TEXT NOT NULL,
    line              INTEGER NOT NULL,
    column_num        INTEGER NOT NULL,
    pattern_id        TEXT NOT NULL,
    category          TEXT NOT NULL,
    confidence        REAL NOT NULL,
    detection_method  TEXT NOT NULL,
    cwe_ids           TEXT,
    owasp             TEXT,
    matched_text      TEXT,
    created_at        INTEGER NOT NULL DEFAULT (unixepoch())
);
CREATE INDEX IF NOT EXISTS idx_detections_file ON detections(file);
CREATE INDEX IF NOT EXISTS idx_detections_category ON detections(category);
CREATE INDEX IF NOT EXISTS idx_detections_pattern_id ON detections(pattern_id);

CREATE TABLE IF NOT EXISTS boundaries (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    file         TEXT NOT NULL,
    framework    TEXT NOT NULL,
    model_name   TEXT NOT NULL,
    table_name   TEXT,
    field_name   TEXT,
    sensitivity  TEXT,
    confidence   REAL NOT NULL,
    created_at   INTEGER NOT NULL DEFAULT (unixepoch())
);
CREATE INDEX IF NOT EXISTS idx_boundaries_file ON boundaries(file);
CREATE INDEX IF NOT EXISTS idx_boundaries_framework ON boundaries(framework);

CREATE TABLE IF NOT EXISTS pattern_confidence (
    pattern_id              TEXT PRIMARY KEY,
    alpha                   REAL NOT NULL,
    beta                    REAL NOT NULL,
    posterior_mean          REAL NOT NULL,
    credible_interval_low   REAL NOT NULL,
    credible_interval_high  REAL NOT NULL,
    tier                    TEXT NOT NULL,
    momentum                TEXT NOT NULL,
    last_updated            INTEGER NOT NULL DEFAULT (unixepoch())
);
CREATE INDEX IF NOT EXISTS idx_pattern_confidence_tier ON pattern_confidence(tier, pattern_id);

CREATE TABLE IF NOT EXISTS outliers (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern_id        TEXT NOT NULL,
    file              TEXT NOT NULL,
    line              INTEGER NOT NULL,
    deviation_score   REAL NOT NULL,
    significance      TEXT NOT NULL,
    method            TEXT NOT NULL,
    created_at        INTEGER NOT NULL DEFAULT (unixepoch())
);
CREATE INDEX IF NOT EXISTS idx_outliers_pattern_id ON outliers(pattern_id);

CREATE TABLE IF NOT EXISTS conventions (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern_id        TEXT NOT NULL,
    category          TEXT NOT NULL,
    scope             TEXT NOT NULL,
    dominance_ratio   REAL NOT NULL,
    promotion_status  TEXT NOT NULL,
    discovered_at     INTEGER NOT NULL,
    last_seen         INTEGER NOT NULL,
    expires_at        INTEGER
);
CREATE INDEX IF NOT EXISTS idx_conventions_category ON conventions(category);

CREATE TABLE IF NOT EXISTS scan_history (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at       INTEGER NOT NULL,
    completed_at     INTEGER,
    root_path        TEXT NOT NULL,
    total_files      INTEGER,
    added_files      INTEGER,
    modified_files   INTEGER,
    removed_files    INTEGER,
    unchanged_files  INTEGER,
    duration_ms      INTEGER,
    status           TEXT NOT NULL,
    error            TEXT
);
";

/// v002 — enforcement (violations, feedback) and structural intelligence
/// (contracts, contract mismatches, crypto findings).
const MIGRATION_V002: &str = "
CREATE TABLE IF NOT EXISTS violations (
    id                       TEXT PRIMARY KEY,
    file                     TEXT NOT NULL,
    line                     INTEGER NOT NULL,
    column_num               INTEGER,
    end_line                 INTEGER,
    end_column               INTEGER,
    severity                 TEXT NOT NULL,
    pattern_id               TEXT NOT NULL,
    rule_id                  TEXT NOT NULL,
    message                  TEXT NOT NULL,
    quick_fix_strategy       TEXT,
    quick_fix_description    TEXT,
    cwe_id                   INTEGER,
    owasp_category           TEXT,
    suppressed               INTEGER NOT NULL DEFAULT 0,
    is_new                   INTEGER NOT NULL DEFAULT 1,
    created_at               INTEGER NOT NULL DEFAULT (unixepoch())
);
CREATE INDEX IF NOT EXISTS idx_violations_file ON violations(file);
CREATE INDEX IF NOT EXISTS idx_violations_pattern_id ON violations(pattern_id);

CREATE TABLE IF NOT EXISTS feedback (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    violation_id      TEXT NOT NULL,
    pattern_id        TEXT NOT NULL,
    detector_id       TEXT NOT NULL,
    action            TEXT NOT NULL,
    dismissal_reason  TEXT,
    reason            TEXT,
    author            TEXT,
    created_at        INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_feedback_detector ON feedback(detector_id);
CREATE INDEX IF NOT EXISTS idx_feedback_pattern ON feedback(pattern_id);

CREATE TABLE IF NOT EXISTS contracts (
    id                TEXT PRIMARY KEY,
    paradigm          TEXT NOT NULL,
    service_name      TEXT,
    status            TEXT NOT NULL,
    confidence        REAL NOT NULL,
    provenance_json   TEXT NOT NULL,
    operations_json   TEXT NOT NULL,
    types_json        TEXT NOT NULL,
    consumers_json    TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_contracts_paradigm ON contracts(paradigm);

CREATE TABLE IF NOT EXISTS contract_mismatches (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    contract_id     TEXT NOT NULL,
    field_path      TEXT NOT NULL,
    mismatch_type   TEXT NOT NULL,
    severity        TEXT NOT NULL,
    description     TEXT NOT NULL,
    provider_value  TEXT,
    consumer_value  TEXT,
    created_at      INTEGER NOT NULL DEFAULT (unixepoch())
);
CREATE INDEX IF NOT EXISTS idx_contract_mismatches_contract ON contract_mismatches(contract_id);
CREATE INDEX IF NOT EXISTS idx_contract_mismatches_type ON contract_mismatches(mismatch_type);

CREATE TABLE IF NOT EXISTS crypto_findings (
    id                    INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern_id            TEXT NOT NULL,
    file                  TEXT NOT NULL,
    line                  INTEGER NOT NULL,
    category              TEXT NOT NULL,
    description           TEXT NOT NULL,
    evidence              TEXT NOT NULL,
    confidence            REAL NOT NULL,
    cwe_id                INTEGER NOT NULL,
    additional_cwe_ids    TEXT NOT NULL,
    owasp                 TEXT NOT NULL,
    remediation           TEXT NOT NULL,
    remediation_snippet   TEXT,
    language              TEXT NOT NULL,
    library               TEXT,
    algorithm             TEXT,
    security_context      INTEGER NOT NULL DEFAULT 0,
    severity              TEXT NOT NULL,
    content_hash          INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_crypto_findings_file ON crypto_findings(file);
CREATE INDEX IF NOT EXISTS idx_crypto_findings_category ON crypto_findings(category);
CREATE INDEX IF NOT EXISTS idx_crypto_findings_content_hash ON crypto_findings(content_hash);
";
