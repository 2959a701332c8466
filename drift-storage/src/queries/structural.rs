//! contracts, contract_mismatches, and crypto_findings table queries.
//!
//! Operates directly on the `IDriftStructural` row types rather than a
//! parallel `*Record` set — those rows already mirror the table columns
//! one-to-one, so an extra conversion layer would only add noise.

use drift_core::errors::StorageError;
use drift_core::traits::storage::drift_structural::{ContractMismatchRow, ContractRow, CryptoFindingRow};
use rusqlite::{params, Connection, OptionalExtension};

fn sqe(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

// ─── contracts ──────────────────────────────────────────────────────

const CONTRACT_COLUMNS: &str =
    "id, paradigm, service_name, status, confidence, provenance_json, operations_json, types_json, consumers_json";

fn map_contract_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContractRow> {
    Ok(ContractRow {
        id: row.get(0)?,
        paradigm: row.get(1)?,
        service_name: row.get(2)?,
        status: row.get(3)?,
        confidence: row.get(4)?,
        provenance_json: row.get(5)?,
        operations_json: row.get(6)?,
        types_json: row.get(7)?,
        consumers_json: row.get(8)?,
    })
}

/// Insert or replace a contract.
pub fn upsert_contract(conn: &Connection, row: &ContractRow) -> Result<(), StorageError> {
    conn.execute(
        "INSERT OR REPLACE INTO contracts
             (id, paradigm, service_name, status, confidence, provenance_json,
              operations_json, types_json, consumers_json)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            row.id, row.paradigm, row.service_name, row.status, row.confidence,
            row.provenance_json, row.operations_json, row.types_json, row.consumers_json,
        ],
    )
    .map(|_| ())
    .map_err(sqe)
}

/// Get a single contract by id.
pub fn get_contract(conn: &Connection, id: &str) -> Result<Option<ContractRow>, StorageError> {
    conn.query_row(
        &format!("SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = ?1"),
        params![id],
        map_contract_row,
    )
    .optional()
    .map_err(sqe)
}

/// Get contracts for a given paradigm (REST/GraphQL/gRPC).
pub fn get_contracts_by_paradigm(conn: &Connection, paradigm: &str) -> Result<Vec<ContractRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {CONTRACT_COLUMNS} FROM contracts WHERE paradigm = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![paradigm], map_contract_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

// ─── contract_mismatches ────────────────────────────────────────────

const MISMATCH_COLUMNS: &str =
    "id, contract_id, field_path, mismatch_type, severity, description, provider_value, consumer_value, created_at";

fn map_mismatch_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContractMismatchRow> {
    Ok(ContractMismatchRow {
        id: row.get(0)?,
        contract_id: row.get(1)?,
        field_path: row.get(2)?,
        mismatch_type: row.get(3)?,
        severity: row.get(4)?,
        description: row.get(5)?,
        provider_value: row.get(6)?,
        consumer_value: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// Insert a contract mismatch.
pub fn insert_contract_mismatch(conn: &Connection, row: &ContractMismatchRow) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO contract_mismatches
             (contract_id, field_path, mismatch_type, severity, description, provider_value, consumer_value)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            row.contract_id, row.field_path, row.mismatch_type, row.severity,
            row.description, row.provider_value, row.consumer_value,
        ],
    )
    .map(|_| ())
    .map_err(sqe)
}

/// Query all contract mismatches.
pub fn query_contract_mismatches(conn: &Connection) -> Result<Vec<ContractMismatchRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {MISMATCH_COLUMNS} FROM contract_mismatches"))
        .map_err(sqe)?;
    let rows = stmt.query_map([], map_mismatch_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Query contract mismatches of a given type.
pub fn query_contract_mismatches_by_type(
    conn: &Connection,
    mismatch_type: &str,
) -> Result<Vec<ContractMismatchRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {MISMATCH_COLUMNS} FROM contract_mismatches WHERE mismatch_type = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![mismatch_type], map_mismatch_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

// ─── crypto_findings ────────────────────────────────────────────────

const CRYPTO_COLUMNS: &str = "id, pattern_id, file, line, category, description, evidence, confidence,
     cwe_id, additional_cwe_ids, owasp, remediation, remediation_snippet, language,
     library, algorithm, security_context, severity, content_hash";

fn map_crypto_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CryptoFindingRow> {
    Ok(CryptoFindingRow {
        id: row.get(0)?,
        pattern_id: row.get(1)?,
        file: row.get(2)?,
        line: row.get(3)?,
        category: row.get(4)?,
        description: row.get(5)?,
        evidence: row.get(6)?,
        confidence: row.get(7)?,
        cwe_id: row.get(8)?,
        additional_cwe_ids: row.get(9)?,
        owasp: row.get(10)?,
        remediation: row.get(11)?,
        remediation_snippet: row.get(12)?,
        language: row.get(13)?,
        library: row.get(14)?,
        algorithm: row.get(15)?,
        security_context: row.get(16)?,
        severity: row.get(17)?,
        content_hash: row.get(18)?,
    })
}

/// Insert a crypto finding. Returns the inserted row id.
pub fn insert_crypto_finding(conn: &Connection, row: &CryptoFindingRow) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO crypto_findings
             (pattern_id, file, line, category, description, evidence, confidence,
              cwe_id, additional_cwe_ids, owasp, remediation, remediation_snippet,
              language, library, algorithm, security_context, severity, content_hash)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
        params![
            row.pattern_id, row.file, row.line, row.category, row.description, row.evidence,
            row.confidence, row.cwe_id, row.additional_cwe_ids, row.owasp, row.remediation,
            row.remediation_snippet, row.language, row.library, row.algorithm,
            row.security_context, row.severity, row.content_hash,
        ],
    )
    .map_err(sqe)?;
    Ok(conn.last_insert_rowid())
}

/// Query all crypto findings.
pub fn query_crypto_findings(conn: &Connection) -> Result<Vec<CryptoFindingRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {CRYPTO_COLUMNS} FROM crypto_findings"))
        .map_err(sqe)?;
    let rows = stmt.query_map([], map_crypto_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Get crypto findings for a given file.
pub fn get_crypto_findings_by_file(conn: &Connection, file: &str) -> Result<Vec<CryptoFindingRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {CRYPTO_COLUMNS} FROM crypto_findings WHERE file = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![file], map_crypto_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Get crypto findings for a given category (e.g. "weak-cipher", "hardcoded-key").
pub fn get_crypto_findings_by_category(conn: &Connection, category: &str) -> Result<Vec<CryptoFindingRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {CRYPTO_COLUMNS} FROM crypto_findings WHERE category = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![category], map_crypto_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}
