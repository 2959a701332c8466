//! boundaries table queries — data-model boundary detections (ORM
//! model fields, sensitivity tags) per spec §3's boundary record.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

/// A boundary record.
#[derive(Debug, Clone)]
pub struct BoundaryRecord {
    pub id: i64,
    pub file: String,
    pub framework: String,
    pub model_name: String,
    pub table_name: Option<String>,
    pub field_name: Option<String>,
    pub sensitivity: Option<String>,
    pub confidence: f64,
    pub created_at: i64,
}

fn sqe(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

const SELECT_COLUMNS: &str =
    "id, file, framework, model_name, table_name, field_name, sensitivity, confidence, created_at";

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BoundaryRecord> {
    Ok(BoundaryRecord {
        id: row.get(0)?,
        file: row.get(1)?,
        framework: row.get(2)?,
        model_name: row.get(3)?,
        table_name: row.get(4)?,
        field_name: row.get(5)?,
        sensitivity: row.get(6)?,
        confidence: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// Insert a batch of boundary records.
pub fn insert_boundaries(
    conn: &Connection,
    rows: &[crate::batch::commands::BoundaryRow],
) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO boundaries (file, framework, model_name, table_name, field_name, sensitivity, confidence)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(sqe)?;
    for row in rows {
        stmt.execute(params![
            row.file, row.framework, row.model_name, row.table_name,
            row.field_name, row.sensitivity, row.confidence,
        ])
        .map_err(sqe)?;
    }
    Ok(())
}

/// Get all boundaries for a given file.
pub fn get_boundaries_by_file(conn: &Connection, file: &str) -> Result<Vec<BoundaryRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {SELECT_COLUMNS} FROM boundaries WHERE file = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![file], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Get all boundaries detected via a given framework.
pub fn get_boundaries_by_framework(conn: &Connection, framework: &str) -> Result<Vec<BoundaryRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {SELECT_COLUMNS} FROM boundaries WHERE framework = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![framework], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Get all boundaries flagged with a sensitivity tag (PII/secret/etc.).
pub fn get_sensitive_boundaries(conn: &Connection) -> Result<Vec<BoundaryRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {SELECT_COLUMNS} FROM boundaries WHERE sensitivity IS NOT NULL"))
        .map_err(sqe)?;
    let rows = stmt.query_map([], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Delete all boundaries for a given file.
pub fn delete_boundaries_by_file(conn: &Connection, file: &str) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM boundaries WHERE file = ?1", params![file]).map_err(sqe)
}

/// Count total boundaries.
pub fn count_boundaries(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM boundaries", [], |r| r.get(0)).map_err(sqe)
}
