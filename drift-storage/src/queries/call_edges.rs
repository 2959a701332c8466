//! call_edges table queries.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

/// A call edge record.
#[derive(Debug, Clone)]
pub struct CallEdgeRecord {
    pub caller_id: i64,
    pub callee_id: i64,
    pub resolution: String,
    pub confidence: f64,
    pub call_site_line: i64,
}

fn sqe(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CallEdgeRecord> {
    Ok(CallEdgeRecord {
        caller_id: row.get(0)?,
        callee_id: row.get(1)?,
        resolution: row.get(2)?,
        confidence: row.get(3)?,
        call_site_line: row.get(4)?,
    })
}

const SELECT_COLUMNS: &str = "caller_id, callee_id, resolution, confidence, call_site_line";

/// Insert a batch of call edges.
pub fn insert_call_edges(
    conn: &Connection,
    rows: &[crate::batch::commands::CallEdgeRow],
) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO call_edges (caller_id, callee_id, resolution, confidence, call_site_line)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(sqe)?;
    for row in rows {
        stmt.execute(params![row.caller_id, row.callee_id, row.resolution, row.confidence, row.call_site_line])
            .map_err(sqe)?;
    }
    Ok(())
}

/// Get all edges where the given function is the caller.
pub fn get_edges_by_caller(conn: &Connection, caller_id: i64) -> Result<Vec<CallEdgeRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {SELECT_COLUMNS} FROM call_edges WHERE caller_id = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![caller_id], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Get all edges where the given function is the callee.
pub fn get_edges_by_callee(conn: &Connection, callee_id: i64) -> Result<Vec<CallEdgeRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {SELECT_COLUMNS} FROM call_edges WHERE callee_id = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![callee_id], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Delete all edges involving functions from a given file.
pub fn delete_edges_by_file(conn: &Connection, file: &str) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM call_edges WHERE caller_id IN (SELECT id FROM functions WHERE file = ?1)
            OR callee_id IN (SELECT id FROM functions WHERE file = ?1)",
        params![file],
    )
    .map_err(sqe)
}

/// Count total call edges.
pub fn count_call_edges(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM call_edges", [], |r| r.get(0)).map_err(sqe)
}

/// Count edges with non-fuzzy resolution (i.e. resolution != 'fuzzy').
pub fn count_resolved_edges(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM call_edges WHERE resolution != 'fuzzy'", [], |r| r.get(0))
        .map_err(sqe)
}
