//! functions table queries.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection, OptionalExtension};

/// A function record from the database.
#[derive(Debug, Clone)]
pub struct FunctionRecord {
    pub id: i64,
    pub file: String,
    pub name: String,
    pub qualified_name: Option<String>,
    pub language: String,
    pub line: i64,
    pub end_line: i64,
    pub parameter_count: i64,
    pub return_type: Option<String>,
    pub is_exported: bool,
    pub is_async: bool,
    pub body_hash: Option<Vec<u8>>,
    pub signature_hash: Option<Vec<u8>>,
}

fn sqe(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

const SELECT_COLUMNS: &str = "id, file, name, qualified_name, language, line, end_line,
     parameter_count, return_type, is_exported, is_async, body_hash, signature_hash";

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FunctionRecord> {
    Ok(FunctionRecord {
        id: row.get(0)?,
        file: row.get(1)?,
        name: row.get(2)?,
        qualified_name: row.get(3)?,
        language: row.get(4)?,
        line: row.get(5)?,
        end_line: row.get(6)?,
        parameter_count: row.get(7)?,
        return_type: row.get(8)?,
        is_exported: row.get(9)?,
        is_async: row.get(10)?,
        body_hash: row.get(11)?,
        signature_hash: row.get(12)?,
    })
}

/// Insert a batch of function rows for a file.
pub fn insert_functions(
    conn: &Connection,
    rows: &[crate::batch::commands::FunctionRow],
) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO functions
             (file, name, qualified_name, language, line, end_line,
              parameter_count, return_type, is_exported, is_async,
              body_hash, signature_hash)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )
        .map_err(sqe)?;
    for row in rows {
        stmt.execute(params![
            row.file, row.name, row.qualified_name, row.language, row.line, row.end_line,
            row.parameter_count, row.return_type, row.is_exported, row.is_async,
            row.body_hash, row.signature_hash,
        ])
        .map_err(sqe)?;
    }
    Ok(())
}

/// Get all functions for a given file.
pub fn get_functions_by_file(conn: &Connection, file: &str) -> Result<Vec<FunctionRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {SELECT_COLUMNS} FROM functions WHERE file = ?1 ORDER BY line"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![file], map_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Get a function by its qualified name.
pub fn get_function_by_qualified_name(
    conn: &Connection,
    qualified_name: &str,
) -> Result<Option<FunctionRecord>, StorageError> {
    conn.query_row(
        &format!("SELECT {SELECT_COLUMNS} FROM functions WHERE qualified_name = ?1"),
        params![qualified_name],
        map_row,
    )
    .optional()
    .map_err(sqe)
}

/// Delete all functions for a given file. Returns the count removed.
pub fn delete_functions_by_file(conn: &Connection, file: &str) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM functions WHERE file = ?1", params![file]).map_err(sqe)
}

/// Count total functions.
pub fn count_functions(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM functions", [], |r| r.get(0)).map_err(sqe)
}

/// Count entry point functions — those with zero incoming call edges.
pub fn count_entry_points(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM functions f
         WHERE NOT EXISTS (SELECT 1 FROM call_edges e WHERE e.callee_id = f.id)",
        [],
        |r| r.get(0),
    )
    .map_err(sqe)
}
