//! parse_cache table queries.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection, OptionalExtension};

/// A cached parse result record.
#[derive(Debug, Clone)]
pub struct ParseCacheRecord {
    pub content_hash: Vec<u8>,
    pub language: String,
    pub parse_result_json: String,
    pub created_at: i64,
}

fn sqe(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

/// Get a cached parse result by content hash.
pub fn get_by_hash(
    conn: &Connection,
    content_hash: &[u8],
) -> Result<Option<ParseCacheRecord>, StorageError> {
    conn.query_row(
        "SELECT content_hash, language, parse_result_json, created_at
         FROM parse_cache WHERE content_hash = ?1",
        params![content_hash],
        |row| {
            Ok(ParseCacheRecord {
                content_hash: row.get(0)?,
                language: row.get(1)?,
                parse_result_json: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(sqe)
}

/// Insert or replace a parse cache entry.
pub fn insert(
    conn: &Connection,
    content_hash: &[u8],
    language: &str,
    parse_result_json: &str,
    created_at: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT OR REPLACE INTO parse_cache (content_hash, language, parse_result_json, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![content_hash, language, parse_result_json, created_at],
    )
    .map(|_| ())
    .map_err(sqe)
}

/// Invalidate (remove) a cache entry by content hash.
pub fn invalidate(conn: &Connection, content_hash: &[u8]) -> Result<(), StorageError> {
    conn.execute("DELETE FROM parse_cache WHERE content_hash = ?1", params![content_hash])
        .map(|_| ())
        .map_err(sqe)
}

/// Count entries in the parse cache.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM parse_cache", [], |r| r.get(0))
        .map_err(sqe)
}
