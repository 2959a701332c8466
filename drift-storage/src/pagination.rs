//! Keyset pagination helpers.
//!
//! Offset-based `LIMIT/OFFSET` pagination degrades linearly with offset on
//! large tables; every paginated query in this crate instead seeks from the
//! last key of the previous page (`WHERE key > ?`), which stays a single
//! index lookup regardless of how deep the pagination goes.

/// Appends the `WHERE key > ?` / `LIMIT ?` clauses a keyset-paginated query
/// needs, given the previous page's last key (if any).
///
/// Callers build the rest of the query (`SELECT ... FROM t WHERE <filter>`)
/// and pass it in as `base`; this returns the full SQL plus whether an
/// `after_key` bind parameter must be supplied before `limit`.
pub fn seek_clause(base: &str, has_filter: bool, after_key: Option<&str>, order_by: &str) -> String {
    let mut sql = base.to_string();
    let connector = if has_filter { "AND" } else { "WHERE" };
    if after_key.is_some() {
        sql.push_str(&format!(" {connector} pattern_id > ?"));
    }
    sql.push_str(&format!(" ORDER BY {order_by} LIMIT ?"));
    sql
}
