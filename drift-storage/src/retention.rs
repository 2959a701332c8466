//! Retention sweeps for scan history and learned conventions.
//!
//! Per-scan frequency entries are retained for 90 days or 100 entries,
//! whichever is smaller (applied here to `scan_history`, the only per-scan
//! frequency record this schema keeps — there is no separate per-pattern
//! frequency-history table in scope). Conventions unobserved past
//! `expiry_days` are marked Stale; past `expiry_days + 30` they're deleted.

use drift_core::errors::StorageError;
use rusqlite::{params, Connection};

/// Default convention expiry window: unchanged from the last observation
/// for this many days before the convention is considered stale.
pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// Additional grace period past `expiry_days` before a stale convention is
/// deleted outright rather than just excluded from enforcement.
const STALE_GRACE_DAYS: i64 = 30;

/// Scan history frequency retention window, in days.
const SCAN_HISTORY_RETENTION_DAYS: i64 = 90;

/// Scan history frequency retention cap, in entries.
const SCAN_HISTORY_MAX_ENTRIES: i64 = 100;

const SECS_PER_DAY: i64 = 86_400;

fn sqe(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

/// Outcome of a single retention sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RetentionStats {
    pub conventions_marked_stale: usize,
    pub conventions_deleted: usize,
    pub scan_history_pruned: usize,
}

/// Mark conventions unobserved since `now - expiry_days` as Stale, and
/// delete conventions unobserved since `now - (expiry_days + 30)` outright.
/// `now` is epoch seconds, passed in rather than read from the clock so
/// callers (and tests) control it deterministically.
pub fn apply_convention_retention(
    conn: &Connection,
    now: i64,
    expiry_days: i64,
) -> Result<RetentionStats, StorageError> {
    let stale_cutoff = now - expiry_days * SECS_PER_DAY;
    let delete_cutoff = now - (expiry_days + STALE_GRACE_DAYS) * SECS_PER_DAY;

    let conventions_deleted = conn
        .execute(
            "DELETE FROM conventions WHERE last_seen < ?1",
            params![delete_cutoff],
        )
        .map_err(sqe)?;

    let conventions_marked_stale = conn
        .execute(
            "UPDATE conventions SET promotion_status = 'Stale'
             WHERE last_seen < ?1 AND last_seen >= ?2 AND promotion_status != 'Stale'",
            params![stale_cutoff, delete_cutoff],
        )
        .map_err(sqe)?;

    Ok(RetentionStats {
        conventions_marked_stale,
        conventions_deleted,
        scan_history_pruned: 0,
    })
}

/// Prune `scan_history` down to the smaller of a 90-day window or the most
/// recent 100 entries. A row survives only if it satisfies both bounds.
pub fn prune_scan_history(conn: &Connection, now: i64) -> Result<usize, StorageError> {
    let age_cutoff = now - SCAN_HISTORY_RETENTION_DAYS * SECS_PER_DAY;
    conn.execute(
        "DELETE FROM scan_history
         WHERE started_at < ?1
            OR id NOT IN (
                SELECT id FROM (
                    SELECT id, ROW_NUMBER() OVER (ORDER BY started_at DESC) AS rn
                    FROM scan_history
                ) WHERE rn <= ?2
            )",
        params![age_cutoff, SCAN_HISTORY_MAX_ENTRIES],
    )
    .map_err(sqe)
}

/// Run both sweeps and return combined stats. Intended to be called once
/// per completed scan, after `scan_history` has recorded its own entry.
pub fn run_retention_sweep(
    conn: &Connection,
    now: i64,
    expiry_days: i64,
) -> Result<RetentionStats, StorageError> {
    let mut stats = apply_convention_retention(conn, now, expiry_days)?;
    stats.scan_history_pruned = prune_scan_history(conn, now)?;
    Ok(stats)
}
