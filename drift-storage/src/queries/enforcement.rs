//! violations and feedback table queries.

use drift_core::errors::StorageError;
use drift_core::traits::storage::drift_enforcement::{FeedbackRow, FeedbackStats, ViolationRow};
use rusqlite::{params, Connection, OptionalExtension};

fn sqe(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError { message: e.to_string() }
}

// ─── violations ─────────────────────────────────────────────────────

const VIOLATION_COLUMNS: &str = "id, file, line, column_num, end_line, end_column, severity,
     pattern_id, rule_id, message, quick_fix_strategy, quick_fix_description,
     cwe_id, owasp_category, suppressed, is_new";

fn map_violation_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ViolationRow> {
    Ok(ViolationRow {
        id: row.get(0)?,
        file: row.get(1)?,
        line: row.get(2)?,
        column: row.get(3)?,
        end_line: row.get(4)?,
        end_column: row.get(5)?,
        severity: row.get(6)?,
        pattern_id: row.get(7)?,
        rule_id: row.get(8)?,
        message: row.get(9)?,
        quick_fix_strategy: row.get(10)?,
        quick_fix_description: row.get(11)?,
        cwe_id: row.get(12)?,
        owasp_category: row.get(13)?,
        suppressed: row.get(14)?,
        is_new: row.get(15)?,
    })
}

/// Insert or replace a violation.
pub fn insert_violation(conn: &Connection, v: &ViolationRow) -> Result<(), StorageError> {
    conn.execute(
        "INSERT OR REPLACE INTO violations
             (id, file, line, column_num, end_line, end_column, severity,
              pattern_id, rule_id, message, quick_fix_strategy, quick_fix_description,
              cwe_id, owasp_category, suppressed, is_new)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            v.id, v.file, v.line, v.column, v.end_line, v.end_column, v.severity,
            v.pattern_id, v.rule_id, v.message, v.quick_fix_strategy, v.quick_fix_description,
            v.cwe_id, v.owasp_category, v.suppressed, v.is_new,
        ],
    )
    .map(|_| ())
    .map_err(sqe)
}

/// Query violations for a given file.
pub fn query_violations_by_file(conn: &Connection, file: &str) -> Result<Vec<ViolationRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {VIOLATION_COLUMNS} FROM violations WHERE file = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![file], map_violation_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Query all violations.
pub fn query_all_violations(conn: &Connection) -> Result<Vec<ViolationRow>, StorageError> {
    let mut stmt = conn.prepare_cached(&format!("SELECT {VIOLATION_COLUMNS} FROM violations")).map_err(sqe)?;
    let rows = stmt.query_map([], map_violation_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Look up the pattern id a violation was raised for.
pub fn get_violation_pattern_id(conn: &Connection, violation_id: &str) -> Result<Option<String>, StorageError> {
    conn.query_row(
        "SELECT pattern_id FROM violations WHERE id = ?1",
        params![violation_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(sqe)
}

/// Count violations awaiting a feedback decision (not suppressed, no feedback yet).
pub fn count_needs_review(conn: &Connection) -> Result<u32, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM violations v
         WHERE v.suppressed = 0
           AND NOT EXISTS (SELECT 1 FROM feedback f WHERE f.violation_id = v.id)",
        [],
        |row| row.get::<_, i64>(0),
    )
    .map(|n| n as u32)
    .map_err(sqe)
}

// ─── feedback ───────────────────────────────────────────────────────

const FEEDBACK_COLUMNS: &str =
    "violation_id, pattern_id, detector_id, action, dismissal_reason, reason, author, created_at";

fn map_feedback_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FeedbackRow> {
    Ok(FeedbackRow {
        violation_id: row.get(0)?,
        pattern_id: row.get(1)?,
        detector_id: row.get(2)?,
        action: row.get(3)?,
        dismissal_reason: row.get(4)?,
        reason: row.get(5)?,
        author: row.get(6)?,
        created_at: row.get::<_, i64>(7)? as u64,
    })
}

/// Insert a feedback event.
pub fn insert_feedback(conn: &Connection, f: &FeedbackRow) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO feedback
             (violation_id, pattern_id, detector_id, action, dismissal_reason, reason, author, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            f.violation_id, f.pattern_id, f.detector_id, f.action,
            f.dismissal_reason, f.reason, f.author, f.created_at as i64,
        ],
    )
    .map(|_| ())
    .map_err(sqe)
}

/// Query feedback events raised for a given detector.
pub fn query_feedback_by_detector(conn: &Connection, detector_id: &str) -> Result<Vec<FeedbackRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE detector_id = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![detector_id], map_feedback_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Query feedback events for a given pattern.
pub fn query_feedback_by_pattern(conn: &Connection, pattern_id: &str) -> Result<Vec<FeedbackRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE pattern_id = ?1"))
        .map_err(sqe)?;
    let rows = stmt.query_map(params![pattern_id], map_feedback_row).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe)).collect()
}

/// Posterior adjustments implied by feedback on a pattern: one `(alpha_delta,
/// beta_delta)` pair per event, in chronological order. Fix/Useful nudge
/// alpha up; Dismiss/NotUseful nudge beta up — the confidence scorer folds
/// these into the next posterior update.
pub fn query_feedback_adjustments(conn: &Connection, pattern_id: &str) -> Result<Vec<(f64, f64)>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT action FROM feedback WHERE pattern_id = ?1 ORDER BY created_at")
        .map_err(sqe)?;
    let rows = stmt
        .query_map(params![pattern_id], |row| row.get::<_, String>(0))
        .map_err(sqe)?;

    let mut adjustments = Vec::new();
    for action in rows {
        let action = action.map_err(sqe)?;
        adjustments.push(match action.as_str() {
            "Fix" | "Useful" => (1.0, 0.0),
            "Dismiss" | "NotUseful" => (0.0, 1.0),
            _ => (0.0, 0.0),
        });
    }
    Ok(adjustments)
}

/// Aggregate feedback action counts.
pub fn query_feedback_stats(conn: &Connection) -> Result<FeedbackStats, StorageError> {
    conn.query_row(
        "SELECT
             COUNT(*),
             SUM(CASE WHEN action = 'Fix' THEN 1 ELSE 0 END),
             SUM(CASE WHEN action = 'Dismiss' THEN 1 ELSE 0 END),
             SUM(CASE WHEN action = 'Suppress' THEN 1 ELSE 0 END),
             SUM(CASE WHEN action = 'Escalate' THEN 1 ELSE 0 END)
         FROM feedback",
        [],
        |row| {
            Ok(FeedbackStats {
                total_count: row.get::<_, i64>(0)? as u32,
                fix_count: row.get::<_, Option<i64>>(1)?.unwrap_or(0) as u32,
                dismiss_count: row.get::<_, Option<i64>>(2)?.unwrap_or(0) as u32,
                suppress_count: row.get::<_, Option<i64>>(3)?.unwrap_or(0) as u32,
                escalate_count: row.get::<_, Option<i64>>(4)?.unwrap_or(0) as u32,
            })
        },
    )
    .map_err(sqe)
}
