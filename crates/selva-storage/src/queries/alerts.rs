//! Queries for the alerts table. Rows are immutable after insert apart
//! from `last_seen_at` (acknowledgement tracking).

use rusqlite::{params, Connection, OptionalExtension};
use selva_core::errors::StorageError;
use selva_core::types::{Alert, CandidateRef, RuleRef};

/// Insert an alert with its frozen rule snapshot. Returns the row id.
pub fn insert(
    conn: &Connection,
    user_id: i64,
    rule: RuleRef,
    candidate: CandidateRef,
    rule_attributes: &serde_json::Value,
    value: f64,
    created_at: i64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO alerts
             (user_id, rule_kind, rule_id, candidate_kind, candidate_id, rule_attributes,
              value, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            rule.kind_code(),
            rule.rule_id(),
            candidate.kind_code(),
            candidate.candidate_id(),
            rule_attributes.to_string(),
            value,
            created_at
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Look up an alert by id.
pub fn find(conn: &Connection, id: i64) -> Result<Option<Alert>, StorageError> {
    let raw = conn
        .query_row(
            "SELECT id, user_id, rule_kind, rule_id, candidate_kind, candidate_id,
                    rule_attributes, value, created_at, last_seen_at
             FROM alerts WHERE id = ?1",
            params![id],
            map_raw,
        )
        .optional()?;
    raw.map(from_raw).transpose()
}

/// Most recent alerts, newest first.
pub fn recent(conn: &Connection, limit: usize) -> Result<Vec<Alert>, StorageError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, rule_kind, rule_id, candidate_kind, candidate_id,
                rule_attributes, value, created_at, last_seen_at
         FROM alerts ORDER BY created_at DESC, id DESC LIMIT ?1",
    )?;
    let raw = stmt
        .query_map(params![limit as i64], map_raw)?
        .collect::<Result<Vec<_>, _>>()?;
    raw.into_iter().map(from_raw).collect()
}

/// Alerts raised in creation order (for audits and tests).
pub fn all_ordered(conn: &Connection) -> Result<Vec<Alert>, StorageError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, rule_kind, rule_id, candidate_kind, candidate_id,
                rule_attributes, value, created_at, last_seen_at
         FROM alerts ORDER BY id",
    )?;
    let raw = stmt.query_map([], map_raw)?.collect::<Result<Vec<_>, _>>()?;
    raw.into_iter().map(from_raw).collect()
}

/// Acknowledge an alert. Touches nothing but last_seen_at.
pub fn mark_seen(conn: &Connection, id: i64, seen_at: i64) -> Result<(), StorageError> {
    conn.execute("UPDATE alerts SET last_seen_at = ?1 WHERE id = ?2", params![seen_at, id])?;
    Ok(())
}

/// Total alert rows.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    let n = conn.query_row("SELECT COUNT(*) FROM alerts", [], |row| row.get(0))?;
    Ok(n)
}

type RawAlert = (i64, i64, String, i64, String, i64, String, f64, i64, Option<i64>);

fn map_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawAlert> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
    ))
}

fn from_raw(raw: RawAlert) -> Result<Alert, StorageError> {
    let (id, user_id, rule_kind, rule_id, candidate_kind, candidate_id, attributes, value, created_at, last_seen_at) =
        raw;
    let malformed =
        |message: String| StorageError::MalformedRow { table: "alerts".to_string(), message };
    Ok(Alert {
        id,
        user_id,
        rule: RuleRef::from_parts(&rule_kind, rule_id)
            .ok_or_else(|| malformed(format!("unknown rule kind '{rule_kind}'")))?,
        candidate: CandidateRef::from_parts(&candidate_kind, candidate_id)
            .ok_or_else(|| malformed(format!("unknown candidate kind '{candidate_kind}'")))?,
        rule_attributes: serde_json::from_str(&attributes)
            .map_err(|e| malformed(format!("rule_attributes blob: {e}")))?,
        value,
        created_at,
        last_seen_at,
    })
}
