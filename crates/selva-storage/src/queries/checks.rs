//! The checkpoint tracker: per-tier append-only logs of check
//! timestamps.

use rusqlite::{params, Connection, OptionalExtension};
use selva_core::errors::StorageError;
use selva_core::types::{now_micros, CheckTier, Window};

/// Open a check window for one tier.
///
/// Inserts exactly one alert_checks row and returns the half-open
/// window [previous checkpoint of this tier, new checkpoint). The
/// tier's first call ever starts at `i64::MIN` ("all history"). When
/// two calls land in the same microsecond the new checkpoint is bumped
/// to previous + 1 so a tier's window ends stay strictly increasing.
///
/// Each tier keeps its own sequence; sibling tiers running inside the
/// same transaction never shrink each other's windows. Must run inside
/// the same transaction as all downstream mutations, so a failed run
/// rolls its checkpoints back and the retry reuses the same stale
/// windows.
pub fn open_window(conn: &Connection, tier: CheckTier) -> Result<Window, StorageError> {
    let previous = latest(conn, tier)?;
    let now = now_micros();
    let end = match previous {
        Some(p) => now.max(p + 1),
        None => now,
    };
    conn.execute(
        "INSERT INTO alert_checks (tier, created_at) VALUES (?1, ?2)",
        params![tier.code(), end],
    )?;
    Ok(Window { start: previous.unwrap_or(i64::MIN), end })
}

/// Creation timestamp of one tier's most recent checkpoint, if any.
pub fn latest(conn: &Connection, tier: CheckTier) -> Result<Option<i64>, StorageError> {
    let latest = conn
        .query_row(
            "SELECT created_at FROM alert_checks
             WHERE tier = ?1 ORDER BY created_at DESC, id DESC LIMIT 1",
            params![tier.code()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(latest)
}

/// Total checkpoint rows across all tiers.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    let n = conn.query_row("SELECT COUNT(*) FROM alert_checks", [], |row| row.get(0))?;
    Ok(n)
}
