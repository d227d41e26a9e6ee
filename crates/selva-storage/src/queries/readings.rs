//! Queries for the readings table, including the delta-mode lag lookup.

use rusqlite::{params, Connection, OptionalExtension};
use selva_core::errors::StorageError;
use selva_core::types::{Reading, Window};

/// Insert a reading. Returns the row id.
pub fn insert(
    conn: &Connection,
    station_id: i64,
    attributes: &serde_json::Map<String, serde_json::Value>,
    created_at: i64,
) -> Result<i64, StorageError> {
    let blob = serde_json::Value::Object(attributes.clone()).to_string();
    conn.execute(
        "INSERT INTO readings (station_id, attributes, created_at) VALUES (?1, ?2, ?3)",
        params![station_id, blob, created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Readings created inside the half-open window [start, end), in time
/// order.
pub fn in_window(conn: &Connection, window: &Window) -> Result<Vec<Reading>, StorageError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, station_id, attributes, created_at FROM readings
         WHERE created_at >= ?1 AND created_at < ?2
         ORDER BY created_at, id",
    )?;
    let raw = stmt
        .query_map(params![window.start, window.end], map_raw)?
        .collect::<Result<Vec<_>, _>>()?;
    raw.into_iter().map(from_raw).collect()
}

/// The reading immediately preceding `before` for one station, over all
/// history. This is the lag-by-one lookup delta rules depend on; a
/// `None` result means the delta baseline is 0.0.
pub fn prior(
    conn: &Connection,
    station_id: i64,
    before: i64,
) -> Result<Option<Reading>, StorageError> {
    let raw = conn
        .query_row(
            "SELECT id, station_id, attributes, created_at FROM readings
             WHERE station_id = ?1 AND created_at < ?2
             ORDER BY created_at DESC, id DESC LIMIT 1",
            params![station_id, before],
            map_raw,
        )
        .optional()?;
    raw.map(from_raw).transpose()
}

type RawReading = (i64, i64, String, i64);

fn map_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawReading> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn from_raw((id, station_id, attributes, created_at): RawReading) -> Result<Reading, StorageError> {
    let attributes: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&attributes).map_err(|e| StorageError::MalformedRow {
            table: "readings".to_string(),
            message: format!("attributes blob: {e}"),
        })?;
    Ok(Reading { id, station_id, attributes, created_at })
}
