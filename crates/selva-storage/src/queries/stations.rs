//! Queries for the stations table.

use rusqlite::{params, Connection, OptionalExtension};
use selva_core::errors::StorageError;
use selva_core::types::{now_micros, Station};

/// Insert a station. Returns the row id.
pub fn insert(conn: &Connection, name: &str) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO stations (name, created_at) VALUES (?1, ?2)",
        params![name, now_micros()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Look up a station by id.
pub fn find(conn: &Connection, id: i64) -> Result<Option<Station>, StorageError> {
    let station = conn
        .query_row(
            "SELECT id, name FROM stations WHERE id = ?1",
            params![id],
            |row| Ok(Station { id: row.get(0)?, name: row.get(1)? }),
        )
        .optional()?;
    Ok(station)
}
