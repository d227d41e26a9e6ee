//! Queries for the scopes table. Geometry round-trips through JSON.

use geo_types::MultiPolygon;
use rusqlite::{params, Connection, OptionalExtension};
use selva_core::errors::StorageError;
use selva_core::types::{now_micros, Scope, ScopeKind};

/// Administrative import: upsert a scope by name. Geometry and kind are
/// replaced on conflict (scopes are rarely mutated, but re-imports must
/// converge). Returns the row id.
pub fn import(
    conn: &Connection,
    name: &str,
    kind: ScopeKind,
    geometry: &MultiPolygon<f64>,
) -> Result<i64, StorageError> {
    let blob = serde_json::to_string(geometry).map_err(|e| StorageError::MalformedRow {
        table: "scopes".to_string(),
        message: format!("geometry not serializable: {e}"),
    })?;
    conn.execute(
        "INSERT INTO scopes (name, kind, geometry, created_at) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(name) DO UPDATE SET kind = excluded.kind, geometry = excluded.geometry",
        params![name, kind.code(), blob, now_micros()],
    )?;
    let id = conn.query_row(
        "SELECT id FROM scopes WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// All known scopes, ordered by id.
pub fn list_all(conn: &Connection) -> Result<Vec<Scope>, StorageError> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name, kind, geometry FROM scopes ORDER BY id")?;
    let raw = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    raw.into_iter().map(from_raw).collect()
}

/// Look up a scope by id.
pub fn find(conn: &Connection, id: i64) -> Result<Option<Scope>, StorageError> {
    let raw = conn
        .query_row(
            "SELECT id, name, kind, geometry FROM scopes WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;
    raw.map(from_raw).transpose()
}

fn from_raw((id, name, kind, geometry): (i64, String, String, String)) -> Result<Scope, StorageError> {
    let kind = ScopeKind::from_code(&kind).ok_or_else(|| StorageError::MalformedRow {
        table: "scopes".to_string(),
        message: format!("unknown scope kind '{kind}'"),
    })?;
    let geometry: MultiPolygon<f64> =
        serde_json::from_str(&geometry).map_err(|e| StorageError::MalformedRow {
            table: "scopes".to_string(),
            message: format!("geometry blob: {e}"),
        })?;
    Ok(Scope { id, name, kind, geometry })
}
