//! Queries for coverage_measurements: idempotent upsert, window scan,
//! and the per-partition lag lookup.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use selva_core::errors::StorageError;
use selva_core::types::{CoverageMeasurement, MaskKind, MaskSource, ScopeKind, Window};

/// Upsert a measurement keyed by (date, scope, source, kind).
/// Recomputation overwrites area/perc_area only; created_at keeps its
/// first-insert value so a reprocessed row never re-enters a later
/// alert window. Returns the row id.
pub fn upsert(
    conn: &Connection,
    date: NaiveDate,
    scope_id: i64,
    source: MaskSource,
    kind: MaskKind,
    area: f64,
    perc_area: f64,
    created_at: i64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO coverage_measurements
             (date, scope_id, source, kind, area, perc_area, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(date, scope_id, source, kind)
         DO UPDATE SET area = excluded.area, perc_area = excluded.perc_area",
        params![
            date.to_string(),
            scope_id,
            source.code(),
            kind.code(),
            area,
            perc_area,
            created_at
        ],
    )?;
    let id = conn.query_row(
        "SELECT id FROM coverage_measurements
         WHERE date = ?1 AND scope_id = ?2 AND source = ?3 AND kind = ?4",
        params![date.to_string(), scope_id, source.code(), kind.code()],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Measurements created inside the half-open window [start, end), in
/// time order, with the owning scope's kind joined in for kind-tier
/// narrowing.
pub fn in_window(
    conn: &Connection,
    window: &Window,
) -> Result<Vec<CoverageMeasurement>, StorageError> {
    let mut stmt = conn.prepare_cached(
        "SELECT m.id, m.date, m.scope_id, s.kind, m.source, m.kind, m.area, m.perc_area,
                m.created_at
         FROM coverage_measurements m JOIN scopes s ON s.id = m.scope_id
         WHERE m.created_at >= ?1 AND m.created_at < ?2
         ORDER BY m.created_at, m.id",
    )?;
    let raw = stmt
        .query_map(params![window.start, window.end], map_raw)?
        .collect::<Result<Vec<_>, _>>()?;
    raw.into_iter().map(from_raw).collect()
}

/// The measurement immediately preceding `before` in the same partition
/// (scope, source, kind), over all history. Delta rules narrow by source
/// already; partitioning by the full family keeps deltas from mixing
/// mask kinds.
pub fn prior(
    conn: &Connection,
    scope_id: i64,
    source: MaskSource,
    kind: MaskKind,
    before: i64,
) -> Result<Option<CoverageMeasurement>, StorageError> {
    let raw = conn
        .query_row(
            "SELECT m.id, m.date, m.scope_id, s.kind, m.source, m.kind, m.area, m.perc_area,
                    m.created_at
             FROM coverage_measurements m JOIN scopes s ON s.id = m.scope_id
             WHERE m.scope_id = ?1 AND m.source = ?2 AND m.kind = ?3 AND m.created_at < ?4
             ORDER BY m.created_at DESC, m.id DESC LIMIT 1",
            params![scope_id, source.code(), kind.code(), before],
            map_raw,
        )
        .optional()?;
    raw.map(from_raw).transpose()
}

/// Look up one measurement by its natural key.
pub fn get(
    conn: &Connection,
    date: NaiveDate,
    scope_id: i64,
    source: MaskSource,
    kind: MaskKind,
) -> Result<Option<CoverageMeasurement>, StorageError> {
    let raw = conn
        .query_row(
            "SELECT m.id, m.date, m.scope_id, s.kind, m.source, m.kind, m.area, m.perc_area,
                    m.created_at
             FROM coverage_measurements m JOIN scopes s ON s.id = m.scope_id
             WHERE m.date = ?1 AND m.scope_id = ?2 AND m.source = ?3 AND m.kind = ?4",
            params![date.to_string(), scope_id, source.code(), kind.code()],
            map_raw,
        )
        .optional()?;
    raw.map(from_raw).transpose()
}

/// Total measurement rows.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    let n = conn.query_row("SELECT COUNT(*) FROM coverage_measurements", [], |row| row.get(0))?;
    Ok(n)
}

type RawMeasurement = (i64, String, i64, String, String, String, f64, f64, i64);

fn map_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawMeasurement> {
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
    ))
}

fn from_raw(raw: RawMeasurement) -> Result<CoverageMeasurement, StorageError> {
    let (id, date, scope_id, scope_kind, source, kind, area, perc_area, created_at) = raw;
    let malformed = |message: String| StorageError::MalformedRow {
        table: "coverage_measurements".to_string(),
        message,
    };
    Ok(CoverageMeasurement {
        id,
        date: date.parse().map_err(|e| malformed(format!("date '{date}': {e}")))?,
        scope_id,
        scope_kind: ScopeKind::from_code(&scope_kind)
            .ok_or_else(|| malformed(format!("unknown scope kind '{scope_kind}'")))?,
        source: MaskSource::from_code(&source)
            .ok_or_else(|| malformed(format!("unknown source '{source}'")))?,
        kind: MaskKind::from_code(&kind)
            .ok_or_else(|| malformed(format!("unknown kind '{kind}'")))?,
        area,
        perc_area,
        created_at,
    })
}
