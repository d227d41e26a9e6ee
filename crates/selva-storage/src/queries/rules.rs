//! Queries for the three rule-tier tables. Every owner's rules are
//! loaded on every run; rules are never scoped to one invocation.

use rusqlite::{params, Connection};
use selva_core::errors::StorageError;
use selva_core::rules::{ChangeType, ParameterRule, ScopeKindRule, ScopeRule};
use selva_core::types::{now_micros, MaskSource, ScopeKind};

/// Insert a parameter rule. `station_id = None` is the wildcard.
pub fn insert_parameter(
    conn: &Connection,
    user_id: i64,
    station_id: Option<i64>,
    parameter: &str,
    is_absolute: bool,
    valid_min: f64,
    valid_max: f64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO parameter_rules
             (user_id, station_id, parameter, is_absolute, valid_min, valid_max, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![user_id, station_id, parameter, is_absolute, valid_min, valid_max, now_micros()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update a parameter rule's bounds. Historical alerts keep their frozen
/// snapshot regardless.
pub fn update_parameter_bounds(
    conn: &Connection,
    id: i64,
    valid_min: f64,
    valid_max: f64,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE parameter_rules SET valid_min = ?1, valid_max = ?2 WHERE id = ?3",
        params![valid_min, valid_max, id],
    )?;
    Ok(())
}

/// All parameter rules, station names joined in for descriptions.
pub fn all_parameter(conn: &Connection) -> Result<Vec<ParameterRule>, StorageError> {
    let mut stmt = conn.prepare_cached(
        "SELECT r.id, r.user_id, r.station_id, s.name, r.parameter, r.is_absolute,
                r.valid_min, r.valid_max
         FROM parameter_rules r LEFT JOIN stations s ON s.id = r.station_id
         ORDER BY r.id",
    )?;
    let rules = stmt
        .query_map([], |row| {
            Ok(ParameterRule {
                id: row.get(0)?,
                user_id: row.get(1)?,
                station_id: row.get(2)?,
                station_name: row.get(3)?,
                parameter: row.get(4)?,
                is_absolute: row.get(5)?,
                valid_min: row.get(6)?,
                valid_max: row.get(7)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rules)
}

/// Insert a scope rule.
pub fn insert_scope(
    conn: &Connection,
    user_id: i64,
    scope_id: i64,
    source: MaskSource,
    change_type: ChangeType,
    is_absolute: bool,
    valid_min: f64,
    valid_max: f64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO scope_rules
             (user_id, scope_id, source, change_type, is_absolute, valid_min, valid_max,
              created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            scope_id,
            source.code(),
            change_type.code(),
            is_absolute,
            valid_min,
            valid_max,
            now_micros()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All scope rules, scope names joined in for descriptions.
pub fn all_scope(conn: &Connection) -> Result<Vec<ScopeRule>, StorageError> {
    let mut stmt = conn.prepare_cached(
        "SELECT r.id, r.user_id, r.scope_id, s.name, r.source, r.change_type, r.is_absolute,
                r.valid_min, r.valid_max
         FROM scope_rules r JOIN scopes s ON s.id = r.scope_id
         ORDER BY r.id",
    )?;
    let raw = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, bool>(6)?,
                row.get::<_, f64>(7)?,
                row.get::<_, f64>(8)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|(id, user_id, scope_id, scope_name, source, change_type, is_absolute, valid_min, valid_max)| {
            Ok(ScopeRule {
                id,
                user_id,
                scope_id,
                scope_name,
                source: parse_source(&source, "scope_rules")?,
                change_type: parse_change_type(&change_type, "scope_rules")?,
                is_absolute,
                valid_min,
                valid_max,
            })
        })
        .collect()
}

/// Insert a scope-kind rule.
pub fn insert_scope_kind(
    conn: &Connection,
    user_id: i64,
    scope_kind: ScopeKind,
    source: MaskSource,
    change_type: ChangeType,
    is_absolute: bool,
    valid_min: f64,
    valid_max: f64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO scope_kind_rules
             (user_id, scope_kind, source, change_type, is_absolute, valid_min, valid_max,
              created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            scope_kind.code(),
            source.code(),
            change_type.code(),
            is_absolute,
            valid_min,
            valid_max,
            now_micros()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All scope-kind rules.
pub fn all_scope_kind(conn: &Connection) -> Result<Vec<ScopeKindRule>, StorageError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, scope_kind, source, change_type, is_absolute, valid_min, valid_max
         FROM scope_kind_rules ORDER BY id",
    )?;
    let raw = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, bool>(5)?,
                row.get::<_, f64>(6)?,
                row.get::<_, f64>(7)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|(id, user_id, scope_kind, source, change_type, is_absolute, valid_min, valid_max)| {
            Ok(ScopeKindRule {
                id,
                user_id,
                scope_kind: ScopeKind::from_code(&scope_kind).ok_or_else(|| {
                    StorageError::MalformedRow {
                        table: "scope_kind_rules".to_string(),
                        message: format!("unknown scope kind '{scope_kind}'"),
                    }
                })?,
                source: parse_source(&source, "scope_kind_rules")?,
                change_type: parse_change_type(&change_type, "scope_kind_rules")?,
                is_absolute,
                valid_min,
                valid_max,
            })
        })
        .collect()
}

fn parse_source(code: &str, table: &str) -> Result<MaskSource, StorageError> {
    MaskSource::from_code(code).ok_or_else(|| StorageError::MalformedRow {
        table: table.to_string(),
        message: format!("unknown source '{code}'"),
    })
}

fn parse_change_type(code: &str, table: &str) -> Result<ChangeType, StorageError> {
    ChangeType::from_code(code).ok_or_else(|| StorageError::MalformedRow {
        table: table.to_string(),
        message: format!("unknown change_type '{code}'"),
    })
}
