//! Versioned schema migrations, tracked via `PRAGMA user_version`.

pub mod v001_initial;

use rusqlite::Connection;
use selva_core::errors::StorageError;

const MIGRATIONS: &[(u32, &str)] = &[(1, v001_initial::MIGRATION_SQL)];

/// Apply all migrations newer than the database's current version.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current: u32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    for &(version, sql) in MIGRATIONS {
        if version <= current {
            continue;
        }
        conn.execute_batch(sql)
            .map_err(|e| StorageError::MigrationFailed { version, message: e.to_string() })?;
        conn.pragma_update(None, "user_version", version)?;
        tracing::debug!(version, "applied migration");
    }
    Ok(())
}
