//! Queries for the users table.

use rusqlite::{params, Connection, OptionalExtension};
use selva_core::errors::StorageError;
use selva_core::types::{now_micros, User};

/// Insert a user. Returns the row id.
pub fn insert(
    conn: &Connection,
    name: &str,
    email: &str,
    notify_by_email: bool,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO users (name, email, notify_by_email, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![name, email, notify_by_email, now_micros()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Look up a user by id.
pub fn find(conn: &Connection, id: i64) -> Result<Option<User>, StorageError> {
    let user = conn
        .query_row(
            "SELECT id, name, email, notify_by_email FROM users WHERE id = ?1",
            params![id],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    notify_by_email: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(user)
}
