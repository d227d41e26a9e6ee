//! Write transactions: BEGIN IMMEDIATE, auto-rollback on error.

use rusqlite::{Connection, Transaction, TransactionBehavior};
use selva_core::errors::StorageError;

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
/// Acquires the write lock at transaction start, preventing SQLITE_BUSY
/// surprises mid-run. On error the transaction rolls back in full,
/// including any checkpoint rows inserted by the closure, so a retried
/// run reuses the same stale window instead of silently skipping data.
pub fn with_immediate_transaction<F, T, E>(conn: &Connection, f: F) -> Result<T, E>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    E: From<StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(|e| {
        StorageError::SqliteError { message: format!("failed to begin immediate transaction: {e}") }
    })?;

    // A closure error drops the transaction, which rolls it back.
    let result = f(&tx)?;

    tx.commit()
        .map_err(|e| StorageError::SqliteError { message: format!("failed to commit: {e}") })?;

    Ok(result)
}
