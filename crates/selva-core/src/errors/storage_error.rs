//! Storage subsystem errors.

/// Errors raised by the SQLite persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration to version {version} failed: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Malformed row in {table}: {message}")]
    MalformedRow { table: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::SqliteError { message: e.to_string() }
    }
}
