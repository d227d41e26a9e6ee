//! Pipeline errors and non-fatal error collection.

use super::{AlertError, ConfigError, GeometryError, StorageError};

/// Errors that abort a pipeline invocation.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Alert error: {0}")]
    Alert(#[from] AlertError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result of a batch that accumulates non-fatal errors.
/// Lets the measurement aggregator return partial results when some
/// scopes fail geometry computation.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the batch.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    /// Create a new result with no errors.
    pub fn new(data: T) -> Self {
        Self { data, errors: Vec::new() }
    }

    /// Add a non-fatal error.
    pub fn add_error(&mut self, error: PipelineError) {
        self.errors.push(error);
    }

    /// Returns true if no non-fatal errors were collected.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of non-fatal errors collected.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
