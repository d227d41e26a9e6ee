//! Error handling for Selva.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod alert_error;
pub mod config_error;
pub mod geometry_error;
pub mod pipeline_error;
pub mod storage_error;

pub use alert_error::AlertError;
pub use config_error::ConfigError;
pub use geometry_error::GeometryError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use storage_error::StorageError;
