//! Configuration loading errors.

/// Errors raised while loading a `selva.toml` configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Invalid TOML in {path}: {message}")]
    ParseError { path: String, message: String },
}
