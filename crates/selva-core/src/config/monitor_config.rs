//! Top-level monitor configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::{MaskKind, MaskSource};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Project config (`selva.toml`)
/// 2. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    pub database: DatabaseConfig,
    pub masks: MasksConfig,
    pub projection: ProjectionConfig,
    pub notifications: NotificationConfig,
}

impl MonitorConfig {
    /// Load configuration from a TOML file, falling back to defaults for
    /// any section the file omits.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }
}

/// Storage location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("selva.db") }
    }
}

/// Which (source, kind) mask families the aggregator processes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MasksConfig {
    pub sources: Vec<MaskSelector>,
}

impl Default for MasksConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                MaskSelector { source: MaskSource::Sentinel2, kind: MaskKind::Vegetation },
                MaskSelector { source: MaskSource::PeruSat1, kind: MaskKind::LandUse },
            ],
        }
    }
}

/// One enabled mask family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskSelector {
    pub source: MaskSource,
    pub kind: MaskKind,
}

/// Equal-area projection parameters for area computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Central meridian of the sinusoidal projection, in degrees.
    /// Default is centered on the Peruvian coast.
    pub central_meridian_deg: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self { central_meridian_deg: -75.0 }
    }
}

/// Email notification hook switch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
