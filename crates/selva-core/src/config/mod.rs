//! Configuration system for Selva.
//! TOML-based, file > compiled defaults; the resolved struct is passed
//! into pipeline entry points explicitly, never read from globals.

pub mod monitor_config;

pub use monitor_config::{
    DatabaseConfig, MaskSelector, MasksConfig, MonitorConfig, NotificationConfig,
    ProjectionConfig,
};
