//! Core types, rule contract, errors, config, and logging for the Selva
//! ecological-change monitoring engine.

pub mod config;
pub mod errors;
pub mod logging;
pub mod rules;
pub mod types;
