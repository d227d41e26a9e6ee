//! SQLite persistence for the Selva monitoring engine.
//!
//! Layout follows one module per concern: `connection` (open, pragmas,
//! write transactions), `migrations` (versioned schema), `queries` (free
//! functions over `&Connection`, one file per table).

pub mod connection;
pub mod migrations;
pub mod queries;
