//! Query modules: free functions over `&Connection`, one file per table.

pub mod alerts;
pub mod checks;
pub mod measurements;
pub mod readings;
pub mod rules;
pub mod scopes;
pub mod stations;
pub mod users;
