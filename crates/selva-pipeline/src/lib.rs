//! The measurement aggregation and alert-evaluation pipeline.
//!
//! `aggregator` turns classified coverage masks into per-scope area
//! measurements; `engine` evaluates the three rule tiers over newly
//! created data and hands out-of-bounds values to `alerts`, which
//! materializes immutable alert records and queues the notification
//! hook. `runner` ties both stages into the one cycle an external
//! scheduler invokes.

pub mod aggregator;
pub mod alerts;
pub mod engine;
pub mod geometry;
pub mod notify;
pub mod runner;

pub use aggregator::{
    generate_measurements, generate_measurements_for_all_scopes,
    generate_measurements_for_enabled_masks, ComputedCoverage,
};
pub use engine::{run_checks, CheckSummary, TierSummary};
pub use geometry::{AreaService, Coverage, SinusoidalProjection};
pub use notify::{LogNotifier, Notifier, NotifyError, PendingNotification};
pub use runner::{run_cycle, CycleReport};
