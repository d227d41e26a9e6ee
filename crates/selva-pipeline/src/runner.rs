//! One full monitor cycle: the entry point an external scheduler
//! invokes. Opens the configured database, ingests the enabled coverage
//! masks, then evaluates the three rule tiers.

use selva_core::config::MonitorConfig;
use selva_core::errors::PipelineError;
use selva_core::types::CoverageMask;
use selva_storage::connection;

use crate::aggregator::generate_measurements_for_enabled_masks;
use crate::engine::{run_checks, CheckSummary};
use crate::geometry::AreaService;
use crate::notify::Notifier;

/// Outcome of one monitor cycle.
#[derive(Debug)]
pub struct CycleReport {
    /// Scopes successfully measured across all enabled masks.
    pub measured: usize,
    /// Per-scope measurement failures that were logged and skipped.
    pub measurement_errors: usize,
    pub checks: CheckSummary,
}

/// Run one cycle against the database named in the config.
///
/// Measurement aggregation commits first; the alert check then runs in
/// its own transaction and picks the fresh measurements up through its
/// windows. A fatal error in either stage aborts the cycle with that
/// stage's transaction rolled back.
pub fn run_cycle(
    config: &MonitorConfig,
    masks: &[CoverageMask],
    notifier: &dyn Notifier,
) -> Result<CycleReport, PipelineError> {
    let conn = connection::open(&config.database.path)?;
    let service = AreaService::new(&config.projection);

    let measurements =
        generate_measurements_for_enabled_masks(&conn, &service, &config.masks, masks)?;
    let checks = run_checks(&conn, config, notifier)?;

    Ok(CycleReport {
        measured: measurements.data.len(),
        measurement_errors: measurements.error_count(),
        checks,
    })
}
