//! The measurement aggregator: classified masks in, per-scope coverage
//! measurements out.

use rayon::prelude::*;
use rusqlite::Connection;
use selva_core::config::{MaskSelector, MasksConfig};
use selva_core::errors::{PipelineError, PipelineResult};
use selva_core::types::{now_micros, CoverageMask, Scope};
use selva_storage::connection::writer::with_immediate_transaction;
use selva_storage::queries::{measurements, scopes};

use crate::geometry::AreaService;

/// One successfully measured scope.
#[derive(Debug, Clone, Copy)]
pub struct ComputedCoverage {
    pub scope_id: i64,
    pub area: f64,
    pub perc_area: f64,
}

/// Measure every enabled mask against every known scope.
///
/// A mask whose (source, kind) family is not listed in the masks config
/// is skipped with a debug log; the config is the single switchboard for
/// which families this deployment processes. Results and non-fatal
/// errors from the per-mask batches are merged.
pub fn generate_measurements_for_enabled_masks(
    conn: &Connection,
    service: &AreaService,
    config: &MasksConfig,
    masks: &[CoverageMask],
) -> Result<PipelineResult<Vec<ComputedCoverage>>, PipelineError> {
    let mut result = PipelineResult::new(Vec::new());
    for mask in masks {
        let selector = MaskSelector { source: mask.source, kind: mask.kind };
        if !config.sources.contains(&selector) {
            tracing::debug!(
                date = %mask.date,
                source = mask.source.code(),
                kind = mask.kind.code(),
                "mask family not enabled; skipped"
            );
            continue;
        }
        let batch = generate_measurements_for_all_scopes(conn, service, mask)?;
        result.data.extend(batch.data);
        result.errors.extend(batch.errors);
    }
    Ok(result)
}

/// Measure one mask against every known scope.
pub fn generate_measurements_for_all_scopes(
    conn: &Connection,
    service: &AreaService,
    mask: &CoverageMask,
) -> Result<PipelineResult<Vec<ComputedCoverage>>, PipelineError> {
    let scopes = scopes::list_all(conn)?;
    generate_measurements(conn, service, mask, &scopes)
}

/// Measure one mask against the given scopes and upsert the results.
///
/// Geometry is computed per scope (in parallel); a degenerate scope or
/// a failed intersection is logged, collected as a non-fatal error, and
/// skipped, so one bad geometry never aborts the batch. A degenerate
/// mask aborts the whole batch since no scope could be measured.
/// Writes happen sequentially inside one immediate transaction; rows
/// are upserted by (date, scope, source, kind), so rerunning with an
/// unchanged mask leaves exactly one identical row per scope.
pub fn generate_measurements(
    conn: &Connection,
    service: &AreaService,
    mask: &CoverageMask,
    scopes: &[Scope],
) -> Result<PipelineResult<Vec<ComputedCoverage>>, PipelineError> {
    let projected_mask = service.project_mask(&mask.geometry)?;

    let computed: Vec<_> = scopes
        .par_iter()
        .map(|scope| {
            service.measure(scope, &projected_mask).map(|coverage| ComputedCoverage {
                scope_id: scope.id,
                area: coverage.area,
                perc_area: coverage.perc_area,
            })
        })
        .collect();

    let mut result = PipelineResult::new(Vec::new());
    with_immediate_transaction::<_, _, PipelineError>(conn, |tx| {
        let created_at = now_micros();
        for item in computed {
            match item {
                Ok(c) => {
                    measurements::upsert(
                        tx, mask.date, c.scope_id, mask.source, mask.kind,
                        c.area, c.perc_area, created_at,
                    )?;
                    result.data.push(c);
                }
                Err(e) => {
                    tracing::warn!(
                        date = %mask.date,
                        source = mask.source.code(),
                        kind = mask.kind.code(),
                        error = %e,
                        "scope skipped during measurement"
                    );
                    result.add_error(e.into());
                }
            }
        }
        Ok(())
    })?;

    tracing::info!(
        date = %mask.date,
        source = mask.source.code(),
        kind = mask.kind.code(),
        measured = result.data.len(),
        skipped = result.error_count(),
        "measurement batch complete"
    );
    Ok(result)
}
