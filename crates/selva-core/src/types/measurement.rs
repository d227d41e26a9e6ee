//! Derived per-scope coverage measurements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::mask::{MaskKind, MaskSource};
use super::scope::ScopeKind;

/// Area/percentage fact for one (date, scope, source, kind).
///
/// `perc_area` is `area / scope_area` and is deliberately not clamped to
/// [0, 1]; values above 1 are preserved as a symptom of upstream data
/// issues. `scope_kind` is joined in from the owning scope row when
/// measurements are loaded, so kind-tier rules can narrow without a
/// second lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageMeasurement {
    pub id: i64,
    pub date: NaiveDate,
    pub scope_id: i64,
    pub scope_kind: ScopeKind,
    pub source: MaskSource,
    pub kind: MaskKind,
    /// Intersection area in the planar projection's units (m²).
    pub area: f64,
    /// area / scope_area, unclamped.
    pub perc_area: f64,
    /// Epoch microseconds of first materialization. Upserts never touch
    /// this, so a reprocessed measurement does not re-enter a later
    /// alert window.
    pub created_at: i64,
}
