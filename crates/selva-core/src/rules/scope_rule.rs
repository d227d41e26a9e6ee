//! Per-scope rules over coverage measurements.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ChangeType, RuleTier};
use crate::types::{CoverageMeasurement, MaskSource};

/// Watches coverage measurements of one mask family for one specific
/// scope. Unique per (user, scope, source, change_type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeRule {
    pub id: i64,
    pub user_id: i64,
    pub scope_id: i64,
    /// Scope name resolved at load time, used only for descriptions.
    pub scope_name: String,
    pub source: MaskSource,
    pub change_type: ChangeType,
    pub is_absolute: bool,
    pub valid_min: f64,
    pub valid_max: f64,
}

impl RuleTier for ScopeRule {
    type Candidate = CoverageMeasurement;

    fn narrow<'a>(&self, all: &'a [CoverageMeasurement]) -> Vec<&'a CoverageMeasurement> {
        all.iter()
            .filter(|m| m.scope_id == self.scope_id && m.source == self.source)
            .collect()
    }

    fn metric(&self, candidate: &CoverageMeasurement) -> Option<f64> {
        Some(match self.change_type {
            ChangeType::Area => candidate.area,
            ChangeType::Percentage => candidate.perc_area,
        })
    }

    fn is_absolute(&self) -> bool {
        self.is_absolute
    }

    fn bounds(&self) -> (f64, f64) {
        (self.valid_min, self.valid_max)
    }

    fn owner(&self) -> i64 {
        self.user_id
    }

    fn describe(&self, value: f64) -> String {
        describe_coverage(
            &format!("scope '{}'", self.scope_name),
            self.change_type,
            value,
            self.valid_min,
            self.valid_max,
        )
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "tier": "scope",
            "scope_id": self.scope_id,
            "scope_name": self.scope_name,
            "source": self.source.code(),
            "change_type": self.change_type.code(),
            "is_absolute": self.is_absolute,
            "valid_min": self.valid_min,
            "valid_max": self.valid_max,
        })
    }
}

/// Shared wording for the scope and scope-kind tiers.
///
/// Positive value: increase wording, quotes `valid_max`. Zero or
/// negative: decrease wording, quotes `valid_min`. Area phrasing carries
/// the m² unit, percentage phrasing does not.
pub(crate) fn describe_coverage(
    subject: &str,
    change_type: ChangeType,
    value: f64,
    valid_min: f64,
    valid_max: f64,
) -> String {
    match (change_type, value > 0.0) {
        (ChangeType::Area, true) => format!(
            "Covered area of {subject} increased to {value} m², exceeding the allowed maximum of {valid_max} m²"
        ),
        (ChangeType::Area, false) => format!(
            "Covered area of {subject} decreased to {value} m², falling below the allowed minimum of {valid_min} m²"
        ),
        (ChangeType::Percentage, true) => format!(
            "Covered percentage of {subject} increased to {value}, exceeding the allowed maximum of {valid_max}"
        ),
        (ChangeType::Percentage, false) => format!(
            "Covered percentage of {subject} decreased to {value}, falling below the allowed minimum of {valid_min}"
        ),
    }
}
