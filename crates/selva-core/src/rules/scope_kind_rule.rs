//! Per-scope-kind rules: the broadest tier.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::scope_rule::describe_coverage;
use super::{ChangeType, RuleTier};
use crate::types::{CoverageMeasurement, MaskSource, ScopeKind};

/// Watches coverage measurements of one mask family across every scope
/// of one kind; each matching scope's measurements are evaluated
/// independently. Unique per (user, kind, source, change_type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeKindRule {
    pub id: i64,
    pub user_id: i64,
    pub scope_kind: ScopeKind,
    pub source: MaskSource,
    pub change_type: ChangeType,
    pub is_absolute: bool,
    pub valid_min: f64,
    pub valid_max: f64,
}

impl RuleTier for ScopeKindRule {
    type Candidate = CoverageMeasurement;

    fn narrow<'a>(&self, all: &'a [CoverageMeasurement]) -> Vec<&'a CoverageMeasurement> {
        all.iter()
            .filter(|m| m.scope_kind == self.scope_kind && m.source == self.source)
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
            &format!("a monitored {}", self.scope_kind.label()),
            self.change_type,
            value,
            self.valid_min,
            self.valid_max,
        )
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "tier": "scope_kind",
            "scope_kind": self.scope_kind.code(),
            "source": self.source.code(),
            "change_type": self.change_type.code(),
            "is_absolute": self.is_absolute,
            "valid_min": self.valid_min,
            "valid_max": self.valid_max,
        })
    }
}
