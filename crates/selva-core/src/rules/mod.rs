//! The three-tier rule hierarchy and its shared evaluation contract.
//!
//! Tiers in increasing breadth: per-station/parameter, per-scope,
//! per-scope-kind. All three implement [`RuleTier`] so the evaluation
//! engine is generic over the tier and exhaustive at compile time; no
//! runtime type inspection anywhere.

pub mod parameter_rule;
pub mod scope_kind_rule;
pub mod scope_rule;

pub use parameter_rule::ParameterRule;
pub use scope_kind_rule::ScopeKindRule;
pub use scope_rule::ScopeRule;

use serde::{Deserialize, Serialize};

/// Which measurement field a scope/scope-kind rule watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Absolute intersected area (m²).
    Area,
    /// Percentage of the scope's own area.
    Percentage,
}

impl ChangeType {
    pub fn code(self) -> &'static str {
        match self {
            ChangeType::Area => "area",
            ChangeType::Percentage => "percentage",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "area" => Some(ChangeType::Area),
            "percentage" => Some(ChangeType::Percentage),
            _ => None,
        }
    }
}

/// Shared evaluation contract for one rule tier.
///
/// `narrow` applies the rule's optional filter to the tier's candidate
/// set; an unset filter means no narrowing (wildcard). `metric` extracts
/// the raw observed value from one candidate; `None` means the candidate
/// carries no value for this rule and is skipped. The engine owns the
/// absolute-vs-delta arithmetic and the bounds comparison.
pub trait RuleTier {
    type Candidate;

    /// Candidates this rule applies to, in input order.
    fn narrow<'a>(&self, all: &'a [Self::Candidate]) -> Vec<&'a Self::Candidate>;

    /// Raw metric of one candidate under this rule.
    fn metric(&self, candidate: &Self::Candidate) -> Option<f64>;

    /// Whether the rule compares raw values (true) or deltas from the
    /// previous value in the same partition (false).
    fn is_absolute(&self) -> bool;

    /// (valid_min, valid_max). The valid range is inclusive at both ends;
    /// inverted bounds are accepted as configured and reject every value.
    fn bounds(&self) -> (f64, f64);

    /// Owning user id.
    fn owner(&self) -> i64;

    /// Natural-language sentence for an alert with the given observed
    /// value. Positive values use increase wording and quote `valid_max`;
    /// zero or negative values use decrease wording and quote `valid_min`.
    fn describe(&self, value: f64) -> String;

    /// Descriptive fields frozen into `Alert.rule_attributes`.
    fn snapshot(&self) -> serde_json::Value;
}

/// A value is out of bounds iff it lies strictly outside [valid_min,
/// valid_max]. With inverted bounds (min > max) every value is out of
/// bounds; that is a user-configuration concern, not a pipeline error.
pub fn out_of_bounds(value: f64, bounds: (f64, f64)) -> bool {
    let (valid_min, valid_max) = bounds;
    value < valid_min || value > valid_max
}
