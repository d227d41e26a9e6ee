//! Immutable alert records with tagged rule/candidate references.

use serde::{Deserialize, Serialize};

/// Reference to the triggering rule: exactly one of three known tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleRef {
    Parameter(i64),
    Scope(i64),
    ScopeKind(i64),
}

impl RuleRef {
    /// Discriminant code stored in the `rule_kind` column.
    pub fn kind_code(self) -> &'static str {
        match self {
            RuleRef::Parameter(_) => "parameter",
            RuleRef::Scope(_) => "scope",
            RuleRef::ScopeKind(_) => "scope_kind",
        }
    }

    pub fn rule_id(self) -> i64 {
        match self {
            RuleRef::Parameter(id) | RuleRef::Scope(id) | RuleRef::ScopeKind(id) => id,
        }
    }

    pub fn from_parts(kind: &str, id: i64) -> Option<Self> {
        match kind {
            "parameter" => Some(RuleRef::Parameter(id)),
            "scope" => Some(RuleRef::Scope(id)),
            "scope_kind" => Some(RuleRef::ScopeKind(id)),
            _ => None,
        }
    }
}

/// Reference to the triggering candidate: a station reading or a
/// coverage measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateRef {
    Reading(i64),
    Measurement(i64),
}

impl CandidateRef {
    /// Discriminant code stored in the `candidate_kind` column.
    pub fn kind_code(self) -> &'static str {
        match self {
            CandidateRef::Reading(_) => "reading",
            CandidateRef::Measurement(_) => "measurement",
        }
    }

    pub fn candidate_id(self) -> i64 {
        match self {
            CandidateRef::Reading(id) | CandidateRef::Measurement(id) => id,
        }
    }

    pub fn from_parts(kind: &str, id: i64) -> Option<Self> {
        match kind {
            "reading" => Some(CandidateRef::Reading(id)),
            "measurement" => Some(CandidateRef::Measurement(id)),
            _ => None,
        }
    }
}

/// An immutable historical alert.
///
/// `rule_attributes` is a frozen snapshot of the triggering rule's
/// descriptive fields taken at creation time, so later rule edits never
/// alter historical alert text. Only `last_seen_at` (acknowledgement
/// tracking, external concern) may change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub user_id: i64,
    pub rule: RuleRef,
    pub candidate: CandidateRef,
    pub rule_attributes: serde_json::Value,
    pub value: f64,
    pub created_at: i64,
    pub last_seen_at: Option<i64>,
}
