//! Half-open time windows over epoch-microsecond timestamps.

use serde::{Deserialize, Serialize};

/// Current time in epoch microseconds.
pub fn now_micros() -> i64 {
    chrono::Utc::now().timestamp_micros()
}

/// Which rule tier a checkpoint belongs to. Each tier keeps its own
/// append-only checkpoint sequence so its windows never chain off a
/// sibling tier's rows within the same run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckTier {
    Parameter,
    Scope,
    ScopeKind,
}

impl CheckTier {
    /// Discriminant code stored in the `tier` column.
    pub fn code(self) -> &'static str {
        match self {
            CheckTier::Parameter => "parameter",
            CheckTier::Scope => "scope",
            CheckTier::ScopeKind => "scope_kind",
        }
    }
}

/// A half-open interval [start, end) of newly created data considered by
/// one checkpointed run. The first run ever uses `i64::MIN` as its start,
/// meaning "all history".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: i64,
    pub end: i64,
}

impl Window {
    /// Whether a creation timestamp falls inside this window.
    pub fn contains(&self, created_at: i64) -> bool {
        created_at >= self.start && created_at < self.end
    }
}
