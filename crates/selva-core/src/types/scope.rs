//! Monitored scopes: named polygonal regions of interest.

use geo_types::MultiPolygon;
use serde::{Deserialize, Serialize};

/// Category of a monitored scope. Persisted as a two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKind {
    /// Ecological corridor ("CE").
    #[serde(rename = "CE")]
    EcologicalCorridor,
    /// Natural protected area ("AP").
    #[serde(rename = "AP")]
    ProtectedArea,
    /// Archaeological complex ("AC").
    #[serde(rename = "AC")]
    ArchaeologicalComplex,
}

impl ScopeKind {
    /// Two-letter code used in storage and configuration.
    pub fn code(self) -> &'static str {
        match self {
            ScopeKind::EcologicalCorridor => "CE",
            ScopeKind::ProtectedArea => "AP",
            ScopeKind::ArchaeologicalComplex => "AC",
        }
    }

    /// Parse a stored two-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CE" => Some(ScopeKind::EcologicalCorridor),
            "AP" => Some(ScopeKind::ProtectedArea),
            "AC" => Some(ScopeKind::ArchaeologicalComplex),
            _ => None,
        }
    }

    /// Human-readable phrase used in alert descriptions.
    pub fn label(self) -> &'static str {
        match self {
            ScopeKind::EcologicalCorridor => "ecological corridor",
            ScopeKind::ProtectedArea => "protected area",
            ScopeKind::ArchaeologicalComplex => "archaeological complex",
        }
    }
}

/// A named geographic region of interest.
///
/// Geometry is a lon/lat multi-polygon, created via administrative import
/// and rarely mutated. Measurements and rules reference scopes by id and
/// never own them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scope {
    pub id: i64,
    pub name: String,
    pub kind: ScopeKind,
    pub geometry: MultiPolygon<f64>,
}
