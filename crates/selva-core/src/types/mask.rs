//! Classified coverage masks produced by the upstream processing chain.

use chrono::NaiveDate;
use geo_types::MultiPolygon;
use serde::{Deserialize, Serialize};

/// Satellite data source a mask was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaskSource {
    /// Sentinel-1 SAR ("S1").
    #[serde(rename = "S1")]
    Sentinel1,
    /// Sentinel-2 optical ("S2").
    #[serde(rename = "S2")]
    Sentinel2,
    /// MODIS ("MOD").
    #[serde(rename = "MOD")]
    Modis,
    /// PeruSat-1 ("PS1").
    #[serde(rename = "PS1")]
    PeruSat1,
}

impl MaskSource {
    pub fn code(self) -> &'static str {
        match self {
            MaskSource::Sentinel1 => "S1",
            MaskSource::Sentinel2 => "S2",
            MaskSource::Modis => "MOD",
            MaskSource::PeruSat1 => "PS1",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S1" => Some(MaskSource::Sentinel1),
            "S2" => Some(MaskSource::Sentinel2),
            "MOD" => Some(MaskSource::Modis),
            "PS1" => Some(MaskSource::PeruSat1),
            _ => None,
        }
    }
}

/// Pixel class a mask layer represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskKind {
    Vegetation,
    Cloud,
    LandUse,
}

impl MaskKind {
    pub fn code(self) -> &'static str {
        match self {
            MaskKind::Vegetation => "vegetation",
            MaskKind::Cloud => "cloud",
            MaskKind::LandUse => "landuse",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "vegetation" => Some(MaskKind::Vegetation),
            "cloud" => Some(MaskKind::Cloud),
            "landuse" => Some(MaskKind::LandUse),
            _ => None,
        }
    }
}

/// A vectorized classified mask for one (date, source, kind).
///
/// The upstream producer has already decomposed the raster by pixel value
/// and merged the class of interest into a single multi-polygon; this core
/// never rasterizes or polygonizes.
#[derive(Debug, Clone)]
pub struct CoverageMask {
    pub date: NaiveDate,
    pub source: MaskSource,
    pub kind: MaskKind,
    pub geometry: MultiPolygon<f64>,
}
