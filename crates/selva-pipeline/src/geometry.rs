//! Equal-area projection and intersection areas: the thin wrapper over
//! the spatial engine everything else builds on.

use geo::{Area, BooleanOps, CoordsIter, MapCoords};
use geo_types::{Coord, MultiPolygon};
use selva_core::config::ProjectionConfig;
use selva_core::errors::GeometryError;
use selva_core::types::Scope;

/// Mean Earth radius in metres (IUGG).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Sinusoidal (equal-area) projection from lon/lat degrees to metres.
///
/// Area-preserving over the region of interest, which is all the
/// pipeline needs; positional accuracy away from the central meridian
/// is irrelevant to area ratios.
#[derive(Debug, Clone, Copy)]
pub struct SinusoidalProjection {
    central_meridian_deg: f64,
}

impl SinusoidalProjection {
    pub fn new(central_meridian_deg: f64) -> Self {
        Self { central_meridian_deg }
    }

    fn project(&self, c: Coord<f64>) -> Coord<f64> {
        let lat = c.y.to_radians();
        let lon = (c.x - self.central_meridian_deg).to_radians();
        Coord { x: EARTH_RADIUS_M * lon * lat.cos(), y: EARTH_RADIUS_M * lat }
    }
}

/// Area and percentage-of-scope for one scope/mask intersection.
#[derive(Debug, Clone, Copy)]
pub struct Coverage {
    /// Intersection area in m².
    pub area: f64,
    /// area / scope_area. Not clamped; values above 1 are preserved as
    /// a symptom of upstream data issues.
    pub perc_area: f64,
}

/// Computes planar areas of scope and scope∩mask geometries in a shared
/// equal-area projection.
pub struct AreaService {
    projection: SinusoidalProjection,
}

impl AreaService {
    pub fn new(config: &ProjectionConfig) -> Self {
        Self { projection: SinusoidalProjection::new(config.central_meridian_deg) }
    }

    /// Validate and project a mask geometry once per batch.
    pub fn project_mask(
        &self,
        geometry: &MultiPolygon<f64>,
    ) -> Result<MultiPolygon<f64>, GeometryError> {
        validate(geometry)
            .map_err(|message| GeometryError::DegenerateMask { message })?;
        Ok(self.to_plane(geometry))
    }

    /// Projected area of the scope polygon, in m².
    pub fn scope_area(&self, scope: &Scope) -> Result<f64, GeometryError> {
        let projected = self.project_scope(scope)?;
        let area = projected.unsigned_area();
        if !area.is_finite() {
            return Err(GeometryError::ProjectionFailed { scope_id: scope.id });
        }
        if area <= 0.0 {
            return Err(GeometryError::DegenerateGeometry {
                scope_id: scope.id,
                message: "zero-area geometry".to_string(),
            });
        }
        Ok(area)
    }

    /// Intersect one scope with an already-projected mask and measure.
    ///
    /// An empty intersection is reported as an error so the caller can
    /// skip the scope, mirroring the spatial engine's behaviour.
    pub fn measure(
        &self,
        scope: &Scope,
        projected_mask: &MultiPolygon<f64>,
    ) -> Result<Coverage, GeometryError> {
        let scope_area = self.scope_area(scope)?;
        let projected_scope = self.project_scope(scope)?;

        let intersection = projected_scope.intersection(projected_mask);
        if intersection.0.is_empty() {
            return Err(GeometryError::EmptyIntersection { scope_id: scope.id });
        }

        let area = intersection.unsigned_area();
        Ok(Coverage { area, perc_area: area / scope_area })
    }

    fn project_scope(&self, scope: &Scope) -> Result<MultiPolygon<f64>, GeometryError> {
        validate(&scope.geometry).map_err(|message| GeometryError::DegenerateGeometry {
            scope_id: scope.id,
            message,
        })?;
        Ok(self.to_plane(&scope.geometry))
    }

    fn to_plane(&self, geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        geometry.map_coords(|c| self.projection.project(c))
    }
}

fn validate(geometry: &MultiPolygon<f64>) -> Result<(), String> {
    if geometry.0.is_empty() {
        return Err("empty multi-polygon".to_string());
    }
    for c in geometry.coords_iter() {
        if !c.x.is_finite() || !c.y.is_finite() {
            return Err("non-finite coordinate".to_string());
        }
        if c.y.abs() > 90.0 {
            return Err(format!("latitude {} out of range", c.y));
        }
    }
    Ok(())
}
