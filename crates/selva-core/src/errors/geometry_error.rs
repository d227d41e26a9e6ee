//! Spatial-engine errors. Scope-level failures are recoverable: the
//! aggregator logs and skips the offending scope, never the batch.

/// Errors raised while projecting or intersecting geometries.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("Degenerate geometry for scope {scope_id}: {message}")]
    DegenerateGeometry { scope_id: i64, message: String },

    #[error("Projection failed for scope {scope_id}: non-finite coordinate")]
    ProjectionFailed { scope_id: i64 },

    #[error("Scope {scope_id} does not intersect the mask")]
    EmptyIntersection { scope_id: i64 },

    #[error("Degenerate mask geometry: {message}")]
    DegenerateMask { message: String },
}
