//! Aggregator tests: mask-to-measurement batches, per-scope error
//! recovery, and rerun idempotency.

use chrono::NaiveDate;
use geo_types::{LineString, MultiPolygon, Polygon};
use selva_core::config::{MaskSelector, MasksConfig, ProjectionConfig};
use selva_core::errors::{GeometryError, PipelineError};
use selva_core::types::{CoverageMask, MaskKind, MaskSource, ScopeKind};
use selva_pipeline::{
    generate_measurements_for_all_scopes, generate_measurements_for_enabled_masks, AreaService,
};
use selva_storage::connection;
use selva_storage::queries::{measurements, scopes};

fn setup_db() -> rusqlite::Connection {
    connection::open_in_memory().unwrap()
}

fn service() -> AreaService {
    AreaService::new(&ProjectionConfig::default())
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
    MultiPolygon(vec![Polygon::new(
        LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
        vec![],
    )])
}

fn mask(geometry: MultiPolygon<f64>) -> CoverageMask {
    CoverageMask {
        date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        source: MaskSource::Sentinel2,
        kind: MaskKind::Vegetation,
        geometry,
    }
}

#[test]
fn half_overlap_yields_half_percentage() {
    let conn = setup_db();
    let scope_id = scopes::import(
        &conn,
        "Lomas de Lachay",
        ScopeKind::EcologicalCorridor,
        &rect(-75.0, -12.0, -74.9, -11.9),
    )
    .unwrap();

    let m = mask(rect(-75.0, -12.0, -74.95, -11.9));
    let result = generate_measurements_for_all_scopes(&conn, &service(), &m).unwrap();

    assert!(result.is_clean());
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].scope_id, scope_id);
    assert!((result.data[0].perc_area - 0.5).abs() < 1e-3, "got {}", result.data[0].perc_area);
    assert!(result.data[0].area > 0.0);

    let stored =
        measurements::get(&conn, m.date, scope_id, m.source, m.kind).unwrap().unwrap();
    assert_eq!(stored.area, result.data[0].area);
    assert_eq!(stored.perc_area, result.data[0].perc_area);
    assert_eq!(stored.scope_kind, ScopeKind::EcologicalCorridor);
}

#[test]
fn bad_scopes_are_skipped_not_fatal() {
    let conn = setup_db();
    let good = scopes::import(
        &conn,
        "Lomas de Lachay",
        ScopeKind::EcologicalCorridor,
        &rect(-75.0, -12.0, -74.9, -11.9),
    )
    .unwrap();
    // Latitude out of range: degenerate at projection time.
    scopes::import(&conn, "Broken", ScopeKind::ProtectedArea, &rect(-75.0, 91.0, -74.9, 92.0))
        .unwrap();
    // Far from the mask: empty intersection.
    let disjoint =
        scopes::import(&conn, "Caral", ScopeKind::ArchaeologicalComplex, &rect(10.0, 10.0, 10.1, 10.1))
            .unwrap();

    let m = mask(rect(-75.0, -12.0, -74.9, -11.9));
    let result = generate_measurements_for_all_scopes(&conn, &service(), &m).unwrap();

    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].scope_id, good);
    assert_eq!(result.error_count(), 2);
    assert!(result.errors.iter().any(|e| matches!(
        e,
        PipelineError::Geometry(GeometryError::DegenerateGeometry { .. })
    )));
    assert!(result.errors.iter().any(|e| matches!(
        e,
        PipelineError::Geometry(GeometryError::EmptyIntersection { scope_id }) if *scope_id == disjoint
    )));

    // Only the good scope got a row.
    assert_eq!(measurements::count(&conn).unwrap(), 1);
}

#[test]
fn degenerate_mask_aborts_the_batch() {
    let conn = setup_db();
    scopes::import(
        &conn,
        "Lomas de Lachay",
        ScopeKind::EcologicalCorridor,
        &rect(-75.0, -12.0, -74.9, -11.9),
    )
    .unwrap();

    let m = mask(MultiPolygon(vec![]));
    let err = generate_measurements_for_all_scopes(&conn, &service(), &m).unwrap_err();
    assert!(matches!(err, PipelineError::Geometry(GeometryError::DegenerateMask { .. })));
    assert_eq!(measurements::count(&conn).unwrap(), 0);
}

#[test]
fn rerunning_an_unchanged_mask_is_idempotent() {
    let conn = setup_db();
    let scope_id = scopes::import(
        &conn,
        "Lomas de Lachay",
        ScopeKind::EcologicalCorridor,
        &rect(-75.0, -12.0, -74.9, -11.9),
    )
    .unwrap();

    let m = mask(rect(-75.0, -12.0, -74.95, -11.9));
    generate_measurements_for_all_scopes(&conn, &service(), &m).unwrap();
    let first = measurements::get(&conn, m.date, scope_id, m.source, m.kind).unwrap().unwrap();

    generate_measurements_for_all_scopes(&conn, &service(), &m).unwrap();
    let second = measurements::get(&conn, m.date, scope_id, m.source, m.kind).unwrap().unwrap();

    // One row per natural key; recomputation never refreshes created_at,
    // so the row cannot re-enter a later alert window.
    assert_eq!(measurements::count(&conn).unwrap(), 1);
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.area, first.area);
}

#[test]
fn only_enabled_mask_families_are_measured() {
    let conn = setup_db();
    let scope_id = scopes::import(
        &conn,
        "Lomas de Lachay",
        ScopeKind::EcologicalCorridor,
        &rect(-75.0, -12.0, -74.9, -11.9),
    )
    .unwrap();

    let masks_config = MasksConfig {
        sources: vec![MaskSelector { source: MaskSource::Sentinel2, kind: MaskKind::Vegetation }],
    };
    let geometry = rect(-75.0, -12.0, -74.9, -11.9);
    let enabled = mask(geometry.clone());
    let disabled = CoverageMask {
        date: enabled.date,
        source: MaskSource::Modis,
        kind: MaskKind::Cloud,
        geometry,
    };

    let result = generate_measurements_for_enabled_masks(
        &conn,
        &service(),
        &masks_config,
        &[enabled.clone(), disabled],
    )
    .unwrap();

    assert!(result.is_clean());
    assert_eq!(result.data.len(), 1);
    assert_eq!(measurements::count(&conn).unwrap(), 1);
    assert!(measurements::get(&conn, enabled.date, scope_id, MaskSource::Modis, MaskKind::Cloud)
        .unwrap()
        .is_none());
}

#[test]
fn reprocessing_overwrites_the_measured_values() {
    let conn = setup_db();
    let scope_id = scopes::import(
        &conn,
        "Lomas de Lachay",
        ScopeKind::EcologicalCorridor,
        &rect(-75.0, -12.0, -74.9, -11.9),
    )
    .unwrap();

    let half = mask(rect(-75.0, -12.0, -74.95, -11.9));
    generate_measurements_for_all_scopes(&conn, &service(), &half).unwrap();

    // The same date reprocessed with a better mask converges on one row
    // carrying the new values.
    let full = mask(rect(-75.0, -12.0, -74.9, -11.9));
    generate_measurements_for_all_scopes(&conn, &service(), &full).unwrap();

    let stored =
        measurements::get(&conn, full.date, scope_id, full.source, full.kind).unwrap().unwrap();
    assert_eq!(measurements::count(&conn).unwrap(), 1);
    assert!((stored.perc_area - 1.0).abs() < 1e-3, "got {}", stored.perc_area);
}
