//! Full-cycle tests: the configured database path, the enabled-mask
//! switchboard, and aggregation feeding the rule engine.

use chrono::NaiveDate;
use geo_types::{LineString, MultiPolygon, Polygon};
use selva_core::config::{MaskSelector, MonitorConfig};
use selva_core::rules::ChangeType;
use selva_core::types::{CoverageMask, MaskKind, MaskSource, ScopeKind};
use selva_pipeline::{run_cycle, LogNotifier};
use selva_storage::connection;
use selva_storage::queries::{alerts, measurements, rules, scopes, users};

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
    MultiPolygon(vec![Polygon::new(
        LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
        vec![],
    )])
}

fn mask(source: MaskSource, kind: MaskKind, geometry: MultiPolygon<f64>) -> CoverageMask {
    CoverageMask {
        date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        source,
        kind,
        geometry,
    }
}

#[test]
fn cycle_runs_against_the_configured_database() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = MonitorConfig::default();
    config.database.path = dir.path().join("monitor.db");
    config.masks.sources =
        vec![MaskSelector { source: MaskSource::Sentinel2, kind: MaskKind::Vegetation }];

    // Seed through a separate connection to the same file.
    {
        let conn = connection::open(&config.database.path).unwrap();
        let user_id = users::insert(&conn, "Rosa", "rosa@example.org", false).unwrap();
        let scope_id = scopes::import(
            &conn,
            "Lomas de Lachay",
            ScopeKind::EcologicalCorridor,
            &rect(-75.0, -12.0, -74.9, -11.9),
        )
        .unwrap();
        rules::insert_scope(
            &conn, user_id, scope_id, MaskSource::Sentinel2, ChangeType::Percentage,
            true, 0.0, 0.5,
        )
        .unwrap();
    }

    let covering = rect(-75.0, -12.0, -74.9, -11.9);
    let masks = [
        mask(MaskSource::Sentinel2, MaskKind::Vegetation, covering.clone()),
        // Not in the enabled list; must be ignored entirely.
        mask(MaskSource::Modis, MaskKind::Cloud, covering),
    ];

    let report = run_cycle(&config, &masks, &LogNotifier).unwrap();
    assert_eq!(report.measured, 1);
    assert_eq!(report.measurement_errors, 0);
    // The fresh full-coverage measurement (perc_area near 1.0) breaches
    // the 0.5 maximum within the same cycle.
    assert_eq!(report.checks.scope.alerts_raised, 1);

    let conn = connection::open(&config.database.path).unwrap();
    assert_eq!(measurements::count(&conn).unwrap(), 1);
    assert_eq!(alerts::count(&conn).unwrap(), 1);
}

#[test]
fn cycle_with_no_enabled_masks_still_checks_rules() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = MonitorConfig::default();
    config.database.path = dir.path().join("monitor.db");
    config.masks.sources = Vec::new();

    {
        connection::open(&config.database.path).unwrap();
    }

    let masks = [mask(
        MaskSource::Sentinel2,
        MaskKind::Vegetation,
        rect(-75.0, -12.0, -74.9, -11.9),
    )];
    let report = run_cycle(&config, &masks, &LogNotifier).unwrap();

    assert_eq!(report.measured, 0);
    assert_eq!(report.checks.alerts_raised(), 0);

    let conn = connection::open(&config.database.path).unwrap();
    assert_eq!(measurements::count(&conn).unwrap(), 0);
}
