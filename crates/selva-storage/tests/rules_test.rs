//! Rule table tests: joined names, wildcard stations, malformed codes.

use geo_types::{LineString, MultiPolygon, Polygon};
use selva_core::errors::StorageError;
use selva_core::rules::ChangeType;
use selva_core::types::{MaskSource, ScopeKind};
use selva_storage::connection;
use selva_storage::queries::{rules, scopes, stations, users};

fn setup_db() -> rusqlite::Connection {
    connection::open_in_memory().unwrap()
}

fn unit_square() -> MultiPolygon<f64> {
    MultiPolygon(vec![Polygon::new(
        LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
        vec![],
    )])
}

#[test]
fn parameter_rules_join_station_names() {
    let conn = setup_db();
    let user_id = users::insert(&conn, "ana", "ana@example.com", true).unwrap();
    let station_id = stations::insert(&conn, "Lomas").unwrap();

    rules::insert_parameter(&conn, user_id, Some(station_id), "temperature", true, -5.0, 40.0)
        .unwrap();
    rules::insert_parameter(&conn, user_id, None, "humidity", false, 0.0, 100.0).unwrap();

    let loaded = rules::all_parameter(&conn).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].station_name.as_deref(), Some("Lomas"));
    assert_eq!(loaded[1].station_id, None, "wildcard survives the round trip");
    assert_eq!(loaded[1].station_name, None);
}

#[test]
fn scope_rules_join_scope_names() {
    let conn = setup_db();
    let user_id = users::insert(&conn, "ana", "ana@example.com", true).unwrap();
    let scope_id =
        scopes::import(&conn, "Lachay", ScopeKind::EcologicalCorridor, &unit_square()).unwrap();

    rules::insert_scope(
        &conn, user_id, scope_id, MaskSource::Sentinel2, ChangeType::Percentage,
        true, 0.2, 0.8,
    )
    .unwrap();

    let loaded = rules::all_scope(&conn).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].scope_name, "Lachay");
    assert_eq!(loaded[0].change_type, ChangeType::Percentage);
}

#[test]
fn scope_kind_rules_round_trip() {
    let conn = setup_db();
    let user_id = users::insert(&conn, "ana", "ana@example.com", true).unwrap();

    rules::insert_scope_kind(
        &conn, user_id, ScopeKind::ArchaeologicalComplex, MaskSource::PeruSat1,
        ChangeType::Area, false, -1000.0, 1000.0,
    )
    .unwrap();

    let loaded = rules::all_scope_kind(&conn).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].scope_kind, ScopeKind::ArchaeologicalComplex);
    assert!(!loaded[0].is_absolute);
}

#[test]
fn unknown_change_type_aborts_loading() {
    let conn = setup_db();
    let user_id = users::insert(&conn, "ana", "ana@example.com", true).unwrap();
    let scope_id =
        scopes::import(&conn, "Lachay", ScopeKind::EcologicalCorridor, &unit_square()).unwrap();

    // Bypass the typed insert to simulate a misconfigured row.
    conn.execute(
        "INSERT INTO scope_rules
             (user_id, scope_id, source, change_type, is_absolute, valid_min, valid_max,
              created_at)
         VALUES (?1, ?2, 'S2', 'volume', 1, 0.0, 1.0, 0)",
        rusqlite::params![user_id, scope_id],
    )
    .unwrap();

    let err = rules::all_scope(&conn).unwrap_err();
    assert!(matches!(err, StorageError::MalformedRow { .. }));
}
