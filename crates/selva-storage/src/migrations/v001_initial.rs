//! V001: Initial schema.
//! users, scopes, stations, readings, coverage_measurements,
//! alert_checks, the three rule tiers, alerts.

pub const MIGRATION_SQL: &str = r#"
-- Rule and alert owners.
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    notify_by_email INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
) STRICT;

-- Monitored regions of interest. Geometry is a lon/lat multi-polygon
-- stored as JSON; administrative import upserts by name.
CREATE TABLE IF NOT EXISTS scopes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    kind TEXT NOT NULL,
    geometry TEXT NOT NULL,
    created_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_scopes_kind ON scopes(kind);

-- Ground stations and their readings.
CREATE TABLE IF NOT EXISTS stations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at INTEGER NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS readings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    station_id INTEGER NOT NULL REFERENCES stations(id),
    attributes TEXT NOT NULL,
    created_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_readings_window ON readings(created_at);
CREATE INDEX IF NOT EXISTS idx_readings_station_time
    ON readings(station_id, created_at);

-- Derived per-scope coverage facts. One row per (date, scope, source,
-- kind); recomputation updates area/perc_area and leaves created_at
-- untouched so reprocessed rows never re-enter a later alert window.
CREATE TABLE IF NOT EXISTS coverage_measurements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    scope_id INTEGER NOT NULL REFERENCES scopes(id),
    source TEXT NOT NULL,
    kind TEXT NOT NULL,
    area REAL NOT NULL,
    perc_area REAL NOT NULL,
    created_at INTEGER NOT NULL,
    UNIQUE(date, scope_id, source, kind)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_measurements_window
    ON coverage_measurements(created_at);
CREATE INDEX IF NOT EXISTS idx_measurements_partition
    ON coverage_measurements(scope_id, source, kind, created_at);

-- Append-only checkpoint log, one sequence per rule tier; each row's
-- created_at is the upper bound of one check window for that tier and
-- the lower bound of the tier's next.
CREATE TABLE IF NOT EXISTS alert_checks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tier TEXT NOT NULL,
    created_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_alert_checks_tier
    ON alert_checks(tier, created_at DESC);

-- Rule tiers. station_id NULL on a parameter rule is the wildcard.
CREATE TABLE IF NOT EXISTS parameter_rules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    station_id INTEGER REFERENCES stations(id),
    parameter TEXT NOT NULL,
    is_absolute INTEGER NOT NULL DEFAULT 0,
    valid_min REAL NOT NULL,
    valid_max REAL NOT NULL,
    created_at INTEGER NOT NULL,
    UNIQUE(user_id, station_id, parameter)
) STRICT;

CREATE TABLE IF NOT EXISTS scope_rules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    scope_id INTEGER NOT NULL REFERENCES scopes(id),
    source TEXT NOT NULL,
    change_type TEXT NOT NULL,
    is_absolute INTEGER NOT NULL DEFAULT 0,
    valid_min REAL NOT NULL,
    valid_max REAL NOT NULL,
    created_at INTEGER NOT NULL,
    UNIQUE(user_id, scope_id, source, change_type)
) STRICT;

CREATE TABLE IF NOT EXISTS scope_kind_rules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    scope_kind TEXT NOT NULL,
    source TEXT NOT NULL,
    change_type TEXT NOT NULL,
    is_absolute INTEGER NOT NULL DEFAULT 0,
    valid_min REAL NOT NULL,
    valid_max REAL NOT NULL,
    created_at INTEGER NOT NULL,
    UNIQUE(user_id, scope_kind, source, change_type)
) STRICT;

-- Immutable alert history. rule_attributes is the frozen snapshot of the
-- triggering rule's descriptive fields; only last_seen_at may change.
CREATE TABLE IF NOT EXISTS alerts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    rule_kind TEXT NOT NULL,
    rule_id INTEGER NOT NULL,
    candidate_kind TEXT NOT NULL,
    candidate_id INTEGER NOT NULL,
    rule_attributes TEXT NOT NULL,
    value REAL NOT NULL,
    created_at INTEGER NOT NULL,
    last_seen_at INTEGER
) STRICT;

CREATE INDEX IF NOT EXISTS idx_alerts_user ON alerts(user_id, created_at DESC);
CREATE INDEX IF NOT EXISTS idx_alerts_unseen
    ON alerts(user_id) WHERE last_seen_at IS NULL;
"#;
