//! The table layout Locus reads.
//!
//! Stores are created and filled by the data generator, never by Locus. The
//! DDL below is the reference layout that generator must produce; it is used
//! to seed test databases. [`REQUIRED_COLUMNS`] is what an opened store is
//! checked against.

/// Every table and column a query plan may reference.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
  ("zones", &["id", "name", "floor", "type", "description"]),
  ("entities", &["id", "name", "type", "department", "active"]),
  (
    "zone_events",
    &["id", "entity_id", "zone_id", "event_type", "timestamp", "dwell_seconds"],
  ),
  ("pings", &["id", "entity_id", "zone_id", "timestamp", "rssi", "accuracy"]),
];

/// Reference DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS zones (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    floor       INTEGER NOT NULL CHECK (floor >= 1),
    type        TEXT NOT NULL CHECK (type IN ('common', 'office', 'meeting_room', 'lab')),
    description TEXT
);

CREATE TABLE IF NOT EXISTS entities (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    type        TEXT NOT NULL CHECK (type IN ('person', 'object')),
    department  TEXT,
    active      INTEGER NOT NULL DEFAULT 1
);

-- dwell_seconds is NULL on enter and set on the matching exit.
CREATE TABLE IF NOT EXISTS zone_events (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    entity_id     TEXT NOT NULL REFERENCES entities(id),
    zone_id       TEXT NOT NULL REFERENCES zones(id),
    event_type    TEXT NOT NULL CHECK (event_type IN ('enter', 'exit')),
    timestamp     TEXT NOT NULL,   -- ISO 8601, local time
    dwell_seconds INTEGER
);

-- Ping ids follow insertion order; the floor-jump query pairs each ping with the next id.
CREATE TABLE IF NOT EXISTS pings (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    entity_id   TEXT NOT NULL REFERENCES entities(id),
    zone_id     TEXT NOT NULL REFERENCES zones(id),
    timestamp   TEXT NOT NULL,
    rssi        INTEGER NOT NULL,  -- dBm
    accuracy    REAL               -- meters
);

CREATE INDEX IF NOT EXISTS zone_events_entity_idx ON zone_events(entity_id, timestamp);
CREATE INDEX IF NOT EXISTS zone_events_zone_idx   ON zone_events(zone_id, timestamp);
CREATE INDEX IF NOT EXISTS pings_entity_idx       ON pings(entity_id, id);
";
