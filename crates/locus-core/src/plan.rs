//! Query synthesis: one parameterised SQL statement per intent.
//!
//! Every value taken from a question (entity names, zone fragments, window
//! bounds) is bound as a parameter. Name and zone filters keep "contains"
//! semantics through `LIKE '%…%'` with the fragment's own `%`, `_` and `\`
//! escaped; SQLite's `LIKE` is case-insensitive for ASCII.

use std::fmt;

use serde::Serialize;

use crate::{
  intent::Intent,
  model::EventType,
  store::Value,
  time::TimeWindow,
  vocab::Extraction,
};

/// Pings weaker than this (dBm) count as low signal.
pub const LOW_RSSI_DBM: i64 = -75;

/// Consecutive pings on different floors closer together than this are a
/// floor jump.
pub const FLOOR_JUMP_MAX_GAP_SECS: i64 = 300;

/// Row cap for the anomaly queries.
pub const ANOMALY_ROW_LIMIT: i64 = 20;

// ─── Plan ────────────────────────────────────────────────────────────────────

/// A fully bound statement ready for a [`LocationStore`](crate::store::LocationStore).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPlan {
  pub intent: Intent,
  /// Statement text with `?N` placeholders.
  pub sql:    String,
  /// Values for `?1`, `?2`, … in order.
  pub params: Vec<Value>,
}

impl fmt::Display for QueryPlan {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.sql) }
}

/// Collects parameters and hands out their placeholders.
#[derive(Default)]
struct Binder {
  params: Vec<Value>,
}

impl Binder {
  fn bind(&mut self, value: impl Into<Value>) -> String {
    self.params.push(value.into());
    format!("?{}", self.params.len())
  }

  /// `column LIKE ?N` matching any value that contains `fragment`.
  fn contains(&mut self, column: &str, fragment: &str) -> String {
    let p = self.bind(format!("%{}%", escape_like(fragment)));
    format!("{column} LIKE {p} ESCAPE '\\'")
  }

  /// ` AND column >= ?N AND column <= ?M`, or nothing without a window.
  fn within(&mut self, column: &str, window: Option<&TimeWindow>) -> String {
    match window {
      Some(w) => {
        let start = self.bind(w.start_text());
        let end = self.bind(w.end_text());
        format!(" AND {column} >= {start} AND {column} <= {end}")
      }
      None => String::new(),
    }
  }

  fn finish(self, intent: Intent, sql: String) -> QueryPlan {
    QueryPlan { intent, sql, params: self.params }
  }
}

fn escape_like(fragment: &str) -> String {
  let mut out = String::with_capacity(fragment.len());
  for c in fragment.chars() {
    if matches!(c, '\\' | '%' | '_') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}

const EVENT_JOINS: &str = "FROM zone_events ze
JOIN entities e ON ze.entity_id = e.id
JOIN zones z ON ze.zone_id = z.id";

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Build the statement for `intent`.
///
/// Returns `None` for [`Intent::Unrecognized`], and for intents whose required
/// entity or zone is absent from `extraction`.
pub fn build(
  intent:     Intent,
  extraction: &Extraction,
  window:     Option<&TimeWindow>,
) -> Option<QueryPlan> {
  let mut b = Binder::default();

  let sql = match intent {
    Intent::ListZones => "SELECT name AS zone_name, floor AS floor
FROM zones
ORDER BY floor"
      .to_owned(),

    Intent::ListEntities => {
      "SELECT name AS entity_name, type AS entity_type, department AS department
FROM entities"
        .to_owned()
    }

    Intent::Locate => {
      let who = b.contains("e.name", extraction.first_entity()?);
      match window {
        Some(_) => {
          let when = b.within("ze.timestamp", window);
          format!(
            "SELECT e.name AS entity_name, z.name AS zone_name, ze.timestamp AS timestamp, ze.event_type AS event_type
{EVENT_JOINS}
WHERE {who}{when}
ORDER BY ze.timestamp"
          )
        }
        None => {
          let enter = b.bind(EventType::Enter.to_string());
          format!(
            "SELECT e.name AS entity_name, z.name AS zone_name, ze.timestamp AS timestamp
{EVENT_JOINS}
WHERE {who} AND ze.event_type = {enter}
ORDER BY ze.timestamp DESC
LIMIT 1"
          )
        }
      }
    }

    Intent::DwellTime => {
      let zone = b.contains("z.name", extraction.first_zone()?);
      let exit = b.bind(EventType::Exit.to_string());
      let when = b.within("ze.timestamp", window);
      format!(
        "SELECT e.name AS entity_name, SUM(ze.dwell_seconds) / 60.0 AS minutes
{EVENT_JOINS}
WHERE {zone} AND ze.event_type = {exit}{when}
GROUP BY e.id, e.name
ORDER BY minutes DESC"
      )
    }

    Intent::Occupancy => {
      let zone = b.contains("z.name", extraction.first_zone()?);
      let when = b.within("ze.timestamp", window);
      format!(
        "SELECT e.name AS entity_name, MIN(ze.timestamp) AS first_seen
{EVENT_JOINS}
WHERE {zone}{when}
GROUP BY e.id, e.name
ORDER BY first_seen"
      )
    }

    Intent::MovementTrace => {
      let who = b.contains("e.name", extraction.first_entity()?);
      let when = b.within("ze.timestamp", window);
      format!(
        "SELECT z.name AS zone_name, z.floor AS floor, ze.event_type AS event_type, ze.timestamp AS timestamp
{EVENT_JOINS}
WHERE {who}{when}
ORDER BY ze.timestamp"
      )
    }

    // Each ping is paired with the next ping of the same entity by insertion
    // order (smallest larger id), not by timestamp.
    Intent::FloorJump => format!(
      "SELECT p1.entity_id AS entity_id, e.name AS entity_name,
       z1.floor AS floor1, z2.floor AS floor2,
       p1.timestamp AS time1,
       (julianday(p2.timestamp) - julianday(p1.timestamp)) * 86400 AS seconds
FROM pings p1
JOIN pings p2 ON p2.id = (
  SELECT MIN(n.id) FROM pings n
  WHERE n.entity_id = p1.entity_id AND n.id > p1.id
)
JOIN zones z1 ON p1.zone_id = z1.id
JOIN zones z2 ON p2.zone_id = z2.id
JOIN entities e ON p1.entity_id = e.id
WHERE z1.floor != z2.floor
  AND (julianday(p2.timestamp) - julianday(p1.timestamp)) * 86400 < {FLOOR_JUMP_MAX_GAP_SECS}
ORDER BY p1.id
LIMIT {ANOMALY_ROW_LIMIT}"
    ),

    Intent::LowSignal => {
      let when = b.within("p.timestamp", window);
      format!(
        "SELECT e.name AS entity_name, z.name AS zone_name, p.rssi AS rssi, p.timestamp AS timestamp
FROM pings p
JOIN entities e ON p.entity_id = e.id
JOIN zones z ON p.zone_id = z.id
WHERE p.rssi < {LOW_RSSI_DBM}{when}
ORDER BY p.rssi
LIMIT {ANOMALY_ROW_LIMIT}"
      )
    }

    Intent::Unrecognized => return None,
  };

  Some(b.finish(intent, sql))
}
