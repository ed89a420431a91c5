//! Read models for the four tables of a location store.
//!
//! The store is populated by an external generator; Locus only ever reads it.
//! These types document the shape of that data and give fixtures and callers a
//! shared vocabulary for rows.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── Zones ───────────────────────────────────────────────────────────────────

/// The kind of space a zone represents.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ZoneType {
  Common,
  Office,
  MeetingRoom,
  Lab,
}

/// A bounded physical area on a single floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
  pub id:          String,
  pub name:        String,
  /// Building level, starting at 1.
  pub floor:       i64,
  pub zone_type:   ZoneType,
  pub description: String,
}

// ─── Entities ────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
  Person,
  Object,
}

/// A tracked subject: a person or an asset carrying a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEntity {
  pub id:         String,
  pub name:       String,
  pub kind:       EntityKind,
  pub department: String,
  pub active:     bool,
}

// ─── Observations ────────────────────────────────────────────────────────────

/// Direction of a zone transition.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventType {
  Enter,
  Exit,
}

/// A derived enter/exit transition for an entity at a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneEvent {
  pub entity_id:     String,
  pub zone_id:       String,
  pub event_type:    EventType,
  pub timestamp:     NaiveDateTime,
  /// Seconds since the matching enter; only present on exit events.
  pub dwell_seconds: Option<i64>,
}

/// A raw signal-strength observation. Ping ids follow insertion order, which
/// is what "next observation" means for an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ping {
  pub entity_id: String,
  pub zone_id:   String,
  pub timestamp: NaiveDateTime,
  /// dBm, typically between -90 and -40.
  pub rssi:      i64,
  /// Meters.
  pub accuracy:  f64,
}
