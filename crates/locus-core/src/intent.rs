//! Intent classification.
//!
//! A question is classified by walking an ordered rule table. The first rule
//! whose predicate holds decides the intent, even if later rules would also
//! match; "list zones" must reach [`Intent::ListZones`] before the broader
//! "list" rule sees it.

use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::vocab::Extraction;

/// The closed set of question categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
  ListZones,
  ListEntities,
  /// "where is X" — current or windowed location of an entity.
  Locate,
  DwellTime,
  /// "who was here" — entities seen in a zone.
  Occupancy,
  MovementTrace,
  FloorJump,
  LowSignal,
  Unrecognized,
}

/// Everything a rule predicate may look at.
#[derive(Debug, Clone, Copy)]
pub struct Signals<'a> {
  pub text:       &'a str,
  pub extraction: &'a Extraction,
}

impl Signals<'_> {
  fn has(&self, needle: &str) -> bool { self.text.contains(needle) }

  fn has_any(&self, needles: &[&str]) -> bool { needles.iter().any(|n| self.has(n)) }

  fn has_entity(&self) -> bool { !self.extraction.entities.is_empty() }

  fn has_zone(&self) -> bool { !self.extraction.zones.is_empty() }
}

type Predicate = fn(&Signals<'_>) -> bool;

/// Rules in evaluation order. [`Intent::Unrecognized`] is the fallback and has
/// no rule.
const RULES: &[(Intent, Predicate)] = &[
  (Intent::ListZones, |s| s.has("list") && s.has("zone")),
  (Intent::ListEntities, |s| s.has_any(&["list", "show all"])),
  (Intent::Locate, |s| s.has_any(&["where", "find"]) && s.has_entity()),
  (Intent::DwellTime, |s| s.has_any(&["how long", "spent"]) && s.has_zone()),
  (Intent::Occupancy, |s| s.has("who") && s.has_zone()),
  (Intent::MovementTrace, |s| s.has_any(&["movement", "track", "path"]) && s.has_entity()),
  (Intent::FloorJump, |s| s.has("floor jump")),
  (Intent::LowSignal, |s| s.has_any(&["low rssi", "signal"])),
];

pub fn classify(signals: &Signals<'_>) -> Intent {
  RULES
    .iter()
    .find(|(_, matches)| matches(signals))
    .map_or(Intent::Unrecognized, |(intent, _)| *intent)
}
