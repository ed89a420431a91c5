//! Vocabulary matching: which known entity names and zone fragments appear in
//! a question.

use serde::Deserialize;

/// The two word lists questions are matched against.
///
/// Entries are compared lowercased. Order matters: when a question mentions
/// several entries, the one listed first is the one a query is built for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Vocabulary {
  #[serde(default = "default_entities")]
  pub entities: Vec<String>,
  #[serde(default = "default_zones")]
  pub zones:    Vec<String>,
}

fn default_entities() -> Vec<String> {
  ["alice", "bob", "carol", "david", "eve"].map(String::from).to_vec()
}

fn default_zones() -> Vec<String> {
  ["lobby", "break", "engineering", "sales", "meeting", "lab", "executive"]
    .map(String::from)
    .to_vec()
}

impl Default for Vocabulary {
  fn default() -> Self {
    Self { entities: default_entities(), zones: default_zones() }
  }
}

/// Vocabulary entries found in one question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
  /// Matched entity names, in vocabulary order.
  pub entities: Vec<String>,
  /// Matched zone fragments, in vocabulary order.
  pub zones:    Vec<String>,
}

impl Extraction {
  pub fn first_entity(&self) -> Option<&str> { self.entities.first().map(String::as_str) }

  pub fn first_zone(&self) -> Option<&str> { self.zones.first().map(String::as_str) }
}

#[derive(Debug, Clone)]
pub struct VocabularyMatcher {
  entities: Vec<String>,
  zones:    Vec<String>,
}

impl VocabularyMatcher {
  pub fn new(vocabulary: Vocabulary) -> Self {
    let lower = |v: Vec<String>| -> Vec<String> {
      v.into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
    };
    Self { entities: lower(vocabulary.entities), zones: lower(vocabulary.zones) }
  }

  /// Substring containment against normalized text; a longer word containing
  /// an entry still counts ("labs" matches "lab").
  pub fn extract(&self, text: &str) -> Extraction {
    let hits = |v: &[String]| -> Vec<String> {
      v.iter().filter(|entry| text.contains(entry.as_str())).cloned().collect()
    };
    Extraction { entities: hits(&self.entities), zones: hits(&self.zones) }
  }
}

impl Default for VocabularyMatcher {
  fn default() -> Self { Self::new(Vocabulary::default()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn entities_come_back_in_vocabulary_order() {
    let m = VocabularyMatcher::default();
    let x = m.extract("did eve meet carol or alice?");
    assert_eq!(x.entities, ["alice", "carol", "eve"]);
    assert_eq!(x.first_entity(), Some("alice"));
  }

  #[test]
  fn zone_fragments_match_inside_longer_words() {
    let m = VocabularyMatcher::default();
    let x = m.extract("who visited the labs after the breakfast");
    assert_eq!(x.zones, ["break", "lab"]);
  }

  #[test]
  fn injected_vocabulary_is_lowercased() {
    let m = VocabularyMatcher::new(Vocabulary {
      entities: vec!["Forklift-7".into(), "  ".into()],
      zones:    vec!["Dock".into()],
    });
    let x = m.extract("where is forklift-7 near the dock");
    assert_eq!(x.entities, ["forklift-7"]);
    assert_eq!(x.zones, ["dock"]);
  }

  #[test]
  fn nothing_matches() {
    let x = VocabularyMatcher::default().extract("hello there");
    assert!(x.entities.is_empty());
    assert!(x.zones.is_empty());
    assert_eq!(x.first_zone(), None);
  }
}
