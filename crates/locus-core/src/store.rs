//! The `LocationStore` trait and the row types it returns.
//!
//! The trait is implemented by storage backends (e.g. `locus-store-sqlite`).
//! The [`Assistant`](crate::Assistant) depends on this abstraction, not on any
//! concrete backend.

use std::fmt;

use serde::Serialize;

use crate::plan::QueryPlan;

// ─── Values ──────────────────────────────────────────────────────────────────

/// A single SQL value, used both for bound parameters and result cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
}

impl Value {
  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Integer(_) => "integer",
      Value::Real(_) => "real",
      Value::Text(_) => "text",
    }
  }

  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Value::Integer(i) => Some(*i as f64),
      Value::Real(r) => Some(*r),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::Text(s) => Some(s),
      _ => None,
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Null => f.write_str("NULL"),
      Value::Integer(i) => write!(f, "{i}"),
      Value::Real(r) => write!(f, "{r}"),
      Value::Text(s) => f.write_str(s),
    }
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self { Value::Text(s.to_owned()) }
}

impl From<String> for Value {
  fn from(s: String) -> Self { Value::Text(s) }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self { Value::Integer(i) }
}

impl From<f64> for Value {
  fn from(r: f64) -> Self { Value::Real(r) }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One result row: column names paired with values, in statement order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
  columns: Vec<(String, Value)>,
}

impl Row {
  pub fn new(columns: Vec<(String, Value)>) -> Self { Self { columns } }

  pub fn get(&self, column: &str) -> Option<&Value> {
    self.columns.iter().find(|(name, _)| name == column).map(|(_, v)| v)
  }

  pub fn contains(&self, column: &str) -> bool { self.get(column).is_some() }

  pub fn columns(&self) -> impl Iterator<Item = &str> {
    self.columns.iter().map(|(name, _)| name.as_str())
  }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}

/// Rows in the order the statement produced them.
pub type ResultSet = Vec<Row>;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A read-only relational store holding zones, entities, zone events and
/// pings.
///
/// Implementations run one plan at a time and report failures as-is; callers
/// never retry and never see partial results.
pub trait LocationStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Run a plan and return every row it produces.
  fn execute(&self, plan: &QueryPlan) -> Result<ResultSet, Self::Error>;

  /// Release the underlying connection, reporting any error from doing so.
  fn close(self) -> Result<(), Self::Error>
  where
    Self: Sized;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn row_lookup_by_name_keeps_order() {
    let row: Row = [("zone_name", Value::from("Lab")), ("floor", Value::from(2_i64))]
      .into_iter()
      .collect();
    assert_eq!(row.columns().collect::<Vec<_>>(), ["zone_name", "floor"]);
    assert_eq!(row.get("floor"), Some(&Value::Integer(2)));
    assert!(!row.contains("event_type"));
  }

  #[test]
  fn numeric_coercion() {
    assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
    assert_eq!(Value::Text("3".into()).as_f64(), None);
    assert_eq!(Value::Null.to_string(), "NULL");
  }
}
