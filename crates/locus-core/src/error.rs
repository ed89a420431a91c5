//! Error types for `locus-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A result row lacked a column the answer template needs.
  #[error("result row has no column {0:?}")]
  MissingColumn(&'static str),

  #[error("column {column:?} holds {found}, expected {expected}")]
  ColumnType {
    column:   &'static str,
    expected: &'static str,
    found:    &'static str,
  },

  #[error("unknown event type: {0:?}")]
  UnknownEventType(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
