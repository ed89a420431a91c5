//! Error type for `locus-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  /// The store has no table Locus reads from.
  #[error("store schema has no table {0:?}")]
  MissingTable(&'static str),

  #[error("store table {table:?} has no column {column:?}")]
  MissingColumn {
    table:  &'static str,
    column: &'static str,
  },

  /// A statement that could modify the store was handed to the executor.
  #[error("refusing to run a statement that writes to the store")]
  WriteRejected,

  #[error("column {0:?} holds a blob, which answers cannot render")]
  UnsupportedValue(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
