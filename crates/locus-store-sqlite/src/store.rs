//! [`SqliteStore`] — the SQLite implementation of [`LocationStore`].

use std::path::Path;

use locus_core::{
  plan::QueryPlan,
  store::{LocationStore, ResultSet, Row},
};
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info, warn};

use crate::{
  encode::{decode_cell, encode_param},
  schema::REQUIRED_COLUMNS,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A location store backed by one SQLite connection.
///
/// The connection is opened once and held until [`LocationStore::close`] or
/// drop. `SqliteStore` is `Send` but not `Sync`, so at most one query runs on
/// it at a time.
#[derive(Debug)]
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open an existing store at `path` read-only and check its schema.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = Connection::open_with_flags(
      path,
      OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    let store = Self::from_connection(conn)?;
    info!(path = %path.display(), "opened location store");
    Ok(store)
  }

  /// Wrap an already-open connection, checking its schema first.
  pub fn from_connection(conn: Connection) -> Result<Self> {
    let store = Self { conn };
    store.verify_schema()?;
    Ok(store)
  }

  /// Fail if any table or column a plan may reference is missing.
  ///
  /// Column names compare case-insensitively, as SQLite resolves them.
  fn verify_schema(&self) -> Result<()> {
    let mut stmt = self.conn.prepare("SELECT name FROM pragma_table_info(?1)")?;

    for &(table, columns) in REQUIRED_COLUMNS {
      let present = stmt
        .query_map(rusqlite::params![table], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

      if present.is_empty() {
        return Err(Error::MissingTable(table));
      }
      if let Some(column) = columns
        .iter()
        .find(|c| !present.iter().any(|p| p.eq_ignore_ascii_case(c)))
      {
        return Err(Error::MissingColumn { table, column: *column });
      }
    }
    Ok(())
  }
}

// ─── LocationStore impl ──────────────────────────────────────────────────────

impl LocationStore for SqliteStore {
  type Error = Error;

  fn execute(&self, plan: &QueryPlan) -> Result<ResultSet> {
    let mut stmt = self.conn.prepare(&plan.sql)?;
    if !stmt.readonly() {
      warn!(intent = %plan.intent, "rejected a writing statement");
      return Err(Error::WriteRejected);
    }

    let names: Vec<String> = stmt.column_names().into_iter().map(str::to_owned).collect();
    let params = plan.params.iter().map(encode_param);

    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;
    let mut out = ResultSet::new();
    while let Some(row) = rows.next()? {
      let mut cells = Vec::with_capacity(names.len());
      for (i, name) in names.iter().enumerate() {
        cells.push((name.clone(), decode_cell(name, row.get(i)?)?));
      }
      out.push(Row::new(cells));
    }

    debug!(intent = %plan.intent, rows = out.len(), "plan executed");
    Ok(out)
  }

  fn close(self) -> Result<()> {
    self.conn.close().map_err(|(_, e)| Error::Database(e))?;
    info!("closed location store");
    Ok(())
  }
}
