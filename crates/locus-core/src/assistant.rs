//! [`Assistant`] — question in, query and answer out.

use tracing::debug;

use crate::{
  Error, Result,
  format::{self, FALLBACK},
  intent::{self, Signals},
  plan::{self, QueryPlan},
  store::LocationStore,
  time::{Clock, TimeWindowParser},
  vocab::{Vocabulary, VocabularyMatcher},
};

/// The outcome of one question.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
  /// The statement that was run; `None` only when the question was not
  /// understood.
  pub plan:   Option<QueryPlan>,
  pub answer: String,
}

impl Response {
  pub fn query(&self) -> Option<&str> { self.plan.as_ref().map(|p| p.sql.as_str()) }
}

/// Answers operational questions against a [`LocationStore`].
///
/// The assistant owns its store for its whole lifetime. Dropping it releases
/// the connection; [`Assistant::close`] does the same but reports failures.
#[derive(Debug)]
pub struct Assistant<S> {
  store:   S,
  matcher: VocabularyMatcher,
  times:   TimeWindowParser,
}

impl<S: LocationStore> Assistant<S> {
  pub fn new(store: S, vocabulary: Vocabulary) -> Self {
    Self {
      store,
      matcher: VocabularyMatcher::new(vocabulary),
      times: TimeWindowParser::default(),
    }
  }

  /// Replace the wall clock used for "today", "yesterday" and "last N …".
  pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
    self.times = TimeWindowParser::new(clock);
    self
  }

  pub fn store(&self) -> &S { &self.store }

  /// Classify `text`, run the matching query and render the answer.
  ///
  /// Store failures are returned as [`Error::Store`]; nothing is retried.
  pub fn ask(&self, text: &str) -> Result<Response> {
    let normalized = text.to_lowercase();
    let window = self.times.parse(&normalized);
    let extraction = self.matcher.extract(&normalized);
    let intent = intent::classify(&Signals { text: &normalized, extraction: &extraction });

    debug!(
      %intent,
      entities = ?extraction.entities,
      zones = ?extraction.zones,
      window = ?window,
      "classified question"
    );

    let Some(plan) = plan::build(intent, &extraction, window.as_ref()) else {
      return Ok(Response { plan: None, answer: FALLBACK.to_owned() });
    };

    debug!(sql = %plan.sql, params = ?plan.params, "executing plan");
    let rows = self
      .store
      .execute(&plan)
      .map_err(|e| Error::Store(Box::new(e)))?;
    debug!(rows = rows.len(), "plan returned");

    let answer = format::render(plan.intent, &rows)?;
    Ok(Response { plan: Some(plan), answer })
  }

  /// Release the store, reporting any error from doing so.
  pub fn close(self) -> Result<()> {
    self.store.close().map_err(|e| Error::Store(Box::new(e)))
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use chrono::NaiveDate;

  use super::*;
  use crate::{
    format::NO_DATA,
    intent::Intent,
    store::{ResultSet, Row, Value},
    time::FixedClock,
  };

  #[derive(Debug, thiserror::Error)]
  #[error("store unreachable")]
  struct Unreachable;

  /// Returns canned rows and remembers every plan it was given.
  #[derive(Default)]
  struct CannedStore {
    rows:     ResultSet,
    fail:     bool,
    executed: RefCell<Vec<QueryPlan>>,
  }

  impl LocationStore for CannedStore {
    type Error = Unreachable;

    fn execute(&self, plan: &QueryPlan) -> Result<ResultSet, Unreachable> {
      self.executed.borrow_mut().push(plan.clone());
      if self.fail { Err(Unreachable) } else { Ok(self.rows.clone()) }
    }

    fn close(self) -> Result<(), Unreachable> { Ok(()) }
  }

  fn assistant(store: CannedStore) -> Assistant<CannedStore> {
    let now = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(12, 0, 0).unwrap();
    Assistant::new(store, Vocabulary::default()).with_clock(FixedClock(now))
  }

  #[test]
  fn unrecognized_builds_nothing_and_touches_no_store() {
    let a = assistant(CannedStore::default());
    let resp = a.ask("what's the weather like?").unwrap();
    assert_eq!(resp.plan, None);
    assert_eq!(resp.query(), None);
    assert_eq!(resp.answer, FALLBACK);
    assert!(a.store().executed.borrow().is_empty());
  }

  #[test]
  fn empty_rows_keep_the_query() {
    let a = assistant(CannedStore::default());
    let resp = a.ask("List Zones").unwrap();
    assert_eq!(resp.answer, NO_DATA);
    assert!(resp.query().unwrap().contains("FROM zones"));
  }

  #[test]
  fn question_is_normalized_before_matching() {
    let row: Row = [
      ("entity_name", Value::from("Alice Johnson")),
      ("zone_name", Value::from("Engineering Office")),
      ("timestamp", Value::from("2024-03-15T09:00:00")),
    ]
    .into_iter()
    .collect();
    let a = assistant(CannedStore { rows: vec![row], ..Default::default() });

    let resp = a.ask("Where is ALICE?").unwrap();
    assert_eq!(
      resp.answer,
      "Alice Johnson is in Engineering Office (last seen: 2024-03-15T09:00:00)"
    );
    let executed = a.store().executed.borrow();
    assert_eq!(executed[0].intent, Intent::Locate);
    assert_eq!(executed[0].params[0], Value::from("%alice%"));
  }

  #[test]
  fn window_comes_from_the_injected_clock() {
    let a = assistant(CannedStore::default());
    a.ask("who was in the lab today").unwrap();
    let executed = a.store().executed.borrow();
    assert_eq!(
      executed[0].params,
      [
        Value::from("%lab%"),
        Value::from("2024-03-15T00:00:00"),
        Value::from("2024-03-15T12:00:00"),
      ]
    );
  }

  #[test]
  fn store_failure_is_fatal() {
    let a = assistant(CannedStore { fail: true, ..Default::default() });
    let err = a.ask("list zones").unwrap_err();
    assert!(matches!(err, Error::Store(_)));
    assert_eq!(a.store().executed.borrow().len(), 1);
  }

  #[test]
  fn close_releases_the_store() {
    let a = assistant(CannedStore::default());
    assert!(a.close().is_ok());
  }
}
