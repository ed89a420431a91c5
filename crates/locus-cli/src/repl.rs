//! Interactive prompt: read a question, print the query and the answer.

use std::io::{BufRead, Write};

use anyhow::Context as _;
use locus_core::{Assistant, store::LocationStore};

/// How much of the SQL text is echoed before the answer.
pub const SQL_PREVIEW_CHARS: usize = 200;

const EXIT_WORDS: &[&str] = &["quit", "exit", "q"];

/// First `limit` characters of `sql`, with `...` appended when cut.
pub fn preview(sql: &str, limit: usize) -> String {
  match sql.char_indices().nth(limit) {
    Some((cut, _)) => format!("{}...", &sql[..cut]),
    None => sql.to_owned(),
  }
}

fn is_exit(line: &str) -> bool {
  EXIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w))
}

/// Run the prompt until an exit word or end of input.
///
/// A store failure ends the session with an error.
pub fn run<S, R, W>(assistant: &Assistant<S>, mut input: R, mut out: W) -> anyhow::Result<()>
where
  S: LocationStore,
  R: BufRead,
  W: Write,
{
  let banner = "=".repeat(60);
  let rule = "-".repeat(60);

  writeln!(out, "{banner}\nLOCUS\n{banner}")?;
  writeln!(out, "Examples: 'where is alice?', 'list zones', 'quit'\n")?;

  loop {
    write!(out, "Query: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).context("reading question")? == 0 {
      break;
    }
    let question = line.trim();
    if is_exit(question) {
      break;
    }
    if question.is_empty() {
      continue;
    }

    let resp = assistant
      .ask(question)
      .with_context(|| format!("query failed for {question:?}"))?;

    writeln!(out, "\n{rule}")?;
    if let Some(sql) = resp.query() {
      writeln!(out, "SQL: {}\n", preview(sql, SQL_PREVIEW_CHARS))?;
    }
    writeln!(out, "{}", resp.answer)?;
    writeln!(out, "{rule}\n")?;
  }

  writeln!(out, "Goodbye!")?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use locus_core::{
    format::{FALLBACK, NO_DATA},
    plan::QueryPlan,
    store::{ResultSet, Row, Value},
    vocab::Vocabulary,
  };

  use super::*;

  #[derive(Debug)]
  struct Offline;

  impl std::fmt::Display for Offline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str("offline") }
  }

  impl std::error::Error for Offline {}

  /// One zone, or a failure for any ping query.
  struct OneZone;

  impl LocationStore for OneZone {
    type Error = Offline;

    fn execute(&self, plan: &QueryPlan) -> Result<ResultSet, Offline> {
      if plan.sql.contains("FROM pings") {
        return Err(Offline);
      }
      if plan.sql.contains("FROM zones\n") {
        let row: Row = [("zone_name", Value::from("Lobby")), ("floor", Value::from(1_i64))]
          .into_iter()
          .collect();
        return Ok(vec![row]);
      }
      Ok(vec![])
    }

    fn close(self) -> Result<(), Offline> { Ok(()) }
  }

  fn session(input: &str) -> (anyhow::Result<()>, String) {
    let assistant = Assistant::new(OneZone, Vocabulary::default());
    let mut out = Vec::new();
    let result = run(&assistant, input.as_bytes(), &mut out);
    (result, String::from_utf8(out).unwrap())
  }

  #[test]
  fn preview_cuts_on_characters() {
    assert_eq!(preview("SELECT 1", 200), "SELECT 1");
    assert_eq!(preview("abcdef", 3), "abc...");
    assert_eq!(preview("ééé", 2), "éé...");
    assert_eq!(preview("abc", 3), "abc");
  }

  #[test]
  fn exit_words_are_case_insensitive() {
    assert!(is_exit("QUIT"));
    assert!(is_exit("Q"));
    assert!(!is_exit("quite"));
  }

  #[test]
  fn answers_until_quit() {
    let (result, out) = session("list zones\n\nwhere is nobody\nExit\nlist zones\n");
    result.unwrap();
    assert_eq!(out.matches("• Lobby (Floor 1)").count(), 1);
    assert!(out.contains("SQL: SELECT name AS zone_name"));
    assert!(out.contains(FALLBACK));
    assert!(out.trim_end().ends_with("Goodbye!"));
  }

  #[test]
  fn end_of_input_ends_the_session() {
    let (result, out) = session("where is alice");
    result.unwrap();
    assert!(out.contains(NO_DATA));
    assert!(out.contains("Goodbye!"));
  }

  #[test]
  fn store_failure_ends_the_session() {
    let (result, out) = session("low rssi\nlist zones\n");
    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("offline"));
    assert!(!out.contains("Goodbye!"));
  }
}
