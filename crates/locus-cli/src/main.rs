//! `locus` — ask operational questions about a location store.
//!
//! # Usage
//!
//! ```
//! locus                                  # interactive prompt
//! locus --db data/location_data.db ask where is alice
//! locus ask --json how long did bob spend in the lab
//! ```
//!
//! Settings come from `locus.toml` (or `--config`), then `LOCUS_*`
//! environment variables, then flags.

mod repl;

use std::{
  io,
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use locus_core::{Assistant, store::LocationStore, vocab::Vocabulary};
use locus_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "locus", version, about = "Answer questions about people and assets moving through a building")]
struct Args {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "locus.toml")]
  config: PathBuf,

  /// Location database to query; overrides `store_path` from the config.
  #[arg(long, value_name = "FILE")]
  db: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Answer a single question and exit.
  Ask {
    /// Print the query, its parameters and the answer as JSON.
    #[arg(long)]
    json: bool,

    /// The question, e.g. `where is alice`.
    #[arg(required = true, num_args = 1..)]
    question: Vec<String>,
  },
}

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize)]
struct Settings {
  #[serde(default = "default_store_path")]
  store_path: PathBuf,
  #[serde(default)]
  vocabulary: Vocabulary,
}

fn default_store_path() -> PathBuf { PathBuf::from("location_data.db") }

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let settings: Settings = config::Config::builder()
    .add_source(config::File::from(args.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("LOCUS"))
    .build()
    .context("failed to read config file")?
    .try_deserialize()
    .context("failed to deserialise settings")?;

  let store_path = expand_tilde(args.db.as_deref().unwrap_or(&settings.store_path));
  let store = SqliteStore::open(&store_path)
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let assistant = Assistant::new(store, settings.vocabulary);

  let result = match args.command {
    Some(Command::Ask { json, question }) => ask_once(&assistant, &question.join(" "), json),
    None => repl::run(&assistant, io::stdin().lock(), io::stdout().lock()),
  };

  // Release the connection whichever way the session ended.
  let closed = assistant.close();
  result?;
  closed.context("failed to close store")?;
  Ok(())
}

fn ask_once<S: LocationStore>(
  assistant: &Assistant<S>,
  question:  &str,
  json:      bool,
) -> anyhow::Result<()> {
  let resp = assistant.ask(question).context("query failed")?;

  if json {
    let out = serde_json::json!({
      "query":  resp.query(),
      "params": resp.plan.as_ref().map(|p| &p.params),
      "answer": resp.answer,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
  } else {
    if let Some(sql) = resp.query() {
      println!("SQL: {}\n", repl::preview(sql, repl::SQL_PREVIEW_CHARS));
    }
    println!("{}", resp.answer);
  }
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
