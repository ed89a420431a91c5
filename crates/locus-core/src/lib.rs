//! Core types and the question-answering pipeline for Locus.
//!
//! This crate is deliberately free of database dependencies. It turns a
//! free-text question into a [`plan::QueryPlan`], hands the plan to any
//! [`store::LocationStore`], and renders the returned rows as text. The
//! SQLite backend lives in `locus-store-sqlite`.

pub mod assistant;
pub mod error;
pub mod format;
pub mod intent;
pub mod model;
pub mod plan;
pub mod store;
pub mod time;
pub mod vocab;

pub use assistant::{Assistant, Response};
pub use error::{Error, Result};
