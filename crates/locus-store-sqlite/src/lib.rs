//! SQLite backend for the Locus location store.
//!
//! Opens a store produced by the data generator read-only, checks that its
//! tables carry the columns Locus queries, and runs plans synchronously on a
//! single connection.

mod encode;
mod store;

pub mod error;
pub mod schema;

pub use error::{Error, Result};
pub use store::SqliteStore;
