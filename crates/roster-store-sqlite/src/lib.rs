//! SQLite backend for the Roster stores.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. [`SqliteStore`] implements
//! [`Repository`](roster_core::repository::Repository) for both
//! [`Country`](roster_core::country::Country) and
//! [`Person`](roster_core::person::Person).

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
