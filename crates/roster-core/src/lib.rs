//! Core types and business rules for the Roster country/person registry.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`repository::Repository`]; the stores in
//! [`countries`] and [`persons`] hold the validation, uniqueness, filtering
//! and sorting rules on top of it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod countries;
pub mod country;
pub mod error;
pub mod memory;
pub mod person;
pub mod persons;
pub mod query;
pub mod repository;
pub mod validate;

pub use error::{Error, Result};
