//! Core types and trait definitions for the rollcall voter-roll toolkit.
//!
//! This crate is deliberately free of database, file-format and HTTP
//! dependencies. The importer, the SQLite backend, the report emitter and both
//! front ends depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod compare;
pub mod county;
pub mod error;
pub mod lookup;
pub mod store;
pub mod voter;

pub use error::{Error, Result};
