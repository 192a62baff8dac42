//! Error types for `rollcall-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown county code: {0:?}")]
  UnknownCounty(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
