//! Error type for `rollcall-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A snapshot opened for reading does not exist on disk.
  #[error("snapshot not found: {}", .0.display())]
  SnapshotMissing(PathBuf),

  #[error("snapshot is open read-only")]
  ReadOnly,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
