//! Error types for `rollcall-import`.

use std::path::PathBuf;

use thiserror::Error;

/// A fault that stops the import of a file.
///
/// Row-level problems never surface here; they are collected as
/// [`RowError`]s in the file's report.
#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot open {}: {source}", path.display())]
  Open {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot read {file}: {source}")]
  Read {
    file:   String,
    #[source]
    source: std::io::Error,
  },

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Why a single row (or a whole file, for header faults) was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowFault {
  #[error("empty file")]
  EmptyFile,

  #[error("header has wrong column count ({found}, expected {expected})")]
  HeaderColumnCount { found: usize, expected: usize },

  #[error("wrong column count ({0})")]
  ColumnCount(usize),

  #[error("missing VoterId")]
  MissingVoterId,

  #[error("invalid {field} '{value}'")]
  InvalidInteger { field: &'static str, value: String },

  /// The store refused the row.
  #[error("rejected: {0}")]
  Rejected(String),
}

/// One row-level diagnostic, rendered as `file:line message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line} {fault}")]
pub struct RowError {
  pub file:  String,
  pub line:  u64,
  pub fault: RowFault,
}
