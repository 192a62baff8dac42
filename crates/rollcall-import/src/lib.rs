//! Delimited-file importer for voter-roll extracts.
//!
//! Reads the 38-column voter files and 4-column election-history files of a
//! statewide extract and writes them to any [`rollcall_core::store::VoterStore`].
//! A bad row is logged and skipped; it never aborts the file.
//!
//! ```no_run
//! # async fn run(store: &rollcall_store_sqlite::SqliteStore) -> rollcall_import::Result<()> {
//! use rollcall_import::Importer;
//!
//! let summary = Importer::new(store).import_dir(std::path::Path::new("extract")).await?;
//! println!("{} diagnostics", summary.error_count());
//! # Ok(()) }
//! ```

mod date;
mod encoding;
mod importer;
mod layout;

pub mod error;

pub use date::parse_date;
pub use error::{Error, Result, RowError, RowFault};
pub use importer::{DEFAULT_BATCH_SIZE, ImportReport, ImportSummary, Importer};
pub use layout::{FileKind, HISTORY_COLUMNS, Layout, VOTER_COLUMNS};
