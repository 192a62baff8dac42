//! Report emitter for snapshot comparisons.
//!
//! Every county yields a Markdown summary and a CSV export, and the run as a
//! whole yields a roll-up pair. Nothing time-dependent is rendered, so the
//! same snapshot pair always produces byte-identical artifacts.

mod export;
mod format;
mod markdown;
mod writer;

pub mod error;

pub use error::{Error, Result};
pub use export::{COUNTY_EXPORT_HEADER, county_export, rollup_export};
pub use format::{percent, signed_thousands, thousands};
pub use markdown::{county_summary, rollup_summary};
pub use writer::{Artifacts, ROLLUP_EXPORT, ROLLUP_SUMMARY, ReportWriter};

#[cfg(test)]
mod tests;
