//! Writes rendered artifacts to an output directory.

use std::{
  fs,
  path::{Path, PathBuf},
};

use rollcall_core::compare::{CountyDiff, CountyRollup, DEFAULT_RECENT_ELECTIONS};

use crate::{
  error::{Error, Result},
  export, markdown,
};

pub const ROLLUP_SUMMARY: &str = "summary_all_counties.md";
pub const ROLLUP_EXPORT: &str = "summary_all_counties.csv";

/// Paths of the two files written for one run step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
  pub summary: PathBuf,
  pub export:  PathBuf,
}

/// Emits every artifact of a comparison run under `out_dir`. File names are
/// derived from county codes only, so a rerun overwrites the same set.
#[derive(Debug, Clone)]
pub struct ReportWriter {
  out_dir:        PathBuf,
  election_limit: usize,
}

impl ReportWriter {
  /// Create `out_dir` if needed.
  pub fn new(out_dir: impl Into<PathBuf>) -> Result<Self> {
    let out_dir = out_dir.into();
    fs::create_dir_all(&out_dir)
      .map_err(|source| Error::Write { path: out_dir.clone(), source })?;
    Ok(Self { out_dir, election_limit: DEFAULT_RECENT_ELECTIONS })
  }

  pub fn with_election_limit(mut self, limit: usize) -> Self {
    self.election_limit = limit;
    self
  }

  pub fn out_dir(&self) -> &Path { &self.out_dir }

  /// Write `summary_{slug}.md` and `diff_{slug}.csv`.
  pub fn write_county(&self, diff: &CountyDiff) -> Result<Artifacts> {
    let slug = diff.county.slug();
    let md_path = self.out_dir.join(format!("summary_{slug}.md"));
    let csv_path = self.out_dir.join(format!("diff_{slug}.csv"));

    write(&csv_path, export::county_export(diff)?)?;
    write(&md_path, markdown::county_summary(diff, self.election_limit))?;
    Ok(Artifacts { summary: md_path, export: csv_path })
  }

  /// Write `summary_all_counties.md` and `summary_all_counties.csv`.
  pub fn write_rollup(&self, rows: &[CountyRollup]) -> Result<Artifacts> {
    let md_path = self.out_dir.join(ROLLUP_SUMMARY);
    let csv_path = self.out_dir.join(ROLLUP_EXPORT);

    write(&csv_path, export::rollup_export(rows)?)?;
    write(&md_path, markdown::rollup_summary(rows))?;
    Ok(Artifacts { summary: md_path, export: csv_path })
  }
}

fn write(path: &Path, contents: String) -> Result<()> {
  fs::write(path, contents).map_err(|source| Error::Write { path: path.to_path_buf(), source })?;
  tracing::debug!(path = %path.display(), "artifact written");
  Ok(())
}
