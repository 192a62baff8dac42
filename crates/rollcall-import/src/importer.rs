//! Streaming import of extract files into a [`VoterStore`].

use std::{
  fs::File,
  io::{self, Cursor, Read},
  path::{Path, PathBuf},
};

use encoding_rs_io::DecodeReaderBytesBuilder;

use rollcall_core::{
  store::{InsertOutcome, VoterStore},
  voter::{ElectionRecord, Voter},
};
use serde::{Serialize, Serializer};

use crate::{
  encoding::{self, SNIFF_BYTES},
  error::{Error, Result, RowError, RowFault},
  layout::{FileKind, Layout},
};

/// Rows sent to the store per transaction unless overridden.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

const PROGRESS_EVERY: u64 = 100_000;

// ─── Reports ─────────────────────────────────────────────────────────────────

/// Outcome of importing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
  pub file:      String,
  pub kind:      FileKind,
  /// Data rows read, header excluded.
  pub rows_seen: u64,
  pub inserted:  u64,
  /// Rows whose key already existed.
  pub ignored:   u64,
  /// The header was rejected and no rows were read.
  pub skipped:   bool,
  #[serde(serialize_with = "display_all")]
  pub errors:    Vec<RowError>,
}

fn display_all<S: Serializer>(errors: &[RowError], s: S) -> Result<S::Ok, S::Error> {
  s.collect_seq(errors.iter().map(ToString::to_string))
}

impl ImportReport {
  fn new(file: &str, kind: FileKind) -> Self {
    Self {
      file: file.to_owned(),
      kind,
      rows_seen: 0,
      inserted: 0,
      ignored: 0,
      skipped: false,
      errors: vec![],
    }
  }

  fn fault(&mut self, line: u64, fault: RowFault) {
    tracing::debug!(file = %self.file, line, %fault, "row skipped");
    self.errors.push(RowError { file: self.file.clone(), line, fault });
  }
}

/// Outcome of a whole run over several files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
  pub reports: Vec<ImportReport>,
  /// Expected files that did not exist.
  pub missing: Vec<PathBuf>,
}

impl ImportSummary {
  pub fn inserted(&self, kind: FileKind) -> u64 {
    self.reports.iter().filter(|r| r.kind == kind).map(|r| r.inserted).sum()
  }

  pub fn ignored(&self, kind: FileKind) -> u64 {
    self.reports.iter().filter(|r| r.kind == kind).map(|r| r.ignored).sum()
  }

  pub fn skipped_files(&self) -> impl Iterator<Item = &str> {
    self.reports.iter().filter(|r| r.skipped).map(|r| r.file.as_str())
  }

  /// Every diagnostic of the run, in file then line order.
  pub fn errors(&self) -> impl Iterator<Item = &RowError> {
    self.reports.iter().flat_map(|r| r.errors.iter())
  }

  pub fn error_count(&self) -> usize { self.reports.iter().map(|r| r.errors.len()).sum() }
}

// ─── Importer ────────────────────────────────────────────────────────────────

/// Reads extract files and writes their rows to `store`.
pub struct Importer<'s, S> {
  store:      &'s S,
  batch_size: usize,
}

impl<'s, S: VoterStore> Importer<'s, S> {
  pub fn new(store: &'s S) -> Self { Self { store, batch_size: DEFAULT_BATCH_SIZE } }

  pub fn with_batch_size(mut self, batch_size: usize) -> Self {
    self.batch_size = batch_size.max(1);
    self
  }

  /// Import every conventional extract file found in `dir`: voter files
  /// first, then election-history files. Absent files are noted and skipped.
  pub async fn import_dir(&self, dir: &Path) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for kind in [FileKind::Voters, FileKind::History] {
      for name in kind.default_files() {
        let path = dir.join(&name);
        let report = match kind {
          FileKind::Voters => self.import_file::<Voter>(&path).await?,
          FileKind::History => self.import_file::<ElectionRecord>(&path).await?,
        };
        match report {
          Some(r) => summary.reports.push(r),
          None => summary.missing.push(path),
        }
      }
    }
    Ok(summary)
  }

  /// Import one file. Returns `None` when the file does not exist.
  pub async fn import_file<L: Layout>(&self, path: &Path) -> Result<Option<ImportReport>> {
    let file = match File::open(path) {
      Ok(f) => f,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        tracing::warn!(path = %path.display(), "input file missing");
        return Ok(None);
      }
      Err(source) => return Err(Error::Open { path: path.to_path_buf(), source }),
    };

    let name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| path.display().to_string());
    self.import_reader::<L, _>(&name, file).await.map(Some)
  }

  /// Import rows of layout `L` from `reader`. `name` labels diagnostics.
  ///
  /// Line 1 is the header. Its field count must match the layout or the
  /// whole input is skipped. The encoding is detected from the first
  /// [`SNIFF_BYTES`] and the whole input is decoded with it; a byte order
  /// mark takes precedence.
  pub async fn import_reader<L: Layout, R: Read>(
    &self,
    name: &str,
    mut reader: R,
  ) -> Result<ImportReport> {
    let mut report = ImportReport::new(name, L::KIND);
    let expected = L::KIND.columns();

    let mut head = Vec::new();
    reader
      .by_ref()
      .take(SNIFF_BYTES)
      .read_to_end(&mut head)
      .map_err(|source| Error::Read { file: name.to_owned(), source })?;
    let encoding = encoding::detect(&head);

    let decoded = DecodeReaderBytesBuilder::new()
      .encoding(Some(encoding))
      .bom_override(true)
      .build(Cursor::new(head).chain(reader));

    let mut rdr = csv::ReaderBuilder::new()
      .has_headers(false)
      .flexible(true)
      .quote(b'"')
      .from_reader(decoded);

    let mut record = csv::StringRecord::new();

    tracing::info!(file = name, kind = ?L::KIND, encoding = encoding.name(), "importing");

    if !rdr.read_record(&mut record)? {
      report.skipped = true;
      report.fault(1, RowFault::EmptyFile);
      tracing::warn!(file = name, "empty input skipped");
      return Ok(report);
    }
    if record.len() != expected {
      report.skipped = true;
      report.fault(1, RowFault::HeaderColumnCount { found: record.len(), expected });
      tracing::warn!(file = name, found = record.len(), expected, "header rejected, file skipped");
      return Ok(report);
    }

    let mut batch: Vec<L> = Vec::with_capacity(self.batch_size);
    let mut lines: Vec<u64> = Vec::with_capacity(self.batch_size);
    let mut fallback_line = 1;

    while rdr.read_record(&mut record)? {
      fallback_line += 1;
      let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);
      report.rows_seen += 1;

      let fields: Vec<String> = record.iter().map(|f| f.trim_start().to_owned()).collect();
      match L::decode(&fields) {
        Ok(row) => {
          batch.push(row);
          lines.push(line);
        }
        Err(fault) => report.fault(line, fault),
      }

      if batch.len() >= self.batch_size {
        self.flush(&mut report, &mut batch, &mut lines).await?;
      }
      if report.rows_seen % PROGRESS_EVERY == 0 {
        tracing::info!(file = name, rows = report.rows_seen, "rows so far");
      }
    }
    self.flush(&mut report, &mut batch, &mut lines).await?;

    tracing::info!(
      file = name,
      inserted = report.inserted,
      ignored = report.ignored,
      errors = report.errors.len(),
      "finished"
    );
    Ok(report)
  }

  async fn flush<L: Layout>(
    &self,
    report: &mut ImportReport,
    batch: &mut Vec<L>,
    lines: &mut Vec<u64>,
  ) -> Result<()> {
    if batch.is_empty() {
      return Ok(());
    }
    let rows = std::mem::take(batch);
    let outcomes = L::insert(self.store, rows)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    for (outcome, line) in outcomes.into_iter().zip(lines.drain(..)) {
      match outcome {
        InsertOutcome::Inserted => report.inserted += 1,
        InsertOutcome::Ignored => report.ignored += 1,
        InsertOutcome::Failed(reason) => report.fault(line, RowFault::Rejected(reason)),
      }
    }
    Ok(())
  }
}
