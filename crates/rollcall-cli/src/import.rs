//! `rollcall import`

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use rollcall_import::{DEFAULT_BATCH_SIZE, FileKind, ImportSummary, Importer};
use rollcall_store_sqlite::SqliteStore;

/// Diagnostics printed in the closing tally; the rest are in the log.
const SHOWN_ERRORS: usize = 10;

#[derive(Args, Debug)]
pub struct ImportArgs {
  /// Directory holding the extract files.
  #[arg(default_value = ".")]
  pub dir: PathBuf,

  /// Snapshot to create or extend.
  #[arg(long, env = "ROLLCALL_DB", default_value = "voters.db")]
  pub db: PathBuf,

  /// Rows per insert transaction.
  #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
  pub batch_size: usize,

  /// Print the run summary as JSON instead of a text tally.
  #[arg(long)]
  pub json: bool,
}

pub async fn run(args: ImportArgs) -> Result<()> {
  let store = SqliteStore::open(&args.db)
    .await
    .with_context(|| format!("failed to open {}", args.db.display()))?;

  let summary = Importer::new(&store)
    .with_batch_size(args.batch_size)
    .import_dir(&args.dir)
    .await
    .with_context(|| format!("import from {} failed", args.dir.display()))?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&summary)?);
  } else {
    print!("{}", tally(&summary));
  }
  Ok(())
}

fn tally(summary: &ImportSummary) -> String {
  let mut out = String::new();
  out.push_str(&"=".repeat(60));
  out.push_str("\nIMPORT COMPLETED\n");
  out.push_str(&format!(
    "Voters imported           : {} ({} already present)\n",
    summary.inserted(FileKind::Voters),
    summary.ignored(FileKind::Voters),
  ));
  out.push_str(&format!(
    "Election records imported : {} ({} already present)\n",
    summary.inserted(FileKind::History),
    summary.ignored(FileKind::History),
  ));
  for path in &summary.missing {
    out.push_str(&format!("Missing file              : {}\n", path.display()));
  }
  for file in summary.skipped_files() {
    out.push_str(&format!("Skipped file              : {file}\n"));
  }

  let count = summary.error_count();
  if count == 0 {
    out.push_str("No errors!\n");
  } else {
    out.push_str(&format!(
      "Warnings/Errors           : {count} (first {})\n",
      count.min(SHOWN_ERRORS)
    ));
    for e in summary.errors().take(SHOWN_ERRORS) {
      out.push_str(&format!("   • {e}\n"));
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use rollcall_import::{HISTORY_COLUMNS, VOTER_COLUMNS};

  use super::*;

  #[tokio::test]
  async fn import_then_tally() {
    let dir = tempfile::TempDir::new().unwrap();
    let header = vec!["H"; VOTER_COLUMNS].join(",");
    let mut row = vec![""; VOTER_COLUMNS];
    row[0] = "1";
    row[1] = "01";
    std::fs::write(dir.path().join("Voter01.txt"), format!("{header}\n{}\n1,2\n", row.join(",")))
      .unwrap();
    std::fs::write(
      dir.path().join("Election01.txt"),
      format!("{}\n1,11/05/2024,GENERAL,ABSENTEE\n", vec!["H"; HISTORY_COLUMNS].join(",")),
    )
    .unwrap();

    let db = dir.path().join("voters.db");
    run(ImportArgs { dir: dir.path().into(), db: db.clone(), batch_size: 100, json: false })
      .await
      .unwrap();

    let store = SqliteStore::open(&db).await.unwrap();
    let counts = store.table_counts().await.unwrap();
    assert_eq!((counts.voters, counts.history), (1, 1));

    let summary = Importer::new(&store).import_dir(dir.path()).await.unwrap();
    let text = tally(&summary);
    assert!(text.contains("Voters imported           : 0 (1 already present)"));
    assert!(text.contains("Warnings/Errors           : 1 (first 1)"));
    assert!(text.contains("Voter01.txt:3 wrong column count (2)"));
  }
}
