//! `rollcall compare`

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;
use rollcall_core::{
  compare::{CountyRollup, DEFAULT_RECENT_ELECTIONS, compare_county},
  county::COUNTIES,
};
use rollcall_report::ReportWriter;
use rollcall_store_sqlite::SqliteStore;

#[derive(Args, Debug)]
pub struct CompareArgs {
  /// The newer snapshot.
  pub new_db: PathBuf,

  /// The older snapshot.
  pub old_db: PathBuf,

  /// Where the per-county and roll-up artifacts are written.
  #[arg(long, env = "ROLLCALL_OUT_DIR", default_value = ".")]
  pub out_dir: PathBuf,

  /// Number of recent elections listed per county.
  #[arg(long, default_value_t = DEFAULT_RECENT_ELECTIONS)]
  pub elections: usize,
}

async fn open_snapshot(path: &Path, role: &str) -> Result<SqliteStore> {
  SqliteStore::open_read_only(path)
    .await
    .with_context(|| format!("cannot open {role} snapshot"))
}

pub async fn run(args: CompareArgs) -> Result<()> {
  // Both snapshots must exist before any county is processed.
  let new = open_snapshot(&args.new_db, "new").await?;
  let old = open_snapshot(&args.old_db, "old").await?;

  let writer = ReportWriter::new(&args.out_dir)
    .context("cannot prepare output directory")?
    .with_election_limit(args.elections);

  println!(
    "Comparing:\n  New DB: {}\n  Old DB: {}\n",
    args.new_db.display(),
    args.old_db.display()
  );

  let rollups = compare_all(&old, &new, &writer, args.elections).await?;

  writer.write_rollup(&rollups).context("cannot write roll-up")?;

  println!("\nAll done! {} counties processed.", rollups.len());
  println!("→ Per-county: diff_XX_COUNTY.csv + summary_XX_COUNTY.md");
  println!("→ Master: summary_all_counties.csv + summary_all_counties.md");
  Ok(())
}

/// Diff and write every county in canonical order, returning the roll-up
/// rows in the same order.
async fn compare_all(
  old: &SqliteStore,
  new: &SqliteStore,
  writer: &ReportWriter,
  elections: usize,
) -> Result<Vec<CountyRollup>> {
  let mut rollups = Vec::with_capacity(COUNTIES.len());

  for (idx, county) in COUNTIES.iter().enumerate() {
    println!(
      "[{:02}/{}] Processing County {}: {}...",
      idx + 1,
      COUNTIES.len(),
      county.code,
      county.name
    );

    let diff = compare_county(old, new, *county, elections)
      .await
      .with_context(|| format!("comparing county {}", county.code))?;
    let artifacts = writer
      .write_county(&diff)
      .with_context(|| format!("writing reports for county {}", county.code))?;

    let rollup = diff.rollup();
    println!("  voters removed: {}", rollup.voters_removed);
    println!("  histories changed: {}", rollup.histories_changed);
    println!("  voters who moved: {}", rollup.voters_who_moved);
    println!("  → {}", artifacts.export.display());
    println!("  → {}", artifacts.summary.display());

    rollups.push(rollup);
  }
  Ok(rollups)
}
