//! `rollcall`: import voter-roll extracts, compare snapshots and look up voters.
//!
//! # Usage
//!
//! ```text
//! rollcall import --db voters.db extract/
//! rollcall compare new.db old.db --out-dir reports/
//! rollcall lookup --db voters.db --first ANN --last LEE --zip 56431
//! ```

mod compare;
mod import;
mod lookup;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rollcall", version, about = "Voter-roll import, comparison and lookup")]
struct Args {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Load Voter01..08.txt and Election01..08.txt into a snapshot.
  Import(import::ImportArgs),
  /// Diff two snapshots county by county and write the reports.
  Compare(compare::CompareArgs),
  /// Find voters by first name, last name and zip code.
  Lookup(lookup::LookupArgs),
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  match Args::parse().command {
    Command::Import(args) => import::run(args).await,
    Command::Compare(args) => compare::run(args).await,
    Command::Lookup(args) => lookup::run(args).await,
  }
}
