//! `rollcall lookup`

use std::{fmt::Write as _, path::PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;
use rollcall_core::lookup::{LookupMatch, LookupReport, LookupRequest, lookup};
use rollcall_store_sqlite::SqliteStore;

#[derive(Args, Debug)]
pub struct LookupArgs {
  #[arg(long)]
  pub first: Option<String>,

  #[arg(long)]
  pub last: Option<String>,

  #[arg(long)]
  pub zip: Option<String>,

  /// Snapshot to search.
  #[arg(long, env = "ROLLCALL_DB", default_value = "voters.db")]
  pub db: PathBuf,

  /// Print the JSON payload the web endpoint returns.
  #[arg(long)]
  pub json: bool,
}

pub async fn run(args: LookupArgs) -> Result<()> {
  let store = SqliteStore::open_read_only(&args.db)
    .await
    .with_context(|| format!("cannot open {}", args.db.display()))?;

  let request = LookupRequest {
    first_name: args.first,
    last_name:  args.last,
    zip_code:   args.zip,
  };
  let report = lookup(&store, &request).await.context("lookup failed")?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print!("{}", render_text(&report));
  }
  Ok(())
}

fn render_text(report: &LookupReport) -> String {
  let mut out = String::new();
  match report {
    LookupReport::Error(problem) => {
      let _ = writeln!(out, "Error: {problem}");
    }
    LookupReport::Results(results) => {
      for m in results {
        render_match(&mut out, m);
      }
    }
  }
  out
}

fn render_match(out: &mut String, m: &LookupMatch) {
  let info = &m.voter_info;
  let more = &m.additional_details;
  let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());

  let name = [&info.first_name, &info.middle_name, &info.last_name, &more.name_suffix]
    .into_iter()
    .filter_map(|p| p.as_deref())
    .collect::<Vec<_>>()
    .join(" ");
  let street = [&more.house_number, &more.street_name, &more.unit_type, &more.unit_number]
    .into_iter()
    .filter_map(|p| p.as_deref())
    .collect::<Vec<_>>()
    .join(" ");

  let _ = writeln!(out, "Voter {}: {name}", info.voter_id);
  let _ = writeln!(
    out,
    "  Address:     {street}, {} {} {}",
    or_dash(&info.city),
    or_dash(&info.state),
    or_dash(&info.zip_code)
  );
  let _ = writeln!(out, "  County:      {}", or_dash(&more.county_code));
  let _ = writeln!(out, "  Registered:  {}", or_dash(&info.registration_date));
  let _ = writeln!(
    out,
    "  Birth year:  {}",
    info.birth_year.map_or_else(|| "-".to_string(), |y| y.to_string())
  );
  let _ = writeln!(out, "  Precinct:    {}", or_dash(&more.districts.precinct_name));

  if m.election_history.is_empty() {
    out.push_str("  No election history.\n");
  } else {
    out.push_str("  Election history:\n");
    for r in &m.election_history {
      let _ = writeln!(
        out,
        "    {:<10}  {:<40}  {}",
        or_dash(&r.entry.election_date),
        or_dash(&r.entry.election_description),
        or_dash(&r.entry.voting_method),
      );
    }
  }
  out.push('\n');
}
