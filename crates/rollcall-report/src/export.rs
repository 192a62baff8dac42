//! Flat CSV exports: one record-level table per county and the roll-up.

use rollcall_core::{
  compare::{CountyDiff, CountyRollup, DiffKind},
  voter::HistoryEntry,
};

use crate::error::{Error, Result};

pub const COUNTY_EXPORT_HEADER: [&str; 11] = [
  "CountyCode",
  "CountyName",
  "VoterId",
  "FullName",
  "diff_type",
  "ElectionDate_new",
  "ElectionDescription_new",
  "VotingMethod_new",
  "ElectionDate_old",
  "ElectionDescription_old",
  "VotingMethod_old",
];

fn history_fields(entry: Option<&HistoryEntry>) -> [&str; 3] {
  match entry {
    Some(e) => [
      e.election_date.as_deref().unwrap_or(""),
      e.election_description.as_deref().unwrap_or(""),
      e.voting_method.as_deref().unwrap_or(""),
    ],
    None => ["", "", ""],
  }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
  let data = writer.into_inner().map_err(|e| Error::CsvBuffer(e.to_string()))?;
  Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Render `diff_{slug}.csv`: the differ's rows, then one `MOVED` row per
/// moved voter with empty history fields. A county with no changes still
/// gets the header.
pub fn county_export(diff: &CountyDiff) -> Result<String> {
  let mut writer = csv::Writer::from_writer(vec![]);
  writer.write_record(COUNTY_EXPORT_HEADER)?;

  let code = diff.county.code;
  let name = diff.county.name;

  for row in &diff.rows {
    let id = row.voter_id.to_string();
    let [new_date, new_desc, new_method] = history_fields(row.new.as_ref());
    let [old_date, old_desc, old_method] = history_fields(row.old.as_ref());
    writer.write_record([
      code,
      name,
      id.as_str(),
      row.full_name.as_str(),
      row.kind.as_str(),
      new_date,
      new_desc,
      new_method,
      old_date,
      old_desc,
      old_method,
    ])?;
  }

  for m in &diff.moved {
    let id = m.voter_id.to_string();
    writer.write_record([
      code,
      name,
      id.as_str(),
      m.full_name.as_str(),
      DiffKind::Moved.as_str(),
      "",
      "",
      "",
      "",
      "",
      "",
    ])?;
  }

  finish(writer)
}

/// Render `summary_all_counties.csv`.
pub fn rollup_export(rows: &[CountyRollup]) -> Result<String> {
  let mut writer = csv::Writer::from_writer(vec![]);
  if rows.is_empty() {
    // serde only emits the header alongside the first record.
    writer.write_record([
      "CountyCode",
      "CountyName",
      "total_old",
      "total_new",
      "net_change",
      "voters_removed",
      "histories_changed",
      "voters_who_moved",
    ])?;
  }
  for row in rows {
    writer.serialize(row)?;
  }
  finish(writer)
}
