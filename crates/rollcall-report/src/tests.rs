//! Rendering and writing tests over hand-built county diffs.

use std::collections::BTreeSet;

use rollcall_core::{
  compare::{CountyDiff, Partition, classify},
  county,
  voter::{ElectionRecord, ElectionTurnout, HistoryEntry, PersonName, Residence, Voter, non_empty},
};

use crate::*;

fn voter(id: i64, first: &str, last: &str, street: &str) -> Voter {
  Voter {
    voter_id: id,
    county_code: non_empty("01"),
    name: PersonName {
      first: non_empty(first),
      last: non_empty(last),
      ..PersonName::default()
    },
    residence: Residence {
      house_number: non_empty("1"),
      street_name: non_empty(street),
      zip_code: non_empty("56431"),
      ..Residence::default()
    },
    ..Voter::default()
  }
}

fn record(id: i64, date: &str, desc: &str, method: &str) -> ElectionRecord {
  ElectionRecord { voter_id: id, entry: HistoryEntry::new(date, desc, method) }
}

/// Aitkin with one voter of each category and one unchanged voter.
fn aitkin() -> CountyDiff {
  let old = Partition::new(
    vec![
      voter(1001, "ANN", "LEE", "MAIN ST"),
      voter(1002, "BO", "DIAZ", "ELM ST"),
      voter(1003, "CY", "FOX", "PINE RD"),
      voter(1004, "DEE", "ORR", "OAK AVE"),
    ],
    vec![
      record(1002, "2024-11-05", "General", "In-Person"),
      record(1003, "2022-11-08", "General", "In-Person"),
    ],
  );
  let new = Partition::new(
    vec![
      voter(1001, "ANN", "LEE", "OAK AVE"),
      voter(1002, "BO", "DIAZ", "ELM ST"),
      voter(1004, "DEE", "ORR", "OAK AVE"),
    ],
    vec![record(1002, "2024-11-05", "General", "Absentee")],
  );
  let c = classify(&old, &new);

  CountyDiff {
    county:           county::by_code("01").unwrap(),
    total_old:        4,
    total_new:        3,
    recent_elections: vec![ElectionTurnout {
      election_date:        non_empty("2024-11-05"),
      election_description: non_empty("General"),
      voters_who_voted:     1_250,
    }],
    removed:          c.removed,
    history_changed:  c.history_changed,
    moved:            c.moved,
    rows:             c.rows,
  }
}

fn empty(code: &str) -> CountyDiff {
  CountyDiff {
    county:           county::by_code(code).unwrap(),
    total_old:        0,
    total_new:        0,
    recent_elections: vec![],
    removed:          vec![],
    history_changed:  BTreeSet::new(),
    moved:            vec![],
    rows:             vec![],
  }
}

// ─── County summary ──────────────────────────────────────────────────────────

#[test]
fn county_summary_lists_elections_and_breakdown() {
  let md = county_summary(&aitkin(), 5);

  assert!(md.starts_with("# Voter Change Summary: AITKIN County (01)\n\n"));
  assert!(md.contains("**Total Voters (New DB):** 3\n"));
  assert!(md.contains("## Last 5 Elections (by Date)\n"));
  assert!(md.contains("| 2024-11-05 | General | 1,250 |\n"));
  assert!(md.contains("| voters removed | 1 | 33.33% |\n"));
  assert!(md.contains("| histories changed | 1 | 33.33% |\n"));
  assert!(md.contains("| voters who moved | 1 | 33.33% |\n"));
  assert!(md.contains("## Definitions"));
}

#[test]
fn empty_county_summary_is_well_formed() {
  let md = county_summary(&empty("87"), 5);

  assert!(md.starts_with("# Voter Change Summary: YELLOW MEDICINE County (87)"));
  assert!(md.contains("_No election history found in new database._"));
  assert!(md.contains("| voters removed | 0 | 0.00% |"));
  assert!(md.contains("| voters who moved | 0 | 0.00% |"));
  assert!(!md.contains("registered in another county"));
}

#[test]
fn transferred_voters_get_a_note() {
  let mut diff = aitkin();
  diff.removed[0].removal = rollcall_core::compare::Removal::Transferred {
    county_code: Some("02".into()),
  };
  let md = county_summary(&diff, 5);
  assert!(md.contains("_1 of the removed voters are registered in another county"));
}

// ─── County export ───────────────────────────────────────────────────────────

#[test]
fn county_export_has_fixed_header_and_trailing_moved_rows() {
  let csv = county_export(&aitkin()).unwrap();
  let lines: Vec<_> = csv.lines().collect();

  assert_eq!(lines[0], COUNTY_EXPORT_HEADER.join(","));
  assert_eq!(lines[1..], [
    "01,AITKIN,1002,BO DIAZ,DIFFERENT,2024-11-05,General,Absentee,2024-11-05,General,In-Person",
    "01,AITKIN,1003,CY FOX,REMOVED,,,,2022-11-08,General,In-Person",
    "01,AITKIN,1001,ANN LEE,MOVED,,,,,,",
  ]);
}

#[test]
fn empty_county_export_is_header_only() {
  let csv = county_export(&empty("02")).unwrap();
  assert_eq!(csv.lines().count(), 1);
}

// ─── Roll-up ─────────────────────────────────────────────────────────────────

#[test]
fn rollup_renders_signed_net_change() {
  let rows = vec![aitkin().rollup(), empty("02").rollup()];

  let csv = rollup_export(&rows).unwrap();
  let lines: Vec<_> = csv.lines().collect();
  assert_eq!(
    lines[0],
    "CountyCode,CountyName,total_old,total_new,net_change,voters_removed,histories_changed,voters_who_moved"
  );
  assert_eq!(lines[1], "01,AITKIN,4,3,-1,1,1,1");
  assert_eq!(lines[2], "02,ANOKA,0,0,0,0,0,0");

  let md = rollup_summary(&rows);
  assert!(md.contains("| 01 | AITKIN | 4 | 3 | -1 | 1 | 1 | 1 |"));
  assert!(md.contains("| 02 | ANOKA | 0 | 0 | +0 | 0 | 0 | 0 |"));
  assert!(!md.contains("Generated"));
}

#[test]
fn empty_rollup_export_still_has_header() {
  let csv = rollup_export(&[]).unwrap();
  assert!(csv.starts_with("CountyCode,CountyName,total_old"));
}

// ─── Writer ──────────────────────────────────────────────────────────────────

#[test]
fn writer_names_artifacts_by_county_slug() {
  let dir = tempfile::TempDir::new().unwrap();
  let writer = ReportWriter::new(dir.path().join("out")).unwrap();

  let artifacts = writer.write_county(&empty("87")).unwrap();
  assert_eq!(
    artifacts.summary.file_name().unwrap(),
    "summary_87_YELLOW_MEDICINE.md"
  );
  assert_eq!(artifacts.export.file_name().unwrap(), "diff_87_YELLOW_MEDICINE.csv");
  assert!(artifacts.summary.is_file() && artifacts.export.is_file());

  let rollup = writer.write_rollup(&[empty("87").rollup()]).unwrap();
  assert_eq!(rollup.summary.file_name().unwrap(), ROLLUP_SUMMARY);
  assert!(rollup.export.is_file());
}

#[test]
fn rerun_is_byte_identical() {
  let dir = tempfile::TempDir::new().unwrap();
  let writer = ReportWriter::new(dir.path()).unwrap();

  let first = writer.write_county(&aitkin()).unwrap();
  let md = std::fs::read(&first.summary).unwrap();
  let csv = std::fs::read(&first.export).unwrap();

  let second = writer.write_county(&aitkin()).unwrap();
  assert_eq!(std::fs::read(&second.summary).unwrap(), md);
  assert_eq!(std::fs::read(&second.export).unwrap(), csv);
}
