//! Positional field layouts of the two extract files.
//!
//! Voter files carry 38 columns, election-history files 4. Column order is
//! fixed by the upstream extract and mirrors the storage order of the
//! `voters` and `election_history` tables.

use std::future::Future;

use rollcall_core::{
  store::{InsertOutcome, VoterStore},
  voter::{
    Districts, ElectionRecord, HistoryEntry, MailingAddress, PersonName, Residence, Voter,
    non_empty,
  },
};
use serde::Serialize;

use crate::{date::parse_date, error::RowFault};

pub const VOTER_COLUMNS: usize = 38;
pub const HISTORY_COLUMNS: usize = 4;

/// Which of the two extract layouts a file follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
  Voters,
  History,
}

impl FileKind {
  pub fn columns(self) -> usize {
    match self {
      FileKind::Voters => VOTER_COLUMNS,
      FileKind::History => HISTORY_COLUMNS,
    }
  }

  /// Conventional file names of a full extract: `Voter01.txt`..`Voter08.txt`
  /// or `Election01.txt`..`Election08.txt`.
  pub fn default_files(self) -> Vec<String> {
    let stem = match self {
      FileKind::Voters => "Voter",
      FileKind::History => "Election",
    };
    (1..=8).map(|i| format!("{stem}{i:02}.txt")).collect()
  }
}

/// A record type that can be decoded from one data row and stored in
/// batches.
pub trait Layout: Sized + Send + 'static {
  const KIND: FileKind;

  fn decode(fields: &[String]) -> Result<Self, RowFault>;

  fn insert<S: VoterStore>(
    store: &S,
    rows: Vec<Self>,
  ) -> impl Future<Output = Result<Vec<InsertOutcome>, S::Error>> + Send + '_;
}

fn voter_id(raw: &str) -> Result<i64, RowFault> {
  let s = raw.trim();
  if s.is_empty() {
    return Err(RowFault::MissingVoterId);
  }
  s.parse().map_err(|_| RowFault::InvalidInteger { field: "VoterId", value: s.to_owned() })
}

fn birth_year(raw: &str) -> Result<Option<i32>, RowFault> {
  let s = raw.trim();
  if s.is_empty() {
    return Ok(None);
  }
  s.parse()
    .map(Some)
    .map_err(|_| RowFault::InvalidInteger { field: "DOBYear", value: s.to_owned() })
}

impl Layout for Voter {
  const KIND: FileKind = FileKind::Voters;

  fn decode(f: &[String]) -> Result<Self, RowFault> {
    if f.len() != VOTER_COLUMNS {
      return Err(RowFault::ColumnCount(f.len()));
    }
    let t = |i: usize| non_empty(&f[i]);

    Ok(Voter {
      voter_id:           voter_id(&f[0])?,
      county_code:        t(1),
      name:               PersonName { first: t(2), middle: t(3), last: t(4), suffix: t(5) },
      residence:          Residence {
        house_number: t(6),
        street_name:  t(7),
        unit_type:    t(8),
        unit_number:  t(9),
        address2:     t(10),
        city:         t(11),
        state:        t(12),
        zip_code:     t(13),
      },
      mailing:            MailingAddress {
        address:  t(14),
        city:     t(15),
        state:    t(16),
        zip_code: t(17),
      },
      phone_number:       t(18),
      registration_date:  parse_date(&f[19]),
      birth_year:         birth_year(&f[20])?,
      districts:          Districts {
        state_mcd_code: t(21),
        mcd_name:       t(22),
        precinct_code:  t(23),
        precinct_name:  t(24),
        ward_code:      t(25),
        school:         t(26),
        school_sub:     t(27),
        judicial:       t(28),
        legislative:    t(29),
        state_senate:   t(30),
        congressional:  t(31),
        commissioner:   t(32),
        park:           t(33),
        soil_water:     t(34),
        hospital:       t(35),
      },
      legacy_id:          t(36),
      permanent_absentee: t(37),
    })
  }

  fn insert<S: VoterStore>(
    store: &S,
    rows: Vec<Self>,
  ) -> impl Future<Output = Result<Vec<InsertOutcome>, S::Error>> + Send + '_ {
    store.insert_voters(rows)
  }
}

impl Layout for ElectionRecord {
  const KIND: FileKind = FileKind::History;

  fn decode(f: &[String]) -> Result<Self, RowFault> {
    if f.len() != HISTORY_COLUMNS {
      return Err(RowFault::ColumnCount(f.len()));
    }
    Ok(ElectionRecord {
      voter_id: voter_id(&f[0])?,
      entry:    HistoryEntry {
        election_date:        parse_date(&f[1]),
        election_description: non_empty(&f[2]),
        voting_method:        non_empty(&f[3]),
      },
    })
  }

  fn insert<S: VoterStore>(
    store: &S,
    rows: Vec<Self>,
  ) -> impl Future<Output = Result<Vec<InsertOutcome>, S::Error>> + Send + '_ {
    store.insert_history(rows)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fields(values: &[&str]) -> Vec<String> { values.iter().map(|s| s.to_string()).collect() }

  fn voter_fields() -> Vec<String> {
    let mut f = vec![String::new(); VOTER_COLUMNS];
    f[0] = "1001".into();
    f[1] = "01".into();
    f[2] = "ANN".into();
    f[4] = "LEE".into();
    f[6] = "123".into();
    f[7] = "MAIN ST".into();
    f[13] = "56431".into();
    f[19] = "03/15/2020".into();
    f[20] = "1970".into();
    f[23] = "0005".into();
    f
  }

  #[test]
  fn voter_row_maps_positionally() {
    let v = Voter::decode(&voter_fields()).unwrap();
    assert_eq!(v.voter_id, 1001);
    assert_eq!(v.county_code.as_deref(), Some("01"));
    assert_eq!(v.name.first.as_deref(), Some("ANN"));
    assert_eq!(v.name.middle, None);
    assert_eq!(v.residence.street_name.as_deref(), Some("MAIN ST"));
    assert_eq!(v.registration_date.as_deref(), Some("2020-03-15"));
    assert_eq!(v.birth_year, Some(1970));
    // District codes keep their leading zeros.
    assert_eq!(v.districts.precinct_code.as_deref(), Some("0005"));
  }

  #[test]
  fn voter_id_is_required() {
    let mut f = voter_fields();
    f[0] = "  ".into();
    assert_eq!(Voter::decode(&f), Err(RowFault::MissingVoterId));

    f[0] = "A17".into();
    assert_eq!(
      Voter::decode(&f),
      Err(RowFault::InvalidInteger { field: "VoterId", value: "A17".into() })
    );
  }

  #[test]
  fn bad_birth_year_rejects_row_but_bad_date_does_not() {
    let mut f = voter_fields();
    f[19] = "someday".into();
    assert_eq!(Voter::decode(&f).unwrap().registration_date, None);

    f[20] = "19x0".into();
    assert!(matches!(
      Voter::decode(&f),
      Err(RowFault::InvalidInteger { field: "DOBYear", .. })
    ));
  }

  #[test]
  fn history_row_maps_and_normalises_date() {
    let r = ElectionRecord::decode(&fields(&["1002", "11/05/2024", "GENERAL", "ABSENTEE"]))
      .unwrap();
    assert_eq!(r.voter_id, 1002);
    assert_eq!(r.entry, HistoryEntry::new("2024-11-05", "GENERAL", "ABSENTEE"));
  }

  #[test]
  fn wrong_width_is_reported_with_count() {
    assert_eq!(
      ElectionRecord::decode(&fields(&["1002", "11/05/2024", "GENERAL"])),
      Err(RowFault::ColumnCount(3))
    );
  }

  #[test]
  fn default_file_names() {
    let names = FileKind::History.default_files();
    assert_eq!(names.first().map(String::as_str), Some("Election01.txt"));
    assert_eq!(names.last().map(String::as_str), Some("Election08.txt"));
    assert_eq!(FileKind::Voters.default_files()[2], "Voter03.txt");
  }
}
