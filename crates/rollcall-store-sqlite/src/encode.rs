//! Encoding and decoding helpers between rollcall domain types and SQLite
//! rows.
//!
//! Decoding is lenient about storage classes: snapshots written by earlier
//! tooling hold empty strings instead of NULL, zip codes as integers and
//! birth years as text. Every text column is read through [`text`] and every
//! integer column through [`int`], so those quirks decode to the same values
//! a fresh import would produce.

use rollcall_core::voter::{
  Districts, ElectionRecord, HistoryEntry, MailingAddress, PersonName, Residence, Voter,
  non_empty,
};
use rusqlite::{Row, Statement, types::ValueRef};

// ─── Column access ───────────────────────────────────────────────────────────

pub fn text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
  Ok(match row.get_ref(idx)? {
    ValueRef::Null => None,
    ValueRef::Integer(i) => Some(i.to_string()),
    ValueRef::Real(f) => Some(f.to_string()),
    ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
      non_empty(String::from_utf8_lossy(bytes))
    }
  })
}

pub fn int(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<i64>> {
  Ok(match row.get_ref(idx)? {
    ValueRef::Integer(i) => Some(i),
    ValueRef::Real(f) => Some(f as i64),
    ValueRef::Text(bytes) => std::str::from_utf8(bytes)
      .ok()
      .and_then(|s| s.trim().parse().ok()),
    ValueRef::Null | ValueRef::Blob(_) => None,
  })
}

// ─── Voters ──────────────────────────────────────────────────────────────────

/// Column list in storage order; [`voter_from_row`] and [`insert_voter`]
/// depend on it.
pub const VOTER_COLUMNS: &str = "VoterId, CountyCode, FirstName, MiddleName, LastName, \
  NameSuffix, HouseNumber, StreetName, UnitType, UnitNumber, Address2, City, State, \
  ZipCode, MailAddress, MailCity, MailState, MailZipCode, PhoneNumber, RegistrationDate, \
  DOBYear, StateMcdCode, McdName, PrecinctCode, PrecinctName, WardCode, School, SchSub, \
  Judicial, Legislative, StateSen, Congressional, Commissioner, Park, SoilWater, \
  Hospital, LegacyId, PermanentAbsentee";

pub const INSERT_VOTER: &str = "INSERT OR IGNORE INTO voters VALUES (
  ?1,  ?2,  ?3,  ?4,  ?5,  ?6,  ?7,  ?8,  ?9,  ?10,
  ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20,
  ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30,
  ?31, ?32, ?33, ?34, ?35, ?36, ?37, ?38
)";

pub fn voter_from_row(row: &Row<'_>) -> rusqlite::Result<Voter> {
  Ok(Voter {
    voter_id:           row.get(0)?,
    county_code:        text(row, 1)?,
    name:               PersonName {
      first:  text(row, 2)?,
      middle: text(row, 3)?,
      last:   text(row, 4)?,
      suffix: text(row, 5)?,
    },
    residence:          Residence {
      house_number: text(row, 6)?,
      street_name:  text(row, 7)?,
      unit_type:    text(row, 8)?,
      unit_number:  text(row, 9)?,
      address2:     text(row, 10)?,
      city:         text(row, 11)?,
      state:        text(row, 12)?,
      zip_code:     text(row, 13)?,
    },
    mailing:            MailingAddress {
      address:  text(row, 14)?,
      city:     text(row, 15)?,
      state:    text(row, 16)?,
      zip_code: text(row, 17)?,
    },
    phone_number:       text(row, 18)?,
    registration_date:  text(row, 19)?,
    birth_year:         int(row, 20)?.and_then(|y| i32::try_from(y).ok()),
    districts:          Districts {
      state_mcd_code: text(row, 21)?,
      mcd_name:       text(row, 22)?,
      precinct_code:  text(row, 23)?,
      precinct_name:  text(row, 24)?,
      ward_code:      text(row, 25)?,
      school:         text(row, 26)?,
      school_sub:     text(row, 27)?,
      judicial:       text(row, 28)?,
      legislative:    text(row, 29)?,
      state_senate:   text(row, 30)?,
      congressional:  text(row, 31)?,
      commissioner:   text(row, 32)?,
      park:           text(row, 33)?,
      soil_water:     text(row, 34)?,
      hospital:       text(row, 35)?,
    },
    legacy_id:          text(row, 36)?,
    permanent_absentee: text(row, 37)?,
  })
}

/// Execute [`INSERT_VOTER`]; returns the number of rows changed (0 when the
/// id already exists).
pub fn insert_voter(stmt: &mut Statement<'_>, v: &Voter) -> rusqlite::Result<usize> {
  let d = &v.districts;
  stmt.execute(rusqlite::params![
    v.voter_id,
    v.county_code,
    v.name.first,
    v.name.middle,
    v.name.last,
    v.name.suffix,
    v.residence.house_number,
    v.residence.street_name,
    v.residence.unit_type,
    v.residence.unit_number,
    v.residence.address2,
    v.residence.city,
    v.residence.state,
    v.residence.zip_code,
    v.mailing.address,
    v.mailing.city,
    v.mailing.state,
    v.mailing.zip_code,
    v.phone_number,
    v.registration_date,
    v.birth_year,
    d.state_mcd_code,
    d.mcd_name,
    d.precinct_code,
    d.precinct_name,
    d.ward_code,
    d.school,
    d.school_sub,
    d.judicial,
    d.legislative,
    d.state_senate,
    d.congressional,
    d.commissioner,
    d.park,
    d.soil_water,
    d.hospital,
    v.legacy_id,
    v.permanent_absentee,
  ])
}

// ─── Election history ────────────────────────────────────────────────────────

pub const HISTORY_COLUMNS: &str = "VoterId, ElectionDate, ElectionDescription, VotingMethod";

pub const INSERT_HISTORY: &str =
  "INSERT OR IGNORE INTO election_history VALUES (?1, ?2, ?3, ?4)";

pub fn history_from_row(row: &Row<'_>) -> rusqlite::Result<ElectionRecord> {
  Ok(ElectionRecord {
    voter_id: row.get(0)?,
    entry:    HistoryEntry {
      election_date:        text(row, 1)?,
      election_description: text(row, 2)?,
      voting_method:        text(row, 3)?,
    },
  })
}

pub fn insert_history(stmt: &mut Statement<'_>, r: &ElectionRecord) -> rusqlite::Result<usize> {
  stmt.execute(rusqlite::params![
    r.voter_id,
    r.entry.election_date,
    r.entry.election_description,
    r.entry.voting_method,
  ])
}
