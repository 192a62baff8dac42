//! Voter and election-history records.
//!
//! Every textual field is an `Option<String>` and an empty string is never
//! stored: constructors and decoders pass values through [`non_empty`], so a
//! field is either absent or carries at least one character.

use serde::{Deserialize, Serialize};

/// Normalise a raw field: empty (or all-whitespace) becomes `None`.
pub fn non_empty(raw: impl AsRef<str>) -> Option<String> {
  let s = raw.as_ref();
  if s.trim().is_empty() { None } else { Some(s.to_owned()) }
}

// ─── Name ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
  pub first:  Option<String>,
  pub middle: Option<String>,
  pub last:   Option<String>,
  pub suffix: Option<String>,
}

impl PersonName {
  /// First + middle + last with no separator, absent parts as empty.
  ///
  /// This is the identity used to decide whether an address change is a
  /// move of the same person.
  pub fn concatenated(&self) -> String {
    [&self.first, &self.middle, &self.last]
      .into_iter()
      .map(|p| p.as_deref().unwrap_or(""))
      .collect()
  }

  /// Human-readable "First Middle Last", skipping absent parts.
  pub fn display(&self) -> String {
    [&self.first, &self.middle, &self.last]
      .into_iter()
      .filter_map(|p| p.as_deref())
      .collect::<Vec<_>>()
      .join(" ")
  }
}

// ─── Addresses ────────────────────────────────────────────────────────────────

/// Residential (physical) address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Residence {
  pub house_number: Option<String>,
  pub street_name:  Option<String>,
  pub unit_type:    Option<String>,
  pub unit_number:  Option<String>,
  pub address2:     Option<String>,
  pub city:         Option<String>,
  pub state:        Option<String>,
  pub zip_code:     Option<String>,
}

impl Residence {
  /// Whether the fields that define "where the voter lives" differ.
  ///
  /// Unit type and number treat absent as empty. House number, street, city
  /// and zip are compared as exact optional values with no case folding.
  /// `address2` and `state` do not participate.
  pub fn differs_from(&self, other: &Residence) -> bool {
    fn unit(v: &Option<String>) -> &str { v.as_deref().unwrap_or("") }

    self.house_number != other.house_number
      || self.street_name != other.street_name
      || unit(&self.unit_type) != unit(&other.unit_type)
      || unit(&self.unit_number) != unit(&other.unit_number)
      || self.city != other.city
      || self.zip_code != other.zip_code
  }

  /// Single-line rendering used by the text lookup report.
  pub fn one_line(&self) -> String {
    let street = [
      &self.house_number,
      &self.street_name,
      &self.unit_type,
      &self.unit_number,
    ]
    .into_iter()
    .filter_map(|p| p.as_deref())
    .collect::<Vec<_>>()
    .join(" ");

    let locality = [&self.city, &self.state, &self.zip_code]
      .into_iter()
      .filter_map(|p| p.as_deref())
      .collect::<Vec<_>>()
      .join(" ");

    match (street.is_empty(), locality.is_empty()) {
      (false, false) => format!("{street}, {locality}"),
      (false, true) => street,
      (true, _) => locality,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingAddress {
  pub address:  Option<String>,
  pub city:     Option<String>,
  pub state:    Option<String>,
  pub zip_code: Option<String>,
}

// ─── Districts ────────────────────────────────────────────────────────────────

/// Jurisdiction-internal district codes. Opaque to everything in this
/// workspace; carried through import, storage and lookup unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Districts {
  pub state_mcd_code: Option<String>,
  pub mcd_name:       Option<String>,
  pub precinct_code:  Option<String>,
  pub precinct_name:  Option<String>,
  pub ward_code:      Option<String>,
  pub school:         Option<String>,
  pub school_sub:     Option<String>,
  pub judicial:       Option<String>,
  pub legislative:    Option<String>,
  pub state_senate:   Option<String>,
  pub congressional:  Option<String>,
  pub commissioner:   Option<String>,
  pub park:           Option<String>,
  pub soil_water:     Option<String>,
  pub hospital:       Option<String>,
}

// ─── Voter ────────────────────────────────────────────────────────────────────

/// One registrant. `voter_id` is stable across snapshots of the same roll and
/// is the only join key used by the differ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
  pub voter_id:           i64,
  pub county_code:        Option<String>,
  pub name:               PersonName,
  pub residence:          Residence,
  pub mailing:            MailingAddress,
  pub phone_number:       Option<String>,
  /// ISO `YYYY-MM-DD`.
  pub registration_date:  Option<String>,
  pub birth_year:         Option<i32>,
  pub districts:          Districts,
  pub legacy_id:          Option<String>,
  pub permanent_absentee: Option<String>,
}

// ─── Election history ─────────────────────────────────────────────────────────

/// The comparable part of a history row. Ordering is lexicographic over
/// (date, description, method) with absent values first; ISO dates make that
/// chronological.
#[derive(
  Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HistoryEntry {
  /// ISO `YYYY-MM-DD`.
  pub election_date:        Option<String>,
  pub election_description: Option<String>,
  pub voting_method:        Option<String>,
}

impl HistoryEntry {
  pub fn new(
    date: impl AsRef<str>,
    description: impl AsRef<str>,
    method: impl AsRef<str>,
  ) -> Self {
    Self {
      election_date:        non_empty(date),
      election_description: non_empty(description),
      voting_method:        non_empty(method),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionRecord {
  pub voter_id: i64,
  #[serde(flatten)]
  pub entry:    HistoryEntry,
}

/// Turnout for one (date, description) pair within a county.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionTurnout {
  pub election_date:        Option<String>,
  pub election_description: Option<String>,
  pub voters_who_voted:     u64,
}
