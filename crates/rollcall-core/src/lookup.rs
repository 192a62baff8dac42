//! Point lookup: first name + last name + zip code → voters with history.
//!
//! Caller mistakes (missing parameters) and empty results are not faults;
//! they come back as [`LookupReport::Error`] alongside store errors, which stay
//! in the outer `Result`.

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::{
  store::VoterStore,
  voter::{Districts, ElectionRecord, MailingAddress, Voter},
};

/// The three required search parameters. Absent and blank are equivalent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupRequest {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub zip_code:   Option<String>,
}

impl LookupRequest {
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    zip_code: impl Into<String>,
  ) -> Self {
    Self {
      first_name: Some(first_name.into()),
      last_name:  Some(last_name.into()),
      zip_code:   Some(zip_code.into()),
    }
  }

  /// Trimmed parameters, or the list of missing ones.
  pub fn validate(&self) -> Result<(&str, &str, &str), LookupProblem> {
    fn field(v: &Option<String>) -> Option<&str> {
      v.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    match (field(&self.first_name), field(&self.last_name), field(&self.zip_code)) {
      (Some(f), Some(l), Some(z)) => Ok((f, l, z)),
      (f, l, z) => {
        let missing = [(f, "FirstName"), (l, "LastName"), (z, "ZipCode")]
          .into_iter()
          .filter(|(v, _)| v.is_none())
          .map(|(_, name)| name)
          .collect();
        Err(LookupProblem::MissingParameters(missing))
      }
    }
  }
}

/// Why a lookup produced no results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupProblem {
  #[error("FirstName, LastName, and ZipCode are required parameters (missing: {}).", .0.join(", "))]
  MissingParameters(Vec<&'static str>),

  #[error("No voters found with FirstName='{first_name}', LastName='{last_name}', ZipCode='{zip_code}'.")]
  NoMatch {
    first_name: String,
    last_name:  String,
    zip_code:   String,
  },
}

impl Serialize for LookupProblem {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_string())
  }
}

/// The headline fields shown first for each match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoterInfo {
  pub voter_id:          i64,
  pub first_name:        Option<String>,
  pub middle_name:       Option<String>,
  pub last_name:         Option<String>,
  pub zip_code:          Option<String>,
  pub registration_date: Option<String>,
  pub birth_year:        Option<i32>,
  pub city:              Option<String>,
  pub state:             Option<String>,
}

/// Everything about the voter that is not in [`VoterInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdditionalDetails {
  pub county_code:        Option<String>,
  pub name_suffix:        Option<String>,
  pub house_number:       Option<String>,
  pub street_name:        Option<String>,
  pub unit_type:          Option<String>,
  pub unit_number:        Option<String>,
  pub address2:           Option<String>,
  pub mailing:            MailingAddress,
  pub phone_number:       Option<String>,
  pub districts:          Districts,
  pub legacy_id:          Option<String>,
  pub permanent_absentee: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupMatch {
  pub voter_info:         VoterInfo,
  pub additional_details: AdditionalDetails,
  /// Date descending.
  pub election_history:   Vec<ElectionRecord>,
}

impl LookupMatch {
  pub fn new(voter: Voter, election_history: Vec<ElectionRecord>) -> Self {
    let Voter {
      voter_id,
      county_code,
      name,
      residence,
      mailing,
      phone_number,
      registration_date,
      birth_year,
      districts,
      legacy_id,
      permanent_absentee,
    } = voter;

    Self {
      voter_info: VoterInfo {
        voter_id,
        first_name: name.first,
        middle_name: name.middle,
        last_name: name.last,
        zip_code: residence.zip_code,
        registration_date,
        birth_year,
        city: residence.city,
        state: residence.state,
      },
      additional_details: AdditionalDetails {
        county_code,
        name_suffix: name.suffix,
        house_number: residence.house_number,
        street_name: residence.street_name,
        unit_type: residence.unit_type,
        unit_number: residence.unit_number,
        address2: residence.address2,
        mailing,
        phone_number,
        districts,
        legacy_id,
        permanent_absentee,
      },
      election_history,
    }
  }
}

/// Serialises as `{"results": [...]}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupReport {
  Results(Vec<LookupMatch>),
  Error(LookupProblem),
}

/// Run a lookup against `store`.
pub async fn lookup<S: VoterStore>(
  store: &S,
  request: &LookupRequest,
) -> Result<LookupReport, S::Error> {
  let (first, last, zip) = match request.validate() {
    Ok(params) => params,
    Err(problem) => return Ok(LookupReport::Error(problem)),
  };

  let voters = store.find_voters(first, last, zip).await?;
  if voters.is_empty() {
    return Ok(LookupReport::Error(LookupProblem::NoMatch {
      first_name: first.to_owned(),
      last_name:  last.to_owned(),
      zip_code:   zip.to_owned(),
    }));
  }

  let mut results = Vec::with_capacity(voters.len());
  for voter in voters {
    let history = store.voter_history(voter.voter_id).await?;
    results.push(LookupMatch::new(voter, history));
  }
  Ok(LookupReport::Results(results))
}
