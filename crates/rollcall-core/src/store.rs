//! The `VoterStore` trait.
//!
//! Implemented by storage backends (e.g. `rollcall-store-sqlite`). The
//! importer, differ and lookup paths depend on this abstraction, not on any
//! concrete backend.

use std::{collections::BTreeMap, future::Future};

use crate::voter::{ElectionRecord, ElectionTurnout, Voter};

/// Result of inserting one row of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
  Inserted,
  /// A row with the same key already exists; the existing row is kept.
  Ignored,
  /// The backend rejected the row. The rest of the batch is unaffected.
  Failed(String),
}

/// Abstraction over one snapshot of the voter roll.
///
/// Writes are insert-or-ignore only: rows are never updated or deleted.
pub trait VoterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert a batch of voters, one outcome per input in input order.
  fn insert_voters(
    &self,
    voters: Vec<Voter>,
  ) -> impl Future<Output = Result<Vec<InsertOutcome>, Self::Error>> + Send + '_;

  /// Insert a batch of election-history rows, one outcome per input.
  fn insert_history(
    &self,
    records: Vec<ElectionRecord>,
  ) -> impl Future<Output = Result<Vec<InsertOutcome>, Self::Error>> + Send + '_;

  // ── County partitions ─────────────────────────────────────────────────

  /// All voters whose county is `county_code`, ordered by id.
  fn county_voters<'a>(
    &'a self,
    county_code: &'a str,
  ) -> impl Future<Output = Result<Vec<Voter>, Self::Error>> + Send + 'a;

  /// History rows belonging to voters whose county is `county_code`.
  fn county_history<'a>(
    &'a self,
    county_code: &'a str,
  ) -> impl Future<Output = Result<Vec<ElectionRecord>, Self::Error>> + Send + 'a;

  /// The `limit` most recent distinct (date, description) pairs for the
  /// county, date descending with ties broken by description ascending,
  /// each with its count of distinct voters.
  fn recent_elections<'a>(
    &'a self,
    county_code: &'a str,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<ElectionTurnout>, Self::Error>> + Send + 'a;

  /// Current county of each id that exists anywhere in the store. Ids that
  /// are absent do not appear in the map.
  fn locate_voters(
    &self,
    ids: Vec<i64>,
  ) -> impl Future<Output = Result<BTreeMap<i64, Option<String>>, Self::Error>> + Send + '_;

  // ── Point lookups ─────────────────────────────────────────────────────

  /// Voters matching first and last name case-insensitively and zip code
  /// exactly, ordered by id.
  fn find_voters<'a>(
    &'a self,
    first_name: &'a str,
    last_name: &'a str,
    zip_code: &'a str,
  ) -> impl Future<Output = Result<Vec<Voter>, Self::Error>> + Send + 'a;

  /// Full history for one voter, date descending.
  fn voter_history(
    &self,
    voter_id: i64,
  ) -> impl Future<Output = Result<Vec<ElectionRecord>, Self::Error>> + Send + '_;
}
