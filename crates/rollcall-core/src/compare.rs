//! Snapshot differ: old roll → new roll, one county partition at a time.
//!
//! Three independent classifications are computed for each partition:
//!
//! | category | rule |
//! |----------|------|
//! | removed | id in the old partition, not in the new partition |
//! | history changed | id in both, and an old history tuple was altered or dropped |
//! | moved | id in both, same concatenated name, residence fields differ |
//!
//! History is reconciled in application code as a multiset difference (see
//! [`reconcile_history`]) so the result never depends on a database engine's
//! NULL comparison semantics.

use std::{
  collections::{BTreeMap, BTreeSet},
  fmt,
};

use serde::Serialize;

use crate::{
  county::County,
  store::VoterStore,
  voter::{ElectionRecord, ElectionTurnout, HistoryEntry, Residence, Voter},
};

/// Number of elections listed in each county summary unless overridden.
pub const DEFAULT_RECENT_ELECTIONS: usize = 5;

// ─── Categories ───────────────────────────────────────────────────────────────

/// The `diff_type` of an export row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiffKind {
  /// Tuple present in new history only, with no old tuple in the same slot.
  NewElection,
  /// Old tuple with no counterpart at all in the new history.
  MissingInNew,
  /// Old and new tuple occupy the same slot but differ in some field.
  Different,
  /// The voter left the partition.
  Removed,
  /// Pseudo-category appended by the report emitter, one per moved voter.
  Moved,
}

impl DiffKind {
  pub fn as_str(self) -> &'static str {
    match self {
      DiffKind::NewElection => "NEW_ELECTION",
      DiffKind::MissingInNew => "MISSING_IN_NEW",
      DiffKind::Different => "DIFFERENT",
      DiffKind::Removed => "REMOVED",
      DiffKind::Moved => "MOVED",
    }
  }
}

impl fmt::Display for DiffKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

// ─── History reconciliation ───────────────────────────────────────────────────

/// One non-matching outcome of reconciling a voter's two histories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryDelta {
  NewElection(HistoryEntry),
  MissingInNew(HistoryEntry),
  Different { old: HistoryEntry, new: HistoryEntry },
}

impl HistoryDelta {
  /// Whether this delta makes the voter count as "history changed". Pure
  /// additions do not.
  pub fn is_change(&self) -> bool { !matches!(self, HistoryDelta::NewElection(_)) }

  fn into_row(self, voter_id: i64, full_name: &str) -> DiffRow {
    let (kind, old, new) = match self {
      HistoryDelta::NewElection(n) => (DiffKind::NewElection, None, Some(n)),
      HistoryDelta::MissingInNew(o) => (DiffKind::MissingInNew, Some(o), None),
      HistoryDelta::Different { old, new } => (DiffKind::Different, Some(old), Some(new)),
    };
    DiffRow { voter_id, full_name: full_name.to_owned(), kind, old, new }
  }
}

fn tally(entries: &[HistoryEntry]) -> BTreeMap<&HistoryEntry, usize> {
  let mut counts = BTreeMap::new();
  for e in entries {
    *counts.entry(e).or_insert(0) += 1;
  }
  counts
}

/// Entries of `a` not cancelled by an identical entry of `b`, with
/// multiplicity, in entry order.
fn surplus<'e>(
  a: &BTreeMap<&'e HistoryEntry, usize>,
  b: &BTreeMap<&'e HistoryEntry, usize>,
) -> Vec<&'e HistoryEntry> {
  let mut out = vec![];
  for (entry, &n) in a {
    let m = b.get(entry).copied().unwrap_or(0);
    for _ in m..n {
      out.push(*entry);
    }
  }
  out
}

fn same_slot(o: &HistoryEntry, n: &HistoryEntry) -> bool {
  o.election_date == n.election_date && o.election_description == n.election_description
}

fn same_date(o: &HistoryEntry, n: &HistoryEntry) -> bool { o.election_date == n.election_date }

fn same_description(o: &HistoryEntry, n: &HistoryEntry) -> bool {
  o.election_description == n.election_description
}

/// Reconcile one voter's old and new history.
///
/// Both sides are treated as multisets of exact (date, description, method)
/// tuples. Identical tuples cancel out. Remaining old tuples are then paired
/// with remaining new tuples in the same slot ([`HistoryDelta::Different`]),
/// one tier at a time across every old tuple: same date and description,
/// then same date, then same description. Unpaired old tuples are dropped
/// ([`HistoryDelta::MissingInNew`]); new tuples left over are additions
/// ([`HistoryDelta::NewElection`]).
pub fn reconcile_history(old: &[HistoryEntry], new: &[HistoryEntry]) -> Vec<HistoryDelta> {
  let old_counts = tally(old);
  let new_counts = tally(new);

  let old_only = surplus(&old_counts, &new_counts);
  let mut new_only: Vec<Option<&HistoryEntry>> =
    surplus(&new_counts, &old_counts).into_iter().map(Some).collect();

  let tiers: [fn(&HistoryEntry, &HistoryEntry) -> bool; 3] =
    [same_slot, same_date, same_description];
  let mut partners: Vec<Option<&HistoryEntry>> = vec![None; old_only.len()];
  for matches in tiers {
    for (o, partner) in old_only.iter().zip(partners.iter_mut()) {
      if partner.is_some() {
        continue;
      }
      *partner = new_only
        .iter_mut()
        .find(|c| c.is_some_and(|n| matches(o, n)))
        .and_then(Option::take);
    }
  }

  let mut deltas = Vec::with_capacity(old_only.len() + new_only.len());
  for (o, partner) in old_only.into_iter().zip(partners) {
    match partner {
      Some(n) => deltas.push(HistoryDelta::Different { old: o.clone(), new: n.clone() }),
      None => deltas.push(HistoryDelta::MissingInNew(o.clone())),
    }
  }
  deltas.extend(new_only.into_iter().flatten().cloned().map(HistoryDelta::NewElection));
  deltas
}

// ─── Partition classification ─────────────────────────────────────────────────

/// One county's slice of a snapshot, loaded into memory.
#[derive(Debug, Default)]
pub struct Partition {
  voters:  BTreeMap<i64, Voter>,
  history: BTreeMap<i64, Vec<HistoryEntry>>,
}

impl Partition {
  pub fn new(voters: Vec<Voter>, records: Vec<ElectionRecord>) -> Self {
    let voters = voters.into_iter().map(|v| (v.voter_id, v)).collect();
    let mut history: BTreeMap<i64, Vec<HistoryEntry>> = BTreeMap::new();
    for r in records {
      history.entry(r.voter_id).or_default().push(r.entry);
    }
    Self { voters, history }
  }

  pub fn len(&self) -> usize { self.voters.len() }

  pub fn is_empty(&self) -> bool { self.voters.is_empty() }

  fn history_of(&self, voter_id: i64) -> &[HistoryEntry] {
    self.history.get(&voter_id).map(Vec::as_slice).unwrap_or(&[])
  }
}

/// What became of a voter that left a partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
  /// Not present anywhere in the new snapshot.
  Gone,
  /// Still registered in the new snapshot, under another county.
  Transferred { county_code: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedVoter {
  pub voter_id:  i64,
  pub full_name: String,
  pub removal:   Removal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedVoter {
  pub voter_id:  i64,
  pub full_name: String,
  pub from:      Residence,
  pub to:        Residence,
}

/// One row of the per-county export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
  pub voter_id:  i64,
  pub full_name: String,
  pub kind:      DiffKind,
  pub new:       Option<HistoryEntry>,
  pub old:       Option<HistoryEntry>,
}

impl DiffRow {
  /// Voter id, then the row's election date (absent last), then category.
  fn sort_key(&self) -> (i64, bool, Option<&str>, DiffKind) {
    let date = self
      .new
      .as_ref()
      .or(self.old.as_ref())
      .and_then(|e| e.election_date.as_deref());
    (self.voter_id, date.is_none(), date, self.kind)
  }
}

/// The three category sets plus export rows for one partition.
#[derive(Debug, Default)]
pub struct Classification {
  pub removed:         Vec<RemovedVoter>,
  pub history_changed: BTreeSet<i64>,
  pub moved:           Vec<MovedVoter>,
  pub rows:            Vec<DiffRow>,
}

/// Classify every voter of the old partition against the new one.
///
/// Every removed voter starts out as [`Removal::Gone`]; reconciling against
/// the rest of the new snapshot is [`compare_county`]'s job.
pub fn classify(old: &Partition, new: &Partition) -> Classification {
  let mut out = Classification::default();

  for (&id, old_voter) in &old.voters {
    let Some(new_voter) = new.voters.get(&id) else {
      let full_name = old_voter.name.display();
      let entries = old.history_of(id);
      if entries.is_empty() {
        out.rows.push(DiffRow {
          voter_id:  id,
          full_name: full_name.clone(),
          kind:      DiffKind::Removed,
          new:       None,
          old:       None,
        });
      }
      for e in entries {
        out.rows.push(DiffRow {
          voter_id:  id,
          full_name: full_name.clone(),
          kind:      DiffKind::Removed,
          new:       None,
          old:       Some(e.clone()),
        });
      }
      out.removed.push(RemovedVoter { voter_id: id, full_name, removal: Removal::Gone });
      continue;
    };

    let full_name = new_voter.name.display();

    let deltas = reconcile_history(old.history_of(id), new.history_of(id));
    if deltas.iter().any(HistoryDelta::is_change) {
      out.history_changed.insert(id);
    }
    out.rows.extend(deltas.into_iter().map(|d| d.into_row(id, &full_name)));

    if old_voter.name.concatenated() == new_voter.name.concatenated()
      && old_voter.residence.differs_from(&new_voter.residence)
    {
      out.moved.push(MovedVoter {
        voter_id: id,
        full_name,
        from: old_voter.residence.clone(),
        to: new_voter.residence.clone(),
      });
    }
  }

  out.rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
  out
}

// ─── County result ────────────────────────────────────────────────────────────

/// Everything the report emitter needs for one county.
#[derive(Debug)]
pub struct CountyDiff {
  pub county:           County,
  pub total_old:        u64,
  pub total_new:        u64,
  pub recent_elections: Vec<ElectionTurnout>,
  pub removed:          Vec<RemovedVoter>,
  pub history_changed:  BTreeSet<i64>,
  pub moved:            Vec<MovedVoter>,
  pub rows:             Vec<DiffRow>,
}

impl CountyDiff {
  pub fn net_change(&self) -> i64 { self.total_new as i64 - self.total_old as i64 }

  /// Removed voters still registered elsewhere in the new snapshot.
  pub fn transferred_count(&self) -> usize {
    self
      .removed
      .iter()
      .filter(|r| matches!(r.removal, Removal::Transferred { .. }))
      .count()
  }

  pub fn rollup(&self) -> CountyRollup {
    CountyRollup {
      county_code:       self.county.code.to_owned(),
      county_name:       self.county.name.to_owned(),
      total_old:         self.total_old,
      total_new:         self.total_new,
      net_change:        self.net_change(),
      voters_removed:    self.removed.len() as u64,
      histories_changed: self.history_changed.len() as u64,
      voters_who_moved:  self.moved.len() as u64,
    }
  }
}

/// One line of the all-counties roll-up. Field names double as CSV headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountyRollup {
  #[serde(rename = "CountyCode")]
  pub county_code:       String,
  #[serde(rename = "CountyName")]
  pub county_name:       String,
  pub total_old:         u64,
  pub total_new:         u64,
  pub net_change:        i64,
  pub voters_removed:    u64,
  pub histories_changed: u64,
  pub voters_who_moved:  u64,
}

/// Diff one county between two snapshots.
///
/// Both stores are only read. Totals count each voter under its own
/// snapshot's county; a voter whose county changed is therefore removed from
/// the old county and counted in the new county's total, and is reported as
/// [`Removal::Transferred`].
pub async fn compare_county<S: VoterStore>(
  old: &S,
  new: &S,
  county: County,
  election_limit: usize,
) -> Result<CountyDiff, S::Error> {
  let old_part = Partition::new(
    old.county_voters(county.code).await?,
    old.county_history(county.code).await?,
  );
  let new_part = Partition::new(
    new.county_voters(county.code).await?,
    new.county_history(county.code).await?,
  );
  let recent_elections = new.recent_elections(county.code, election_limit).await?;

  let mut classification = classify(&old_part, &new_part);

  if !classification.removed.is_empty() {
    let ids = classification.removed.iter().map(|r| r.voter_id).collect();
    let located = new.locate_voters(ids).await?;
    for r in &mut classification.removed {
      if let Some(county_code) = located.get(&r.voter_id) {
        r.removal = Removal::Transferred { county_code: county_code.clone() };
      }
    }
  }

  tracing::debug!(
    county = county.code,
    old = old_part.len(),
    new = new_part.len(),
    removed = classification.removed.len(),
    history_changed = classification.history_changed.len(),
    moved = classification.moved.len(),
    "county compared"
  );

  Ok(CountyDiff {
    county,
    total_old: old_part.len() as u64,
    total_new: new_part.len() as u64,
    recent_elections,
    removed: classification.removed,
    history_changed: classification.history_changed,
    moved: classification.moved,
    rows: classification.rows,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::voter::{PersonName, non_empty};

  fn voter(id: i64, first: &str, last: &str, house: &str, street: &str) -> Voter {
    Voter {
      voter_id: id,
      county_code: non_empty("01"),
      name: PersonName {
        first: non_empty(first),
        last: non_empty(last),
        ..PersonName::default()
      },
      residence: Residence {
        house_number: non_empty(house),
        street_name: non_empty(street),
        city: non_empty("AITKIN"),
        zip_code: non_empty("56431"),
        ..Residence::default()
      },
      ..Voter::default()
    }
  }

  fn record(id: i64, date: &str, desc: &str, method: &str) -> ElectionRecord {
    ElectionRecord { voter_id: id, entry: HistoryEntry::new(date, desc, method) }
  }

  // ── reconcile_history ────────────────────────────────────────────────

  #[test]
  fn identical_histories_reconcile_to_nothing() {
    let h = vec![
      HistoryEntry::new("2022-11-08", "GENERAL", "IN-PERSON"),
      HistoryEntry::new("2024-11-05", "GENERAL", "ABSENTEE"),
    ];
    assert!(reconcile_history(&h, &h).is_empty());
  }

  #[test]
  fn changed_method_in_same_slot_is_different() {
    let old = vec![HistoryEntry::new("2024-11-05", "General", "In-Person")];
    let new = vec![HistoryEntry::new("2024-11-05", "General", "Absentee")];
    let deltas = reconcile_history(&old, &new);
    assert_eq!(deltas, vec![HistoryDelta::Different {
      old: old[0].clone(),
      new: new[0].clone(),
    }]);
    assert!(deltas[0].is_change());
  }

  #[test]
  fn pure_addition_is_not_a_change() {
    let old = vec![HistoryEntry::new("2022-11-08", "GENERAL", "P")];
    let new = vec![
      HistoryEntry::new("2022-11-08", "GENERAL", "P"),
      HistoryEntry::new("2024-11-05", "GENERAL", "P"),
    ];
    let deltas = reconcile_history(&old, &new);
    assert_eq!(deltas.len(), 1);
    assert!(matches!(deltas[0], HistoryDelta::NewElection(_)));
    assert!(!deltas.iter().any(HistoryDelta::is_change));
  }

  #[test]
  fn dropped_record_is_missing_in_new() {
    let old = vec![
      HistoryEntry::new("2020-11-03", "GENERAL", "P"),
      HistoryEntry::new("2022-11-08", "GENERAL", "P"),
    ];
    let new = vec![HistoryEntry::new("2022-11-08", "GENERAL", "P")];
    let deltas = reconcile_history(&old, &new);
    assert_eq!(deltas, vec![HistoryDelta::MissingInNew(old[0].clone())]);
  }

  #[test]
  fn dropped_and_added_with_no_shared_slot_stay_separate() {
    let old = vec![HistoryEntry::new("2020-11-03", "GENERAL", "P")];
    let new = vec![HistoryEntry::new("2024-08-13", "PRIMARY", "P")];
    let deltas = reconcile_history(&old, &new);
    assert_eq!(deltas, vec![
      HistoryDelta::MissingInNew(old[0].clone()),
      HistoryDelta::NewElection(new[0].clone()),
    ]);
  }

  #[test]
  fn duplicate_tuples_are_counted_with_multiplicity() {
    let tuple = HistoryEntry::new("2024-11-05", "GENERAL", "P");
    let old = vec![tuple.clone(), tuple.clone()];
    let new = vec![tuple.clone()];
    assert_eq!(reconcile_history(&old, &new), vec![HistoryDelta::MissingInNew(tuple)]);
  }

  #[test]
  fn slot_prefers_same_date_and_description() {
    let old = vec![HistoryEntry::new("2024-11-05", "GENERAL", "P")];
    let new = vec![
      HistoryEntry::new("2024-11-05", "SCHOOL BOARD", "A"),
      HistoryEntry::new("2024-11-05", "GENERAL", "A"),
    ];
    let deltas = reconcile_history(&old, &new);
    assert!(deltas.contains(&HistoryDelta::Different {
      old: old[0].clone(),
      new: new[1].clone(),
    }));
    assert!(deltas.contains(&HistoryDelta::NewElection(new[0].clone())));
  }

  #[test]
  fn exact_slot_wins_over_an_earlier_description_match() {
    let old = vec![
      HistoryEntry::new("2020-11-03", "GENERAL", "P"),
      HistoryEntry::new("2024-11-05", "GENERAL", "P"),
    ];
    let new = vec![HistoryEntry::new("2024-11-05", "GENERAL", "A")];
    assert_eq!(reconcile_history(&old, &new), vec![
      HistoryDelta::MissingInNew(old[0].clone()),
      HistoryDelta::Different { old: old[1].clone(), new: new[0].clone() },
    ]);
  }

  #[test]
  fn same_date_wins_over_an_earlier_description_match() {
    let old = vec![
      HistoryEntry::new("2022-08-09", "PRIMARY", "P"),
      HistoryEntry::new("2022-11-08", "GENERAL", "P"),
    ];
    let new = vec![
      HistoryEntry::new("2022-11-08", "PRIMARY", "A"),
      HistoryEntry::new("2024-11-05", "GENERAL", "A"),
    ];
    // Old PRIMARY shares only a description with new 2022-11-08, which
    // old GENERAL claims by date first; PRIMARY is left with nothing.
    assert_eq!(reconcile_history(&old, &new), vec![
      HistoryDelta::MissingInNew(old[0].clone()),
      HistoryDelta::Different { old: old[1].clone(), new: new[0].clone() },
      HistoryDelta::NewElection(new[1].clone()),
    ]);
  }

  #[test]
  fn several_dropped_and_added_tuples_pair_by_slot() {
    let old = vec![
      HistoryEntry::new("2018-11-06", "GENERAL", "P"),
      HistoryEntry::new("2020-11-03", "GENERAL", "P"),
      HistoryEntry::new("2022-11-08", "GENERAL", "P"),
    ];
    let new = vec![
      HistoryEntry::new("2020-11-03", "GENERAL", "A"),
      HistoryEntry::new("2022-11-08", "GENERAL", "M"),
      HistoryEntry::new("2024-11-05", "SPECIAL", "A"),
    ];
    let deltas = reconcile_history(&old, &new);
    assert_eq!(deltas, vec![
      HistoryDelta::MissingInNew(old[0].clone()),
      HistoryDelta::Different { old: old[1].clone(), new: new[0].clone() },
      HistoryDelta::Different { old: old[2].clone(), new: new[1].clone() },
      HistoryDelta::NewElection(new[2].clone()),
    ]);
    assert_eq!(deltas.iter().filter(|d| d.is_change()).count(), 3);
  }

  #[test]
  fn absent_dates_pair_with_each_other_before_descriptions() {
    let old = vec![
      HistoryEntry::new("", "GENERAL", "P"),
      HistoryEntry::new("2024-11-05", "GENERAL", "P"),
    ];
    let new = vec![HistoryEntry::new("", "SPECIAL", "A")];
    assert_eq!(reconcile_history(&old, &new), vec![
      HistoryDelta::Different { old: old[0].clone(), new: new[0].clone() },
      HistoryDelta::MissingInNew(old[1].clone()),
    ]);
  }

  #[test]
  fn absent_dates_compare_as_values() {
    let old = vec![HistoryEntry::new("", "GENERAL", "P")];
    let new = vec![HistoryEntry::new("", "GENERAL", "P")];
    assert!(reconcile_history(&old, &new).is_empty());
  }

  // ── classify ─────────────────────────────────────────────────────────

  #[test]
  fn address_change_with_same_history_is_moved_only() {
    let old = Partition::new(
      vec![voter(1001, "ANN", "LEE", "123", "MAIN ST")],
      vec![record(1001, "2022-11-08", "General", "In-Person")],
    );
    let new = Partition::new(
      vec![voter(1001, "ANN", "LEE", "456", "OAK AVE")],
      vec![record(1001, "2022-11-08", "General", "In-Person")],
    );
    let c = classify(&old, &new);
    assert_eq!(c.moved.len(), 1);
    assert_eq!(c.moved[0].voter_id, 1001);
    assert!(c.history_changed.is_empty());
    assert!(c.removed.is_empty());
    assert!(c.rows.is_empty());
  }

  #[test]
  fn name_change_suppresses_moved() {
    let old = Partition::new(vec![voter(7, "ANN", "LEE", "123", "MAIN ST")], vec![]);
    let new = Partition::new(vec![voter(7, "ANN", "KIM", "456", "OAK AVE")], vec![]);
    assert!(classify(&old, &new).moved.is_empty());
  }

  #[test]
  fn unchanged_voter_is_in_no_category() {
    let v = voter(5, "ANN", "LEE", "123", "MAIN ST");
    let h = vec![record(5, "2022-11-08", "GENERAL", "P")];
    let c = classify(
      &Partition::new(vec![v.clone()], h.clone()),
      &Partition::new(vec![v], h),
    );
    assert!(c.removed.is_empty() && c.moved.is_empty() && c.history_changed.is_empty());
  }

  #[test]
  fn new_method_is_history_changed() {
    let old = Partition::new(
      vec![voter(1002, "BO", "DIAZ", "1", "ELM ST")],
      vec![record(1002, "2024-11-05", "General", "In-Person")],
    );
    let new = Partition::new(
      vec![voter(1002, "BO", "DIAZ", "1", "ELM ST")],
      vec![record(1002, "2024-11-05", "General", "Absentee")],
    );
    let c = classify(&old, &new);
    assert_eq!(c.history_changed.iter().copied().collect::<Vec<_>>(), vec![1002]);
    assert!(c.moved.is_empty());
    assert_eq!(c.rows.len(), 1);
    assert_eq!(c.rows[0].kind, DiffKind::Different);
  }

  #[test]
  fn history_change_and_move_can_co_occur() {
    let old = Partition::new(
      vec![voter(3, "CY", "FOX", "1", "ELM ST")],
      vec![record(3, "2024-11-05", "GENERAL", "P")],
    );
    let new = Partition::new(
      vec![voter(3, "CY", "FOX", "2", "ELM ST")],
      vec![record(3, "2024-11-05", "GENERAL", "A")],
    );
    let c = classify(&old, &new);
    assert!(c.history_changed.contains(&3));
    assert_eq!(c.moved.len(), 1);
  }

  #[test]
  fn removed_voter_rows_carry_old_history() {
    let old = Partition::new(
      vec![voter(1003, "DEE", "ORR", "9", "PINE RD"), voter(1004, "EL", "WU", "3", "OAK")],
      vec![
        record(1003, "2020-11-03", "GENERAL", "P"),
        record(1003, "2022-11-08", "GENERAL", "P"),
      ],
    );
    let new = Partition::default();
    let c = classify(&old, &new);

    assert_eq!(c.removed.len(), 2);
    assert!(c.removed.iter().all(|r| r.removal == Removal::Gone));
    let kinds: Vec<_> = c.rows.iter().map(|r| (r.voter_id, r.kind)).collect();
    assert_eq!(kinds, vec![
      (1003, DiffKind::Removed),
      (1003, DiffKind::Removed),
      (1004, DiffKind::Removed),
    ]);
    // A removed voter without history still gets one bare row.
    assert!(c.rows[2].old.is_none() && c.rows[2].new.is_none());
  }

  #[test]
  fn empty_partitions_produce_empty_classification() {
    let c = classify(&Partition::default(), &Partition::default());
    assert!(c.removed.is_empty() && c.rows.is_empty() && c.moved.is_empty());
  }

  #[test]
  fn rows_sort_by_voter_then_date_with_absent_last() {
    let old = Partition::new(vec![voter(9, "A", "B", "1", "X")], vec![
      record(9, "", "SPECIAL", "P"),
      record(9, "2020-11-03", "GENERAL", "P"),
    ]);
    let new = Partition::new(vec![voter(9, "A", "B", "1", "X")], vec![
      record(9, "2018-11-06", "GENERAL", "P"),
    ]);
    let c = classify(&old, &new);
    let dates: Vec<_> = c
      .rows
      .iter()
      .map(|r| {
        r.new
          .as_ref()
          .or(r.old.as_ref())
          .and_then(|e| e.election_date.clone())
      })
      .collect();
    // The dated old tuple pairs with the new one by description; the
    // undated one has no slot and sorts last.
    assert_eq!(dates, vec![Some("2018-11-06".to_string()), None]);
    assert_eq!(c.rows[0].kind, DiffKind::Different);
    assert_eq!(c.rows[1].kind, DiffKind::MissingInNew);
  }
}
