//! [`SqliteStore`], the SQLite implementation of [`VoterStore`].

use std::{collections::BTreeMap, path::Path};

use rollcall_core::{
  store::{InsertOutcome, VoterStore},
  voter::{ElectionRecord, ElectionTurnout, Voter},
};
use rusqlite::{OpenFlags, OptionalExtension as _};

use crate::{
  Error, Result,
  encode::{
    HISTORY_COLUMNS, INSERT_HISTORY, INSERT_VOTER, VOTER_COLUMNS, history_from_row,
    insert_history, insert_voter, int, text, voter_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// One voter-roll snapshot backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  read_only:       bool,
}

/// Row counts of the two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
  pub voters:  u64,
  pub history: u64,
}

fn outcome(result: rusqlite::Result<usize>) -> InsertOutcome {
  match result {
    Ok(0) => InsertOutcome::Ignored,
    Ok(_) => InsertOutcome::Inserted,
    Err(e) => InsertOutcome::Failed(e.to_string()),
  }
}

impl SqliteStore {
  /// Open (or create) a writable store at `path` and run schema
  /// initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, read_only: false };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an existing snapshot for reading only. No DDL is run and the file
  /// is never modified.
  pub async fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.is_file() {
      return Err(Error::SnapshotMissing(path.to_path_buf()));
    }
    let conn = tokio_rusqlite::Connection::open_with_flags(
      path,
      OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .await?;
    tracing::debug!(path = %path.display(), "opened snapshot read-only");
    Ok(Self { conn, read_only: true })
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, read_only: false };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn table_counts(&self) -> Result<TableCounts> {
    let (voters, history): (i64, i64) = self
      .conn
      .call(|conn| {
        let voters = conn.query_row("SELECT COUNT(*) FROM voters", [], |r| r.get(0))?;
        let history =
          conn.query_row("SELECT COUNT(*) FROM election_history", [], |r| r.get(0))?;
        Ok((voters, history))
      })
      .await?;
    Ok(TableCounts { voters: voters as u64, history: history as u64 })
  }

  fn ensure_writable(&self) -> Result<()> {
    if self.read_only { Err(Error::ReadOnly) } else { Ok(()) }
  }
}

// ─── VoterStore impl ─────────────────────────────────────────────────────────

impl VoterStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert_voters(&self, voters: Vec<Voter>) -> Result<Vec<InsertOutcome>> {
    self.ensure_writable()?;

    let outcomes = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let outcomes = {
          let mut stmt = tx.prepare(INSERT_VOTER)?;
          voters
            .iter()
            .map(|v| outcome(insert_voter(&mut stmt, v)))
            .collect::<Vec<_>>()
        };
        tx.commit()?;
        Ok(outcomes)
      })
      .await?;
    Ok(outcomes)
  }

  async fn insert_history(&self, records: Vec<ElectionRecord>) -> Result<Vec<InsertOutcome>> {
    self.ensure_writable()?;

    let outcomes = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let outcomes = {
          let mut stmt = tx.prepare(INSERT_HISTORY)?;
          records
            .iter()
            .map(|r| outcome(insert_history(&mut stmt, r)))
            .collect::<Vec<_>>()
        };
        tx.commit()?;
        Ok(outcomes)
      })
      .await?;
    Ok(outcomes)
  }

  // ── County partitions ─────────────────────────────────────────────────────

  async fn county_voters(&self, county_code: &str) -> Result<Vec<Voter>> {
    let code = county_code.to_owned();

    let voters = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {VOTER_COLUMNS} FROM voters WHERE CountyCode = ?1 ORDER BY VoterId"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![code], voter_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(voters)
  }

  async fn county_history(&self, county_code: &str) -> Result<Vec<ElectionRecord>> {
    let code = county_code.to_owned();

    let records = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT h.VoterId, h.ElectionDate, h.ElectionDescription, h.VotingMethod
           FROM election_history h
           JOIN voters v ON v.VoterId = h.VoterId
           WHERE v.CountyCode = ?1
           ORDER BY h.VoterId, h.ElectionDate",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![code], history_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(records)
  }

  async fn recent_elections(
    &self,
    county_code: &str,
    limit: usize,
  ) -> Result<Vec<ElectionTurnout>> {
    let code = county_code.to_owned();
    let limit_val = i64::try_from(limit).unwrap_or(i64::MAX);

    let turnout = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT NULLIF(ElectionDate, '') AS d, NULLIF(ElectionDescription, '') AS e,
                  COUNT(DISTINCT VoterId)
           FROM election_history
           WHERE VoterId IN (SELECT VoterId FROM voters WHERE CountyCode = ?1)
           GROUP BY d, e
           ORDER BY d DESC, e ASC
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![code, limit_val], |row| {
            Ok(ElectionTurnout {
              election_date:        text(row, 0)?,
              election_description: text(row, 1)?,
              voters_who_voted:     int(row, 2)?.unwrap_or(0) as u64,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(turnout)
  }

  async fn locate_voters(&self, ids: Vec<i64>) -> Result<BTreeMap<i64, Option<String>>> {
    let located = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare("SELECT CountyCode FROM voters WHERE VoterId = ?1")?;
        let mut found = BTreeMap::new();
        for id in ids {
          if let Some(county) = stmt
            .query_row(rusqlite::params![id], |row| text(row, 0))
            .optional()?
          {
            found.insert(id, county);
          }
        }
        Ok(found)
      })
      .await?;
    Ok(located)
  }

  // ── Point lookups ─────────────────────────────────────────────────────────

  async fn find_voters(
    &self,
    first_name: &str,
    last_name: &str,
    zip_code: &str,
  ) -> Result<Vec<Voter>> {
    let first = first_name.to_owned();
    let last = last_name.to_owned();
    let zip = zip_code.to_owned();

    let voters = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {VOTER_COLUMNS} FROM voters
           WHERE LOWER(FirstName) = LOWER(?1)
             AND LOWER(LastName)  = LOWER(?2)
             AND ZipCode = ?3
           ORDER BY VoterId"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![first, last, zip], voter_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(voters)
  }

  async fn voter_history(&self, voter_id: i64) -> Result<Vec<ElectionRecord>> {
    let records = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {HISTORY_COLUMNS} FROM election_history
           WHERE VoterId = ?1
           ORDER BY ElectionDate DESC, ElectionDescription ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![voter_id], history_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(records)
  }
}
