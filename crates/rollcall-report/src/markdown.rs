//! Markdown summaries: one per county and one roll-up.

use std::fmt::Write as _;

use rollcall_core::compare::{CountyDiff, CountyRollup};

use crate::format::{percent, signed_thousands, thousands};

const DEFINITIONS: &str = r#"## Definitions

### voters removed
- **Meaning**: Voter was **in old DB** but **not in new DB** for this county.
- **Conditions**:
  - `VoterId` exists in old DB under this county
  - `VoterId` **missing** from this county in new DB
- **Example**:
  ```
  Old DB: VoterId 12345 (active)
  New DB: VoterId 12345 (gone)
  → Counts as 1 "removed"
  ```

### histories changed
- **Meaning**: Existing voter with **mismatched election history** (not just new votes).
- **Conditions**:
  - Voter in both DBs
  - At least one old election record was dropped, or has:
    - Different `ElectionDate`
    - Different `ElectionDescription`
    - Different `VotingMethod`
- **Example**:
  ```
  Old DB: 2024 General, In-Person
  New DB: 2024 General, Absentee
  → Counts as 1 "history changed"
  ```

### voters who moved
- **Meaning**: Voter **changed residential address** but kept same name and ID.
- **Conditions**:
  - Same `VoterId`
  - **Exact same full name**
  - **At least one address field changed**:
    - HouseNumber, StreetName, UnitType, UnitNumber, City, ZipCode
- **Example**:
  ```
  Old DB: 123 Main St, Aitkin, 56431
  New DB: 456 Oak Ave, Aitkin, 56431
  → Counts as 1 "moved"
  ```
"#;

/// Render `summary_{slug}.md` for one county. `election_limit` is the N of
/// the "Last N Elections" heading.
pub fn county_summary(diff: &CountyDiff, election_limit: usize) -> String {
  let mut md = String::new();
  let county = diff.county;

  // Writing to a String cannot fail.
  let _ = writeln!(md, "# Voter Change Summary: {} County ({})\n", county.name, county.code);
  let _ = writeln!(md, "**Total Voters (New DB):** {}\n", thousands(diff.total_new));

  let _ = writeln!(md, "## Last {election_limit} Elections (by Date)\n");
  if diff.recent_elections.is_empty() {
    md.push_str("_No election history found in new database._\n");
  } else {
    md.push_str("| Election Date | Description | Voters Who Voted |\n");
    md.push_str("|---------------|-------------|------------------|\n");
    for e in &diff.recent_elections {
      let _ = writeln!(
        md,
        "| {} | {} | {} |",
        e.election_date.as_deref().unwrap_or(""),
        e.election_description.as_deref().unwrap_or(""),
        thousands(e.voters_who_voted),
      );
    }
  }
  md.push('\n');

  let rollup = diff.rollup();
  md.push_str("## Change Breakdown\n\n");
  md.push_str("| Category | Count | % of Total |\n");
  md.push_str("|----------|-------|------------|\n");
  for (label, count) in [
    ("voters removed", rollup.voters_removed),
    ("histories changed", rollup.histories_changed),
    ("voters who moved", rollup.voters_who_moved),
  ] {
    let _ = writeln!(
      md,
      "| {label} | {} | {:.2}% |",
      thousands(count),
      percent(count, diff.total_new),
    );
  }
  md.push('\n');

  let transferred = diff.transferred_count() as u64;
  if transferred > 0 {
    let _ = writeln!(
      md,
      "_{} of the removed voters are registered in another county in the new database._\n",
      thousands(transferred),
    );
  }

  md.push_str(DEFINITIONS);
  md
}

/// Render `summary_all_counties.md`.
pub fn rollup_summary(rows: &[CountyRollup]) -> String {
  let mut md = String::new();
  md.push_str("# Voter Change Summary: All Counties\n\n");
  md.push_str("## Summary Table\n\n");
  md.push_str("| Code | County | Old | New | Net | Removed | History | Moved |\n");
  md.push_str("|------|--------|-----|-----|-----|---------|---------|-------|\n");
  for r in rows {
    let _ = writeln!(
      md,
      "| {} | {} | {} | {} | {} | {} | {} | {} |",
      r.county_code,
      r.county_name,
      thousands(r.total_old),
      thousands(r.total_new),
      signed_thousands(r.net_change),
      thousands(r.voters_removed),
      thousands(r.histories_changed),
      thousands(r.voters_who_moved),
    );
  }
  md
}
