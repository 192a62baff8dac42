//! Date coercion for import.

use chrono::{NaiveDate, NaiveDateTime};

/// Accepted input formats, tried in order.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse `raw` against the accepted formats and normalise it to `YYYY-MM-DD`.
///
/// Returns `None` for blank or unparseable input; a bad date never fails the
/// row it belongs to.
pub fn parse_date(raw: &str) -> Option<String> {
  let s = raw.trim();
  if s.is_empty() {
    return None;
  }

  let date = DATE_FORMATS
    .iter()
    .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    .or_else(|| {
      DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
    });

  match date {
    Some(d) => Some(d.format("%Y-%m-%d").to_string()),
    None => {
      tracing::trace!(value = s, "unparseable date stored as absent");
      None
    }
  }
}
