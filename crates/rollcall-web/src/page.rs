//! The lookup form at `/`.
//!
//! `GET` renders an empty form. `POST` runs the lookup and renders the same
//! page with the results or the problem inline; caller mistakes are still a
//! 200 so the form stays usable.

use std::{fmt::Write as _, sync::Arc};

use axum::{
  Form,
  extract::State,
  response::Html,
};
use rollcall_core::{
  lookup::{LookupMatch, LookupReport, LookupRequest, lookup},
  store::VoterStore,
};

use crate::error::WebError;

pub async fn show() -> Html<String> { Html(render(&LookupRequest::default(), None)) }

pub async fn submit<S: VoterStore + 'static>(
  State(store): State<Arc<S>>,
  Form(request): Form<LookupRequest>,
) -> Result<Html<String>, WebError> {
  let report = lookup(store.as_ref(), &request).await.map_err(WebError::store)?;
  Ok(Html(render(&request, Some(&report))))
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for c in raw.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  out
}

fn opt(v: &Option<String>) -> String { escape(v.as_deref().unwrap_or("")) }

fn field(label: &str, name: &str, value: &Option<String>) -> String {
  format!(
    r#"<label>{label} <input type="text" name="{name}" value="{}"></label>"#,
    opt(value)
  )
}

pub fn render(request: &LookupRequest, report: Option<&LookupReport>) -> String {
  let mut body = String::new();

  let _ = write!(
    body,
    r#"<form method="post" action="/">{}{}{}<button type="submit">Look up</button></form>"#,
    field("First name", "first_name", &request.first_name),
    field("Last name", "last_name", &request.last_name),
    field("Zip code", "zip_code", &request.zip_code),
  );

  match report {
    None => {}
    Some(LookupReport::Error(problem)) => {
      let _ = write!(body, r#"<p class="error">{}</p>"#, escape(&problem.to_string()));
    }
    Some(LookupReport::Results(results)) => {
      for m in results {
        render_match(&mut body, m);
      }
    }
  }

  format!(
    "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Voter Lookup</title></head>\
     <body><h1>Voter Lookup</h1>{body}</body></html>\n"
  )
}

fn render_match(out: &mut String, m: &LookupMatch) {
  let info = &m.voter_info;
  let more = &m.additional_details;
  let birth_year = info.birth_year.map(|y| y.to_string());

  let _ = write!(out, r#"<section class="voter"><h2>Voter {}</h2><table>"#, info.voter_id);
  for (label, value) in [
    ("First name", &info.first_name),
    ("Middle name", &info.middle_name),
    ("Last name", &info.last_name),
    ("Suffix", &more.name_suffix),
    ("House number", &more.house_number),
    ("Street", &more.street_name),
    ("Unit type", &more.unit_type),
    ("Unit number", &more.unit_number),
    ("Address 2", &more.address2),
    ("City", &info.city),
    ("State", &info.state),
    ("Zip code", &info.zip_code),
    ("Mailing address", &more.mailing.address),
    ("Mailing city", &more.mailing.city),
    ("Mailing state", &more.mailing.state),
    ("Mailing zip", &more.mailing.zip_code),
    ("Phone", &more.phone_number),
    ("Registered", &info.registration_date),
    ("Birth year", &birth_year),
    ("County", &more.county_code),
    ("Precinct", &more.districts.precinct_name),
    ("Permanent absentee", &more.permanent_absentee),
  ] {
    if value.is_some() {
      let _ = write!(out, "<tr><th>{label}</th><td>{}</td></tr>", opt(value));
    }
  }
  out.push_str("</table>");

  if m.election_history.is_empty() {
    out.push_str("<p>No election history.</p>");
  } else {
    out.push_str("<table class=\"history\"><tr><th>Date</th><th>Election</th><th>Method</th></tr>");
    for r in &m.election_history {
      let _ = write!(
        out,
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        opt(&r.entry.election_date),
        opt(&r.entry.election_description),
        opt(&r.entry.voting_method),
      );
    }
    out.push_str("</table>");
  }
  out.push_str("</section>");
}
