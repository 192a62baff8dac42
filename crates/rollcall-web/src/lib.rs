//! Voter lookup over HTTP.
//!
//! Exposes an axum [`Router`] backed by any [`VoterStore`]: an HTML form at
//! `/` and a JSON endpoint at `/api/lookup`. The service only reads.

pub mod api;
pub mod error;
pub mod page;

pub use error::WebError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::get,
};
use rollcall_core::store::VoterStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROLLCALL_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:    String,
  pub port:    u16,
  pub db_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:    "127.0.0.1".to_string(),
      port:    5000,
      db_path: PathBuf::from("voters.db"),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the lookup router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: VoterStore + 'static,
{
  Router::new()
    .route("/",           get(page::show).post(page::submit::<S>))
    .route("/api/lookup", get(api::handler::<S>))
    .route("/health",     get(health))
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}

async fn health() -> &'static str { "ok" }

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use rollcall_core::voter::{ElectionRecord, HistoryEntry, PersonName, Residence, Voter};
  use rollcall_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  async fn make_store() -> Arc<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store
      .insert_voters(vec![Voter {
        voter_id: 1001,
        county_code: Some("01".into()),
        name: PersonName {
          first: Some("Ann".into()),
          last: Some("Lee".into()),
          ..PersonName::default()
        },
        residence: Residence {
          city: Some("AITKIN".into()),
          zip_code: Some("56431".into()),
          ..Residence::default()
        },
        ..Voter::default()
      }])
      .await
      .unwrap();
    store
      .insert_history(vec![
        ElectionRecord {
          voter_id: 1001,
          entry:    HistoryEntry::new("2022-11-08", "GENERAL", "IN-PERSON"),
        },
        ElectionRecord {
          voter_id: 1001,
          entry:    HistoryEntry::new("2024-11-05", "GENERAL", "ABSENTEE"),
        },
      ])
      .await
      .unwrap();
    Arc::new(store)
  }

  async fn get_uri(uri: &str) -> axum::response::Response {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router(make_store().await).oneshot(req).await.unwrap()
  }

  async fn post_form(body: &str) -> axum::response::Response {
    let req = Request::builder()
      .method("POST")
      .uri("/")
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(Body::from(body.to_string()))
      .unwrap();
    router(make_store().await).oneshot(req).await.unwrap()
  }

  async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp).await).unwrap()
  }

  // ── JSON endpoint ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn api_lookup_returns_results_newest_history_first() {
    let resp = get_uri("/api/lookup?first_name=ANN&last_name=lee&zip_code=56431").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let first = &json["results"][0];
    assert_eq!(first["voter_info"]["voter_id"], 1001);
    assert_eq!(first["voter_info"]["city"], "AITKIN");
    assert_eq!(first["election_history"][0]["election_date"], "2024-11-05");
    assert_eq!(first["election_history"][1]["election_date"], "2022-11-08");
  }

  #[tokio::test]
  async fn api_lookup_missing_parameter_is_400() {
    let resp = get_uri("/api/lookup?first_name=ANN&zip_code=56431").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert!(json["error"].as_str().unwrap().contains("missing: LastName"));
  }

  #[tokio::test]
  async fn api_lookup_without_match_is_404() {
    let resp = get_uri("/api/lookup?first_name=ANN&last_name=LEE&zip_code=55101").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(
      json["error"],
      "No voters found with FirstName='ANN', LastName='LEE', ZipCode='55101'."
    );
  }

  // ── Form page ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn form_page_renders() {
    let resp = get_uri("/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains(r#"<form method="post" action="/">"#));
  }

  #[tokio::test]
  async fn form_submission_shows_results() {
    let resp = post_form("first_name=ann&last_name=LEE&zip_code=56431").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("<h2>Voter 1001</h2>"));
    assert!(html.contains("<td>ABSENTEE</td>"));
  }

  #[tokio::test]
  async fn form_problems_are_shown_inline() {
    let resp = post_form("first_name=ann&last_name=&zip_code=56431").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains(r#"<p class="error">"#));
    assert!(html.contains("missing: LastName"));
  }

  #[tokio::test]
  async fn health_is_ok() {
    let resp = get_uri("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "ok");
  }

  #[test]
  fn config_defaults_apply_to_missing_keys() {
    let cfg: ServerConfig = serde_json::from_str(r#"{"port": 8080}"#).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.db_path, PathBuf::from("voters.db"));
  }
}
