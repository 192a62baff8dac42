//! Web error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by a handler.
#[derive(Debug, Error)]
pub enum WebError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl WebError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    tracing::error!(error = %e, "store fault");
    WebError::Store(Box::new(e))
  }
}

impl IntoResponse for WebError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      WebError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      WebError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      WebError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
