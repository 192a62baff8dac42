//! Handler for `GET /api/lookup`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use rollcall_core::{
  lookup::{LookupProblem, LookupReport, LookupRequest, lookup},
  store::VoterStore,
};

use crate::error::WebError;

/// `GET /api/lookup?first_name=..&last_name=..&zip_code=..`
///
/// Missing parameters are a 400 and an empty result a 404, both with the
/// same `{"error": ..}` body the form page shows.
pub async fn handler<S: VoterStore + 'static>(
  State(store): State<Arc<S>>,
  Query(request): Query<LookupRequest>,
) -> Result<Json<LookupReport>, WebError> {
  match lookup(store.as_ref(), &request).await.map_err(WebError::store)? {
    report @ LookupReport::Results(_) => Ok(Json(report)),
    LookupReport::Error(problem @ LookupProblem::MissingParameters(_)) => {
      Err(WebError::BadRequest(problem.to_string()))
    }
    LookupReport::Error(problem @ LookupProblem::NoMatch { .. }) => {
      Err(WebError::NotFound(problem.to_string()))
    }
  }
}
