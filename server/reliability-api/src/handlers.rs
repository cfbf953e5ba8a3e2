//! HTTP handlers for the metrics API.

use axum::{
  extract::{Path, State},
  Json,
};
use std::sync::Arc;

use reliability_engine::{Query, QueryOutput};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn health() -> &'static str {
  "ok"
}

/// `GET /metrics/:name` for any query name the engine knows, legacy aliases included.
pub async fn metric(
  State(state): State<Arc<AppState>>,
  Path(name): Path<String>,
) -> Result<Json<QueryOutput>, ApiError> {
  let query = Query::from_str_loose(&name).ok_or_else(|| ApiError::not_found(&name))?;

  // The pipeline is synchronous file I/O plus arithmetic; keep it off the async workers.
  let output = tokio::task::spawn_blocking(move || state.engine.run(query))
    .await
    .map_err(|e| {
      tracing::error!(query = query.as_str(), error = %e, "query task failed");
      ApiError::internal(format!("query task failed: {}", e))
    })??;

  Ok(Json(output))
}
