//! Engine errors mapped onto HTTP responses.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use reliability_engine::{EngineError, ErrorOutput};

/// An error response: status code plus the uniform ErrorOutput body.
#[derive(Debug)]
pub struct ApiError {
  pub status: StatusCode,
  pub body: ErrorOutput,
}

impl ApiError {
  pub fn not_found(name: &str) -> Self {
    Self {
      status: StatusCode::NOT_FOUND,
      body: ErrorOutput::new("not_found", format!("unknown metric: {}", name)),
    }
  }

  pub fn internal(message: impl Into<String>) -> Self {
    Self {
      status: StatusCode::INTERNAL_SERVER_ERROR,
      body: ErrorOutput::new("internal", message),
    }
  }
}

/// 422 for schema errors, 503 when the source is missing, 500 otherwise.
pub fn status_for(e: &EngineError) -> StatusCode {
  match e {
    EngineError::Schema { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    EngineError::MissingSource { .. } => StatusCode::SERVICE_UNAVAILABLE,
    _ => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

impl From<EngineError> for ApiError {
  fn from(e: EngineError) -> Self {
    Self {
      status: status_for(&e),
      body: ErrorOutput::from(&e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(self.body)).into_response()
  }
}
