//! Structured error types for the reliability engine.
//!
//! Only request-level faults live here. Malformed individual cells never
//! surface as errors: the normalizer degrades them to null.

use thiserror::Error;

use crate::schema::Metric;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("missing source: {path}: {reason}")]
  MissingSource { path: String, reason: String },

  #[error("schema: {metric} requires missing column(s): {}", missing.join(", "))]
  Schema { metric: Metric, missing: Vec<String> },

  #[error("parse: {0}")]
  Parse(String),

  #[error("config: {key}: {reason}")]
  Config { key: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

impl EngineError {
  pub fn missing_source(path: impl Into<String>, reason: impl ToString) -> Self {
    Self::MissingSource {
      path: path.into(),
      reason: reason.to_string(),
    }
  }

  pub fn schema(metric: Metric, missing: Vec<String>) -> Self {
    Self::Schema { metric, missing }
  }

  pub fn parse(msg: impl Into<String>) -> Self {
    Self::Parse(msg.into())
  }

  pub fn config(key: &str, reason: &str) -> Self {
    Self::Config {
      key: key.to_string(),
      reason: reason.to_string(),
    }
  }

  /// Stable machine-readable kind, used in error payloads.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::MissingSource { .. } => "missing_source",
      Self::Schema { .. } => "schema",
      Self::Parse(_) => "parse",
      Self::Config { .. } => "config",
      Self::Json(_) => "json",
      Self::Io(_) => "io",
    }
  }
}

impl From<csv::Error> for EngineError {
  fn from(e: csv::Error) -> Self {
    Self::Parse(format!("csv: {}", e))
  }
}
