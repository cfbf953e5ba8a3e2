//! Core types for the reliability engine (raw source, normalized events, JSON contracts).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::EngineError;
use crate::schema::{self, Metric};

// ---------------------------------------------------------------------------
// Raw source (what the data-access port hands us)
// ---------------------------------------------------------------------------

/// Rows of text cells under a header of source labels. Labels are not yet canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
  pub headers: Vec<String>,
  pub rows: Vec<Vec<String>>,
}

impl RawTable {
  pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
    Self { headers, rows }
  }

  /// Convenience constructor for literal tables (tests, fixtures).
  pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Self {
    Self {
      headers: headers.iter().map(|h| h.to_string()).collect(),
      rows: rows
        .iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect(),
    }
  }
}

// ---------------------------------------------------------------------------
// Normalized types
// ---------------------------------------------------------------------------

/// One row of the maintenance log after normalization. Unparseable cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceEvent {
  pub subsystem: Option<String>,
  pub location: Option<String>,
  pub failure_date: Option<NaiveDate>,
  pub failure_time: Option<NaiveTime>,
  pub repair_end_date: Option<NaiveDate>,
  pub repair_end_time: Option<NaiveTime>,
  pub priority: Option<String>,
  pub description: Option<String>,
  pub solution: Option<String>,
  pub requester: Option<String>,
  pub request_id: Option<f64>,
  pub order_id: Option<f64>,
  /// Columns without a known canonical name, kept as nullable text.
  pub extra: BTreeMap<String, Option<String>>,
}

impl MaintenanceEvent {
  /// Failure timestamp; a missing time-of-day falls back to midnight.
  pub fn failure_at(&self) -> Option<NaiveDateTime> {
    self
      .failure_date
      .map(|d| d.and_time(self.failure_time.unwrap_or(NaiveTime::MIN)))
  }

  /// Repair-completion timestamp; a missing time-of-day falls back to midnight.
  pub fn repair_end_at(&self) -> Option<NaiveDateTime> {
    self
      .repair_end_date
      .map(|d| d.and_time(self.repair_end_time.unwrap_or(NaiveTime::MIN)))
  }
}

/// Immutable per-request snapshot produced by the normalizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTable {
  /// Canonical names of every column the source carried.
  pub columns: BTreeSet<String>,
  pub events: Vec<MaintenanceEvent>,
}

impl EventTable {
  pub fn has_column(&self, name: &str) -> bool {
    self.columns.contains(name)
  }

  pub fn require(&self, metric: Metric) -> Result<(), EngineError> {
    schema::require(&self.columns, metric)
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MttfRecord {
  pub subsystem: String,
  pub mttf_days: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MttrRecord {
  pub subsystem: String,
  pub mttr_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityRecord {
  pub subsystem: String,
  /// `None` when the ratio is undefined (zero MTTF and zero MTTR, or no MTTF value).
  pub availability_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureCount {
  pub subsystem: String,
  pub failure_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubsystemCensus {
  pub distinct_subsystem_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FleetAvailability {
  pub availability_mean: Option<f64>,
}

/// Any query result, serialized without a wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
  Mttf(Vec<MttfRecord>),
  Mttr(Vec<MttrRecord>),
  Availability(Vec<AvailabilityRecord>),
  FailureCounts(Vec<FailureCount>),
  SubsystemCensus(SubsystemCensus),
  FleetAvailability(FleetAvailability),
}

// ---------------------------------------------------------------------------
// Error payload
// ---------------------------------------------------------------------------

/// Uniform error payload for the CLI and HTTP boundaries.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub kind: String,
  pub message: String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub missing: Vec<String>,
}

impl ErrorOutput {
  pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      error: true,
      kind: kind.into(),
      message: message.into(),
      missing: Vec::new(),
    }
  }

  pub fn with_missing(mut self, missing: Vec<String>) -> Self {
    self.missing = missing;
    self
  }
}

impl From<&EngineError> for ErrorOutput {
  fn from(e: &EngineError) -> Self {
    let out = ErrorOutput::new(e.kind(), e.to_string());
    match e {
      EngineError::Schema { missing, .. } => out.with_missing(missing.clone()),
      _ => out,
    }
  }
}
