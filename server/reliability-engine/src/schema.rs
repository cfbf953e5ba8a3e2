//! Canonical column names and the per-metric column requirements.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::error::EngineError;

pub const SUBSYSTEM: &str = "subsistema";
pub const FAILURE_DATE: &str = "dt_falha";
pub const FAILURE_TIME: &str = "hr_falha";
pub const REPAIR_END_DATE: &str = "dt_enc";
pub const REPAIR_END_TIME: &str = "hr_enc";
pub const REQUEST_ID: &str = "solicitacao";
pub const LOCATION: &str = "local";
pub const PRIORITY: &str = "prioridade";
pub const DESCRIPTION: &str = "descricao";
pub const SOLUTION: &str = "solucao";
pub const ORDER_ID: &str = "ordem";
pub const REQUESTER: &str = "reclamante";

const REPAIR_PAIR: &[&str] = &[
  SUBSYSTEM,
  FAILURE_DATE,
  FAILURE_TIME,
  REPAIR_END_DATE,
  REPAIR_END_TIME,
];

/// A query family, each with its own required column subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
  Mttf,
  Mttr,
  Availability,
  FleetAvailability,
  FailureCounts,
  SubsystemCensus,
}

impl Metric {
  pub fn required_columns(self) -> &'static [&'static str] {
    match self {
      Self::Mttf => &[SUBSYSTEM, FAILURE_DATE],
      Self::Mttr | Self::Availability | Self::FleetAvailability => REPAIR_PAIR,
      Self::FailureCounts | Self::SubsystemCensus => &[SUBSYSTEM],
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Mttf => "mttf",
      Self::Mttr => "mttr",
      Self::Availability => "availability",
      Self::FleetAvailability => "fleet_availability",
      Self::FailureCounts => "failure_counts",
      Self::SubsystemCensus => "subsystem_census",
    }
  }
}

impl fmt::Display for Metric {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Fail with a schema error listing every required column absent from `columns`.
pub fn require(columns: &BTreeSet<String>, metric: Metric) -> Result<(), EngineError> {
  let missing: Vec<String> = metric
    .required_columns()
    .iter()
    .filter(|c| !columns.contains(**c))
    .map(|c| c.to_string())
    .collect();

  if missing.is_empty() {
    Ok(())
  } else {
    Err(EngineError::schema(metric, missing))
  }
}
