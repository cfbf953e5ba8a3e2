//! Query facade: load, normalize, check the schema, compute.
//!
//! Every query re-runs the whole pipeline from the source. The engine keeps no
//! state between calls beyond the injected source.

use tracing::{debug, error, info, warn};

use crate::availability;
use crate::census;
use crate::config::Config;
use crate::error::EngineError;
use crate::mttf;
use crate::mttr;
use crate::normalize;
use crate::schema::Metric;
use crate::source::{FileSource, TableSource};
use crate::types::*;

/// One of the read-only queries the engine answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
  Mttf,
  Mttr,
  Availability,
  FailureCounts,
  SubsystemCensus,
  FleetAvailability,
}

impl Query {
  pub const ALL: [Query; 6] = [
    Query::Mttf,
    Query::Mttr,
    Query::Availability,
    Query::FailureCounts,
    Query::SubsystemCensus,
    Query::FleetAvailability,
  ];

  /// Accepts the route-style names plus the legacy Portuguese ones.
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
      "mttf" => Some(Self::Mttf),
      "mttr" => Some(Self::Mttr),
      "availability" | "disponibilidade" => Some(Self::Availability),
      "failures" | "failure-counts" | "falhas" => Some(Self::FailureCounts),
      "subsystem-count" | "census" | "quantidade-subsistemas" => Some(Self::SubsystemCensus),
      "availability-mean" | "fleet-availability" | "disponibilidade-media" => {
        Some(Self::FleetAvailability)
      }
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Mttf => "mttf",
      Self::Mttr => "mttr",
      Self::Availability => "availability",
      Self::FailureCounts => "failures",
      Self::SubsystemCensus => "subsystem-count",
      Self::FleetAvailability => "availability-mean",
    }
  }

  pub fn metric(self) -> Metric {
    match self {
      Self::Mttf => Metric::Mttf,
      Self::Mttr => Metric::Mttr,
      Self::Availability => Metric::Availability,
      Self::FailureCounts => Metric::FailureCounts,
      Self::SubsystemCensus => Metric::SubsystemCensus,
      Self::FleetAvailability => Metric::FleetAvailability,
    }
  }
}

/// The reliability metrics engine over an injected table source.
pub struct Engine<S> {
  source: S,
}

impl Engine<FileSource> {
  /// Engine over the file described by `config`.
  pub fn from_config(config: &Config) -> Result<Self, EngineError> {
    Ok(Self::new(FileSource::from_config(config)?))
  }
}

impl<S: TableSource> Engine<S> {
  pub fn new(source: S) -> Self {
    Self { source }
  }

  pub fn source(&self) -> &S {
    &self.source
  }

  /// Load and normalize a fresh snapshot, without any schema check.
  pub fn snapshot(&self) -> Result<EventTable, EngineError> {
    let raw = self.source.load().map_err(|e| {
      error!(source = %self.source.describe(), error = %e, "failed to load source");
      e
    })?;
    let table = normalize::normalize(&raw);
    debug!(
      source = %self.source.describe(),
      rows = table.events.len(),
      columns = table.columns.len(),
      "snapshot normalized"
    );
    Ok(table)
  }

  fn snapshot_for(&self, metric: Metric) -> Result<EventTable, EngineError> {
    let table = self.snapshot()?;
    table.require(metric).map_err(|e| {
      warn!(%metric, error = %e, "schema check failed");
      e
    })?;
    Ok(table)
  }

  /// MTTF per subsystem, descending.
  pub fn mttf(&self) -> Result<Vec<MttfRecord>, EngineError> {
    let table = self.snapshot_for(Metric::Mttf)?;
    let out = mttf::compute(&table.events);
    info!(subsystems = out.len(), "mttf computed");
    Ok(out)
  }

  /// MTTR per subsystem, ascending.
  pub fn mttr(&self) -> Result<Vec<MttrRecord>, EngineError> {
    let table = self.snapshot_for(Metric::Mttr)?;
    let out = mttr::compute(&table.events);
    info!(subsystems = out.len(), "mttr computed");
    Ok(out)
  }

  /// Availability per subsystem present in both MTTF and MTTR, descending.
  pub fn availability(&self) -> Result<Vec<AvailabilityRecord>, EngineError> {
    let table = self.snapshot_for(Metric::Availability)?;
    let out = compose(&table);
    info!(subsystems = out.len(), "availability computed");
    Ok(out)
  }

  /// Event count per subsystem, descending.
  pub fn failure_counts(&self) -> Result<Vec<FailureCount>, EngineError> {
    let table = self.snapshot_for(Metric::FailureCounts)?;
    let out = census::failure_counts(&table.events);
    info!(subsystems = out.len(), "failure counts computed");
    Ok(out)
  }

  /// Number of distinct subsystems.
  pub fn subsystem_census(&self) -> Result<SubsystemCensus, EngineError> {
    let table = self.snapshot_for(Metric::SubsystemCensus)?;
    let out = census::distinct_subsystems(&table.events);
    info!(distinct = out.distinct_subsystem_count, "subsystem census computed");
    Ok(out)
  }

  /// Unweighted mean availability across subsystems.
  pub fn fleet_availability(&self) -> Result<FleetAvailability, EngineError> {
    let table = self.snapshot_for(Metric::FleetAvailability)?;
    let out = availability::fleet_mean(&compose(&table));
    info!(mean = ?out.availability_mean, "fleet availability computed");
    Ok(out)
  }

  /// Dispatch a query by name-independent variant.
  pub fn run(&self, query: Query) -> Result<QueryOutput, EngineError> {
    Ok(match query {
      Query::Mttf => QueryOutput::Mttf(self.mttf()?),
      Query::Mttr => QueryOutput::Mttr(self.mttr()?),
      Query::Availability => QueryOutput::Availability(self.availability()?),
      Query::FailureCounts => QueryOutput::FailureCounts(self.failure_counts()?),
      Query::SubsystemCensus => QueryOutput::SubsystemCensus(self.subsystem_census()?),
      Query::FleetAvailability => QueryOutput::FleetAvailability(self.fleet_availability()?),
    })
  }
}

fn compose(table: &EventTable) -> Vec<AvailabilityRecord> {
  availability::compose(&mttf::compute(&table.events), &mttr::compute(&table.events))
}
