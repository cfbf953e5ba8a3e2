//! Reliability Metrics Engine: deterministic MTTF/MTTR/availability reporting.
//!
//! Turns a raw maintenance log (rows of named text cells) into a typed event
//! snapshot, groups it by subsystem, and derives mean time to failure (days),
//! mean time to repair (hours), availability (%), and failure counts.
//!
//! Pure computation over an injected `TableSource`; every query re-reads it.

pub mod availability;
pub mod census;
pub mod config;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod group;
pub mod mttf;
pub mod mttr;
pub mod normalize;
pub mod schema;
pub mod source;
pub mod stats;
pub mod telemetry;
pub mod types;

pub use config::{Config, SourceFormat};
pub use engine::{Engine, Query};
pub use error::EngineError;
pub use schema::Metric;
pub use source::{FileSource, MemorySource, TableSource};
pub use types::{
  AvailabilityRecord, ErrorOutput, EventTable, FailureCount, FleetAvailability, MaintenanceEvent,
  MttfRecord, MttrRecord, QueryOutput, RawTable, SubsystemCensus,
};
