//! Failure counts per subsystem and the distinct-subsystem census.
//!
//! Counts every event with a subsystem, whether or not its dates parsed.

use crate::group;
use crate::types::{FailureCount, MaintenanceEvent, SubsystemCensus};

/// Events per subsystem, descending by count, then subsystem ascending.
pub fn failure_counts(events: &[MaintenanceEvent]) -> Vec<FailureCount> {
  let mut out: Vec<FailureCount> = group::by_subsystem(events)
    .into_iter()
    .map(|(subsystem, group)| FailureCount {
      subsystem: subsystem.to_string(),
      failure_count: group.len() as u64,
    })
    .collect();

  out.sort_by(|a, b| {
    b.failure_count
      .cmp(&a.failure_count)
      .then_with(|| a.subsystem.cmp(&b.subsystem))
  });
  out
}

/// Number of distinct non-null subsystem values.
pub fn distinct_subsystems(events: &[MaintenanceEvent]) -> SubsystemCensus {
  SubsystemCensus {
    distinct_subsystem_count: group::by_subsystem(events).len() as u64,
  }
}
