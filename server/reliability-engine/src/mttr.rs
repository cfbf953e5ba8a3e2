//! Mean time to repair per subsystem, in hours.

use crate::group;
use crate::stats::{self, hours_between};
use crate::types::{MaintenanceEvent, MttrRecord};

/// Compute MTTR for every subsystem with at least one failure/repair pair.
///
/// A pair needs both dates; missing times-of-day count as midnight. Negative
/// durations (repair ending before the failure) are kept. Output is sorted by
/// `mttr_hours` ascending.
pub fn compute(events: &[MaintenanceEvent]) -> Vec<MttrRecord> {
  let mut out: Vec<MttrRecord> = group::by_subsystem(events)
    .into_iter()
    .filter_map(|(subsystem, group)| {
      let durations = group
        .iter()
        .filter_map(|e| Some(hours_between(e.failure_at()?, e.repair_end_at()?)));
      let mttr = stats::mean(durations)?;
      Some(MttrRecord {
        subsystem: subsystem.to_string(),
        mttr_hours: stats::round2(mttr),
      })
    })
    .collect();

  out.sort_by(|a, b| {
    stats::asc_then_name(
      (a.mttr_hours, a.subsystem.as_str()),
      (b.mttr_hours, b.subsystem.as_str()),
    )
  });
  out
}
