//! Mean time to failure per subsystem, in days.

use chrono::NaiveDateTime;

use crate::group;
use crate::stats::{self, days_between};
use crate::types::{MaintenanceEvent, MttfRecord};

/// Compute MTTF for every subsystem with at least two dated failures.
///
/// Failures are ordered by timestamp (a missing time-of-day counts as
/// midnight) and the mean of successive gaps is reported. Output is sorted by
/// `mttf_days` descending; a null value sorts as 0.
pub fn compute(events: &[MaintenanceEvent]) -> Vec<MttfRecord> {
  let mut out: Vec<MttfRecord> = group::by_subsystem(events)
    .into_iter()
    .filter_map(|(subsystem, group)| {
      let mttf = subsystem_mttf(&group)?;
      Some(MttfRecord {
        subsystem: subsystem.to_string(),
        mttf_days: mttf.map(stats::round2),
      })
    })
    .collect();

  out.sort_by(|a, b| {
    stats::desc_then_name(
      (a.mttf_days.unwrap_or(0.0), a.subsystem.as_str()),
      (b.mttf_days.unwrap_or(0.0), b.subsystem.as_str()),
    )
  });
  out
}

/// `None` when the subsystem is excluded (fewer than two failures);
/// `Some(None)` when no gap produced a usable value.
fn subsystem_mttf(group: &[&MaintenanceEvent]) -> Option<Option<f64>> {
  let mut failures: Vec<NaiveDateTime> = group.iter().filter_map(|e| e.failure_at()).collect();
  if failures.len() < 2 {
    return None;
  }
  failures.sort();

  let gaps = failures.windows(2).map(|w| days_between(w[0], w[1]));
  Some(stats::mean(gaps))
}
