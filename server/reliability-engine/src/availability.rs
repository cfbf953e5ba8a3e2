//! Availability per subsystem (MTTF joined with MTTR) and the fleet-wide mean.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::stats;
use crate::types::{AvailabilityRecord, FleetAvailability, MttfRecord, MttrRecord};

/// `uptime / (uptime + downtime) * 100` with uptime = MTTF in hours.
///
/// Undefined (`None`) when the denominator is zero or MTTF is null.
pub fn availability_pct(mttf_days: Option<f64>, mttr_hours: f64) -> Option<f64> {
  let uptime = mttf_days? * 24.0;
  let total = uptime + mttr_hours;
  if total == 0.0 {
    return None;
  }
  let pct = uptime / total * 100.0;
  pct.is_finite().then(|| stats::round2(pct))
}

/// Inner-join MTTF and MTTR results on subsystem and derive availability.
///
/// Works from the already-rounded metric values. Sorted by `availability_pct`
/// descending; undefined values go last.
pub fn compose(mttf: &[MttfRecord], mttr: &[MttrRecord]) -> Vec<AvailabilityRecord> {
  let repair_hours: HashMap<&str, f64> = mttr
    .iter()
    .map(|r| (r.subsystem.as_str(), r.mttr_hours))
    .collect();

  let mut out: Vec<AvailabilityRecord> = mttf
    .iter()
    .filter_map(|f| {
      let hours = repair_hours.get(f.subsystem.as_str())?;
      Some(AvailabilityRecord {
        subsystem: f.subsystem.clone(),
        availability_pct: availability_pct(f.mttf_days, *hours),
      })
    })
    .collect();

  out.sort_by(|a, b| match (a.availability_pct, b.availability_pct) {
    (Some(x), Some(y)) => stats::desc_then_name((x, a.subsystem.as_str()), (y, b.subsystem.as_str())),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => a.subsystem.cmp(&b.subsystem),
  });
  out
}

/// Unweighted mean of the defined availability values, rounded to two decimals.
pub fn fleet_mean(records: &[AvailabilityRecord]) -> FleetAvailability {
  let mean = stats::mean(records.iter().filter_map(|r| r.availability_pct));
  FleetAvailability {
    availability_mean: mean.map(stats::round2),
  }
}
