//! Numeric helpers shared by the calculators: means, rounding, interval units, ordering.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Arithmetic mean, ignoring NaN entries. `None` when nothing is left.
pub fn mean<I>(values: I) -> Option<f64>
where
  I: IntoIterator<Item = f64>,
{
  let (sum, n) = values
    .into_iter()
    .filter(|v| !v.is_nan())
    .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
  if n == 0 {
    None
  } else {
    Some(sum / n as f64)
  }
}

/// Round to two decimal places; an exact half goes to the even neighbour.
pub fn round2(v: f64) -> f64 {
  (v * 100.0).round_ties_even() / 100.0
}

/// Signed elapsed time between two timestamps, in days.
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
  (to - from).num_seconds() as f64 / SECONDS_PER_DAY
}

/// Signed elapsed time between two timestamps, in hours.
pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
  (to - from).num_seconds() as f64 / SECONDS_PER_HOUR
}

/// Descending by value, then subsystem ascending.
pub fn desc_then_name(a: (f64, &str), b: (f64, &str)) -> Ordering {
  b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1))
}

/// Ascending by value, then subsystem ascending.
pub fn asc_then_name(a: (f64, &str), b: (f64, &str)) -> Ordering {
  a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1))
}
