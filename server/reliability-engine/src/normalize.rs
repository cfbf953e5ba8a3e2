//! Normalize a raw tabular source into the typed EventTable snapshot.
//!
//! Labels are canonicalized, then each known column is parsed into its type.
//! A cell that does not match its column's format becomes `None`; nothing in
//! here fails.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::schema::*;
use crate::types::{EventTable, MaintenanceEvent, RawTable};

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").unwrap());

/// Canonicalize a source column label:
/// - trim, lowercase
/// - strip diacritics ("Solicitação" -> "solicitacao")
/// - drop punctuation (underscores survive)
/// - collapse whitespace runs into a single underscore
pub fn canonical_label(label: &str) -> String {
  let folded: String = label
    .trim()
    .to_lowercase()
    .nfd()
    .filter(|c| !is_combining_mark(*c))
    .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
    .collect();
  folded.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Strict `YYYY-MM-DD`. Anything else, including impossible dates, is `None`.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
  let s = cell.trim();
  if !DATE_RE.is_match(s) {
    return None;
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Strict `HH:MM` after trimming and collapsing internal whitespace.
pub fn parse_time(cell: &str) -> Option<NaiveTime> {
  let s = cell.split_whitespace().collect::<Vec<_>>().join(" ");
  if !TIME_RE.is_match(&s) {
    return None;
  }
  NaiveTime::parse_from_str(&s, "%H:%M").ok()
}

/// Numeric coercion; non-numeric and non-finite values are `None`.
pub fn parse_number(cell: &str) -> Option<f64> {
  cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalize every row of `raw` into a MaintenanceEvent.
///
/// Two labels that canonicalize to the same name collide silently; the
/// rightmost column wins.
pub fn normalize(raw: &RawTable) -> EventTable {
  let mut index: BTreeMap<String, usize> = BTreeMap::new();
  for (i, label) in raw.headers.iter().enumerate() {
    index.insert(canonical_label(label), i);
  }

  let mut degraded = 0usize;
  let events: Vec<MaintenanceEvent> = raw
    .rows
    .iter()
    .map(|row| normalize_row(row, &index, &mut degraded))
    .collect();

  if degraded > 0 {
    tracing::debug!(degraded, "cells degraded to null during normalization");
  }

  EventTable {
    columns: index.into_keys().collect(),
    events,
  }
}

fn normalize_row(
  row: &[String],
  index: &BTreeMap<String, usize>,
  degraded: &mut usize,
) -> MaintenanceEvent {
  let mut event = MaintenanceEvent::default();

  for (name, &i) in index {
    let cell = row.get(i).map(String::as_str).filter(|c| !c.is_empty());
    let text = cell.map(str::to_string);

    // Typed parse; a present cell that fails to parse counts as degraded.
    let mut typed = |parsed: bool| {
      if cell.is_some() && !parsed {
        *degraded += 1;
      }
    };

    match name.as_str() {
      SUBSYSTEM => event.subsystem = cell.filter(|c| !c.trim().is_empty()).map(str::to_string),
      LOCATION => event.location = text,
      PRIORITY => event.priority = text,
      DESCRIPTION => event.description = text,
      SOLUTION => event.solution = text,
      REQUESTER => event.requester = text,
      FAILURE_DATE => {
        event.failure_date = cell.and_then(parse_date);
        typed(event.failure_date.is_some());
      }
      REPAIR_END_DATE => {
        event.repair_end_date = cell.and_then(parse_date);
        typed(event.repair_end_date.is_some());
      }
      FAILURE_TIME => {
        event.failure_time = cell.and_then(parse_time);
        typed(event.failure_time.is_some());
      }
      REPAIR_END_TIME => {
        event.repair_end_time = cell.and_then(parse_time);
        typed(event.repair_end_time.is_some());
      }
      REQUEST_ID => {
        event.request_id = cell.and_then(parse_number);
        typed(event.request_id.is_some());
      }
      ORDER_ID => {
        event.order_id = cell.and_then(parse_number);
        typed(event.order_id.is_some());
      }
      _ => {
        event.extra.insert(name.clone(), text);
      }
    }
  }

  event
}
