//! Partition events by subsystem.

use std::collections::BTreeMap;

use crate::types::MaintenanceEvent;

/// Group events by subsystem, keyed in ascending subsystem order.
///
/// Events with a null subsystem are left out. Within a partition, events keep
/// their original row order.
pub fn by_subsystem(events: &[MaintenanceEvent]) -> BTreeMap<&str, Vec<&MaintenanceEvent>> {
  let mut groups: BTreeMap<&str, Vec<&MaintenanceEvent>> = BTreeMap::new();
  for event in events {
    if let Some(subsystem) = event.subsystem.as_deref() {
      groups.entry(subsystem).or_default().push(event);
    }
  }
  groups
}

#[cfg(test)]
mod tests {
  use super::*;

  fn event(subsystem: Option<&str>, order: f64) -> MaintenanceEvent {
    MaintenanceEvent {
      subsystem: subsystem.map(str::to_string),
      order_id: Some(order),
      ..Default::default()
    }
  }

  #[test]
  fn groups_preserve_row_order() {
    let events = vec![
      event(Some("B"), 1.0),
      event(Some("A"), 2.0),
      event(Some("B"), 3.0),
      event(None, 4.0),
      event(Some("A"), 5.0),
    ];
    let groups = by_subsystem(&events);

    assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["A", "B"]);
    let b: Vec<f64> = groups["B"].iter().filter_map(|e| e.order_id).collect();
    assert_eq!(b, vec![1.0, 3.0]);
    let a: Vec<f64> = groups["A"].iter().filter_map(|e| e.order_id).collect();
    assert_eq!(a, vec![2.0, 5.0]);
  }

  #[test]
  fn null_subsystem_is_not_grouped() {
    let events = vec![event(None, 1.0)];
    assert!(by_subsystem(&events).is_empty());
  }
}
