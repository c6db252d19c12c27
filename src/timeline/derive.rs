use std::collections::BTreeMap;

use crate::models::{EventType, TimelineEvent};

/// Group events by the subject's age at the time of the event.
///
/// Within each bucket, events are stably sorted ascending by date, so two
/// events on the same day keep their insertion order.
pub fn group_by_age(events: &[TimelineEvent]) -> BTreeMap<u32, Vec<TimelineEvent>> {
    let mut grouped: BTreeMap<u32, Vec<TimelineEvent>> = BTreeMap::new();
    for event in events {
        grouped.entry(event.age).or_default().push(event.clone());
    }
    for bucket in grouped.values_mut() {
        bucket.sort_by(|a, b| a.date.cmp(&b.date));
    }
    grouped
}

/// Age keys of a grouping, most recent age first.
pub fn sorted_ages_descending(grouped: &BTreeMap<u32, Vec<TimelineEvent>>) -> Vec<u32> {
    grouped.keys().rev().copied().collect()
}

/// Events of one type, in their original relative order.
pub fn filter_by_type(events: &[TimelineEvent], event_type: EventType) -> Vec<TimelineEvent> {
    events
        .iter()
        .filter(|e| e.event_type == event_type)
        .cloned()
        .collect()
}

/// In-place newest-first ordering used by the sub-views and the report.
pub fn sort_by_date_descending(events: &mut [TimelineEvent]) {
    events.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Parse a stored timeline collection.
///
/// Malformed data (a bare object, missing fields, junk text) is an error
/// here; the fall-back-to-empty policy is the caller's deliberate choice.
pub fn parse_stored_events(raw: &str) -> Result<Vec<TimelineEvent>, serde_json::Error> {
    serde_json::from_str(raw)
}
