//! History read model.
//!
//! By default every move event is its own entry. Callers may opt into merging
//! runs of adjacent events with the same transition whose consecutive gaps stay
//! within a window.

use chrono::{DateTime, Duration, Utc};

use crate::movement::MoveEvent;
use crate::stage::Stage;

/// One history entry as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryGroup {
    pub from_stage: Stage,
    pub to_stage: Stage,
    pub qty: u64,
    /// Timestamp of the first event in the group.
    pub timestamp: DateTime<Utc>,
}

impl From<&MoveEvent> for HistoryGroup {
    fn from(event: &MoveEvent) -> Self {
        Self {
            from_stage: event.from_stage,
            to_stage: event.to_stage,
            qty: event.qty,
            timestamp: event.occurred_at,
        }
    }
}

/// Build history entries from chronologically ordered `events`.
///
/// With `window == None` the result is one entry per event. With a window, an
/// event joins the preceding group when it has the same `(from, to)` pair and
/// follows the previous event by at most `window` (inclusive). The comparison
/// slides: it is against the previous event, not the first one of the group.
/// A group whose quantity would overflow `u64` is closed and a new one started.
pub fn group_history(events: &[MoveEvent], window: Option<Duration>) -> Vec<HistoryGroup> {
    let Some(window) = window else {
        return events.iter().map(HistoryGroup::from).collect();
    };

    let mut groups: Vec<HistoryGroup> = Vec::new();
    let mut previous: Option<&MoveEvent> = None;

    for event in events {
        let merged_qty = match (previous, groups.last()) {
            (Some(prev), Some(group))
                if group.from_stage == event.from_stage
                    && group.to_stage == event.to_stage
                    && event.occurred_at - prev.occurred_at <= window =>
            {
                group.qty.checked_add(event.qty)
            }
            _ => None,
        };

        match (merged_qty, groups.last_mut()) {
            (Some(qty), Some(group)) => group.qty = qty,
            _ => groups.push(HistoryGroup::from(event)),
        }
        previous = Some(event);
    }

    groups
}
