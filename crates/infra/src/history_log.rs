use minitrack_core::TypeId;
use minitrack_pipeline::MoveEvent;

/// A move event with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LoggedMove {
    sequence: u64,
    event: MoveEvent,
}

/// Append-only ledger of applied moves.
///
/// Sequence numbers are assigned on append and break ties between events
/// whose timestamps collide.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<LoggedMove>,
    next_sequence: u64,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event; returns its sequence number.
    pub fn append(&mut self, event: MoveEvent) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(LoggedMove { sequence, event });
        sequence
    }

    /// Events of one type record, oldest first; ties keep insertion order.
    pub fn query(&self, type_id: TypeId) -> Vec<MoveEvent> {
        let mut matching: Vec<&LoggedMove> = self
            .entries
            .iter()
            .filter(|e| e.event.type_id == type_id)
            .collect();
        matching.sort_by_key(|e| (e.event.occurred_at, e.sequence));
        matching.into_iter().map(|e| e.event.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
