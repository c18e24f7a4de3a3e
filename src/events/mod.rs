//! Structured event log.
//!
//! Every resolution decision is appended as an `EventRecord` tagged with
//! the round and a per-match sequence number. The log is an `im::Vector`,
//! so snapshotting a match's history is O(1).
//!
//! ```
//! use skill_clash::events::{EventLog, MatchEvent};
//!
//! let mut log = EventLog::new();
//! log.begin_round(1);
//! log.push(MatchEvent::RoundStarted { round: 1 });
//! assert_eq!(log.len(), 1);
//! assert_eq!(log.for_round(1).count(), 1);
//! ```

mod event;

pub use event::{DecisionStage, DropReason, MatchEvent, Rewrite, SkipReason};

use im::Vector;
use serde::{Deserialize, Serialize};

/// A recorded event with its position in the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Round the event happened in (0 before the first round).
    pub round: u32,
    /// Position in the whole match, starting at 0.
    pub sequence: u64,
    pub event: MatchEvent,
}

/// Append-only, ordered list of match events.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    records: Vector<EventRecord>,
    round: u32,
    next_sequence: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag subsequent events with `round`.
    pub fn begin_round(&mut self, round: u32) {
        self.round = round;
    }

    /// Append an event.
    pub fn push(&mut self, event: MatchEvent) {
        self.records.push_back(EventRecord {
            round: self.round,
            sequence: self.next_sequence,
            event,
        });
        self.next_sequence += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in order.
    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }

    /// All events in order, without positions.
    pub fn events(&self) -> impl Iterator<Item = &MatchEvent> {
        self.records.iter().map(|r| &r.event)
    }

    /// Events of a single round.
    pub fn for_round(&self, round: u32) -> impl Iterator<Item = &MatchEvent> {
        self.records
            .iter()
            .filter(move |r| r.round == round)
            .map(|r| &r.event)
    }

    /// Cheap snapshot of the records so far.
    #[must_use]
    pub fn snapshot(&self) -> Vector<EventRecord> {
        self.records.clone()
    }
}
