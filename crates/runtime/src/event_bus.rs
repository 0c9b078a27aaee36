use std::collections::{BTreeMap, VecDeque};

use foundation::time::Time;

/// Events retained by [`EventBus::new`].
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Minimal event type for traceability.
///
/// Structured text stamped with the editor clock and a sequence number, so two
/// events at the same instant still have a total order.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub seq: u64,
    pub at: Time,
    pub kind: &'static str,
    pub message: String,
}

/// Bounded event journal.
///
/// Keeps the most recent `capacity` events; older ones are dropped. Per-kind
/// totals cover every event ever emitted, so counts survive eviction.
#[derive(Debug)]
pub struct EventBus {
    next_seq: u64,
    capacity: usize,
    events: VecDeque<Event>,
    totals: BTreeMap<&'static str, usize>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            next_seq: 0,
            capacity,
            events: VecDeque::with_capacity(capacity),
            totals: BTreeMap::new(),
        }
    }

    pub fn emit(&mut self, at: Time, kind: &'static str, message: impl Into<String>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        *self.totals.entry(kind).or_insert(0) += 1;

        if self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(Event {
            seq,
            at,
            kind,
            message: message.into(),
        });
    }

    /// Retained events, oldest first.
    pub fn events(&self) -> &VecDeque<Event> {
        &self.events
    }

    /// Events of `kind` emitted so far, including evicted ones.
    pub fn count(&self, kind: &str) -> usize {
        self.totals.get(kind).copied().unwrap_or(0)
    }

    /// Takes all retained events. Sequence numbers and totals keep counting.
    pub fn drain(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }
}
