use foundation::time::Time;

/// Handle returned by [`TimerQueue::schedule`]; used to cancel a pending timer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    deadline: Time,
    payload: T,
}

/// Deterministic deadline queue driven by an external clock.
///
/// Nothing fires on its own: callers pass the current time to
/// [`TimerQueue::pop_due`]. Ordering contract: due timers come out by
/// `(deadline, insertion_order)`.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Time, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Entry {
            id,
            deadline,
            payload,
        });
        id
    }

    /// Removes a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Time> {
        self.entries
            .iter()
            .map(|e| e.deadline)
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }

    /// Removes and returns every timer with `deadline <= now`, in firing order.
    pub fn pop_due(&mut self, now: Time) -> Vec<(TimerId, T)> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.deadline <= now);
        self.entries = pending;

        // Ids are handed out in insertion order, so they break deadline ties.
        due.sort_by(|a, b| {
            a.deadline
                .0
                .total_cmp(&b.deadline.0)
                .then_with(|| a.id.cmp(&b.id))
        });
        due.into_iter().map(|e| (e.id, e.payload)).collect()
    }
}
