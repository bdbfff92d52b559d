//! Virtual-time timer facility.
//!
//! Each carousel owns one `Timers` and advances it from its `tick`. Wakes
//! fire in `(due, scheduling order)` order, and a wake scheduled by a
//! callback while draining is picked up in the same drain if it is already
//! due, which is how next-frame callbacks run right after the callback
//! that requested them.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a scheduled wake, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Scheduled<W> {
    id: TimerId,
    wake: W,
    repeat: Option<Duration>,
}

#[derive(Debug)]
pub struct Timers<W> {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), Scheduled<W>>,
}

impl<W: Copy> Default for Timers<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Copy> Timers<W> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `wake` once, `delay` from now.
    pub fn once(&mut self, delay: Duration, wake: W) -> TimerId {
        let id = self.allocate_id();
        self.insert(self.now + delay, Scheduled { id, wake, repeat: None });
        id
    }

    /// Fire `wake` every `interval`, first time one interval from now.
    pub fn every(&mut self, interval: Duration, wake: W) -> TimerId {
        // A zero interval would never let the clock move forward
        let interval = interval.max(Duration::from_millis(1));
        let id = self.allocate_id();
        self.insert(self.now + interval, Scheduled { id, wake, repeat: Some(interval) });
        id
    }

    /// Fire `wake` on the next drain, after everything already due.
    pub fn next_frame(&mut self, wake: W) -> TimerId {
        self.once(Duration::ZERO, wake)
    }

    /// Cancel a wake. Unknown or already fired handles are ignored.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|_, scheduled| scheduled.id != id);
        self.queue.len() != before
    }

    /// Due time of a pending wake.
    pub fn due(&self, id: TimerId) -> Option<Duration> {
        self.queue
            .iter()
            .find(|(_, scheduled)| scheduled.id == id)
            .map(|((due, _), _)| *due)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pop the earliest wake due at or before `until`, moving the clock to
    /// its due time. Repeating wakes are rescheduled before returning.
    pub fn pop_due(&mut self, until: Duration) -> Option<W> {
        let key = *self.queue.keys().next()?;
        if key.0 > until {
            return None;
        }
        let scheduled = self.queue.remove(&key)?;
        self.now = self.now.max(key.0);

        let wake = scheduled.wake;
        if let Some(interval) = scheduled.repeat {
            self.insert(key.0 + interval, scheduled);
        }
        Some(wake)
    }

    /// Move the clock to `until` once everything due has been drained.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn allocate_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, due: Duration, scheduled: Scheduled<W>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), scheduled);
    }
}
