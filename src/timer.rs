//! Virtual clock with one-shot, cancellable timers.
//!
//! Every deferred action in the app (the splash hand-off, the assistant's
//! scripted reply) is scheduled here as a payload rather than a closure. The
//! owner drives time forward explicitly: tests jump the clock, the terminal
//! front end maps wall-clock time onto it. Timers with equal deadlines fire
//! in the order they were scheduled.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use tracing::debug;

/// Handle returned by [`TimerQueue::schedule_after`], used to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// One-shot timers keyed by virtual deadline.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    /// Ordered by (deadline, id) so equal deadlines keep FIFO order.
    timers: BTreeMap<(Duration, TimerId), T>,
    deadlines: HashMap<TimerId, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue with the clock at zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            timers: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time (elapsed since the queue was created).
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to become due `delay` from now.
    pub fn schedule_after(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        self.timers.insert((deadline, id), payload);
        self.deadlines.insert(id, deadline);
        debug!(timer = id.0, deadline_ms = deadline.as_millis() as u64, "Timer scheduled");
        id
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => {
                self.timers.remove(&(deadline, id));
                debug!(timer = id.0, "Timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel every pending timer whose payload matches. Returns the count.
    pub fn cancel_matching(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let doomed: Vec<(Duration, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, payload)| pred(payload))
            .map(|(key, _)| *key)
            .collect();
        for key in &doomed {
            self.timers.remove(key);
            self.deadlines.remove(&key.1);
        }
        if !doomed.is_empty() {
            debug!(count = doomed.len(), "Timers cancelled");
        }
        doomed.len()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.deadlines.clear();
    }

    /// Number of timers that have not fired yet.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Deadline of the earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline. The clock never moves backwards.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let (&key, _) = self.timers.iter().next()?;
        if key.0 > until {
            return None;
        }
        let payload = self.timers.remove(&key)?;
        self.deadlines.remove(&key.1);
        self.now = self.now.max(key.0);
        Some(payload)
    }

    /// Move the clock forward to `target` without firing anything.
    pub fn advance_to(&mut self, target: Duration) {
        self.now = self.now.max(target);
    }

    /// Move the clock forward and return every payload that became due,
    /// in firing order.
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        let target = self.now + by;
        let mut fired = Vec::new();
        while let Some(payload) = self.pop_due(target) {
            fired.push(payload);
        }
        self.advance_to(target);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_only_when_deadline_reached() {
        let mut q = TimerQueue::new();
        q.schedule_after(ms(1000), "reply");
        assert!(q.advance(ms(999)).is_empty());
        assert_eq!(q.advance(ms(1)), vec!["reply"]);
        assert!(q.is_empty());
        assert_eq!(q.now(), ms(1000));
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule_after(ms(500), 1);
        q.schedule_after(ms(500), 2);
        q.schedule_after(ms(500), 3);
        assert_eq!(q.advance(ms(500)), vec![1, 2, 3]);
    }

    #[test]
    fn earlier_deadline_fires_first() {
        let mut q = TimerQueue::new();
        q.schedule_after(ms(2000), "late");
        q.schedule_after(ms(100), "early");
        assert_eq!(q.advance(ms(5000)), vec!["early", "late"]);
    }

    #[test]
    fn cancel_prevents_firing_and_is_idempotent() {
        let mut q = TimerQueue::new();
        let id = q.schedule_after(ms(10), "x");
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(q.advance(ms(100)).is_empty());
    }

    #[test]
    fn cancel_after_fire_reports_false() {
        let mut q = TimerQueue::new();
        let id = q.schedule_after(ms(10), "x");
        q.advance(ms(10));
        assert!(!q.cancel(id));
    }

    #[test]
    fn cancel_matching_removes_only_matching() {
        let mut q = TimerQueue::new();
        q.schedule_after(ms(10), 1);
        q.schedule_after(ms(10), 2);
        q.schedule_after(ms(10), 3);
        assert_eq!(q.cancel_matching(|n| n % 2 == 1), 2);
        assert_eq!(q.advance(ms(10)), vec![2]);
    }

    #[test]
    fn pop_due_moves_clock_to_deadline() {
        let mut q = TimerQueue::new();
        q.schedule_after(ms(300), "a");
        assert_eq!(q.pop_due(ms(1000)), Some("a"));
        assert_eq!(q.now(), ms(300));
        q.advance_to(ms(200));
        assert_eq!(q.now(), ms(300), "clock never goes backwards");
    }

    #[test]
    fn schedule_is_relative_to_current_time() {
        let mut q = TimerQueue::new();
        q.advance(ms(700));
        q.schedule_after(ms(300), "b");
        assert_eq!(q.next_deadline(), Some(ms(1000)));
    }
}
