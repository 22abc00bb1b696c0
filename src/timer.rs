//! Timer queue: the host's single-threaded timer primitive.
//!
//! Timers are one-shot and keyed by what they wake up. The queue owns a
//! virtual clock that only moves when the host advances it, so a board can
//! be driven by a real ticker or stepped deterministically in tests.
//!
//! A cancelled timer is removed from the queue and can never be popped.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Counters for timer activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerStats {
    /// Timers armed.
    pub scheduled: u64,
    /// Timers cancelled before firing.
    pub cancelled: u64,
    /// Timers that fired.
    pub fired: u64,
}

/// One-shot timers ordered by deadline, then by arming order.
#[derive(Debug)]
pub struct TimerQueue<K> {
    /// Current virtual time.
    now: Duration,
    /// Next id to hand out.
    next_id: u64,
    /// Pending timers by (deadline, id).
    queue: BTreeMap<(Duration, TimerId), K>,
    /// Deadline lookup for cancellation.
    deadlines: HashMap<TimerId, Duration>,
    /// Activity counters.
    stats: TimerStats,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K> {
    /// Create an empty queue at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
            stats: TimerStats::default(),
        }
    }

    /// Current virtual time.
    #[inline]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Arm a timer that fires `delay` from now.
    pub fn schedule(&mut self, delay: Duration, key: K) -> TimerId {
        self.schedule_at(self.now.saturating_add(delay), key)
    }

    /// Arm a timer that fires at `deadline` (never earlier than now).
    pub fn schedule_at(&mut self, deadline: Duration, key: K) -> TimerId {
        let deadline = deadline.max(self.now);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.insert((deadline, id), key);
        self.deadlines.insert(id, deadline);
        self.stats.scheduled += 1;
        id
    }

    /// Cancel a pending timer.
    ///
    /// Returns `false` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(deadline) = self.deadlines.remove(&id) else {
            return false;
        };
        self.queue.remove(&(deadline, id));
        self.stats.cancelled += 1;
        true
    }

    /// Whether `id` is still pending.
    #[inline]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Number of pending timers.
    #[inline]
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    /// Whether no timer is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Activity counters.
    #[inline]
    pub const fn stats(&self) -> TimerStats {
        self.stats
    }

    /// Pop the earliest timer due at or before `until`.
    ///
    /// The clock moves to the popped timer's deadline. Returns `None` when
    /// nothing is due; the clock is left where it was.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, K)> {
        let (&(deadline, id), _) = self.queue.first_key_value()?;
        if deadline > until {
            return None;
        }
        let key = self.queue.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);
        self.stats.fired += 1;
        Some((id, key))
    }

    /// Move the clock forward to `time`. Never moves backward.
    #[inline]
    pub fn set_now(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    /// Cancel every pending timer.
    pub fn clear(&mut self) {
        let cancelled = u64::try_from(self.deadlines.len()).unwrap_or(u64::MAX);
        self.queue.clear();
        self.deadlines.clear();
        self.stats.cancelled += cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(30), "c");
        timers.schedule(ms(10), "a");
        timers.schedule(ms(20), "b");

        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(ms(100)))
            .map(|(_, key)| key)
            .collect();
        assert_eq!(fired, ["a", "b", "c"]);
        assert_eq!(timers.now(), ms(30));
    }

    #[test]
    fn test_ties_fire_in_arming_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(10), 1);
        timers.schedule(ms(10), 2);
        assert_eq!(timers.pop_due(ms(10)).map(|(_, k)| k), Some(1));
        assert_eq!(timers.pop_due(ms(10)).map(|(_, k)| k), Some(2));
    }

    #[test]
    fn test_not_due_yet() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(50), ());
        assert!(timers.pop_due(ms(49)).is_none());
        assert_eq!(timers.now(), Duration::ZERO);
        assert_eq!(timers.next_deadline(), Some(ms(50)));
    }

    #[test]
    fn test_cancelled_never_fires() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(ms(10), ());
        assert!(timers.is_pending(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.pop_due(ms(100)).is_none());
        assert_eq!(timers.stats().cancelled, 1);
        assert_eq!(timers.stats().fired, 0);
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(ms(10), ());
        assert!(timers.pop_due(ms(10)).is_some());
        assert!(!timers.cancel(id));
        assert_eq!(timers.stats().cancelled, 0);
    }

    #[test]
    fn test_schedule_relative_to_clock() {
        let mut timers = TimerQueue::new();
        timers.set_now(ms(100));
        timers.schedule(ms(5), ());
        assert_eq!(timers.next_deadline(), Some(ms(105)));

        // Past deadlines are clamped to now.
        timers.schedule_at(ms(50), ());
        assert_eq!(timers.next_deadline(), Some(ms(100)));
    }

    #[test]
    fn test_clock_never_goes_back() {
        let mut timers: TimerQueue<()> = TimerQueue::new();
        timers.set_now(ms(100));
        timers.set_now(ms(10));
        assert_eq!(timers.now(), ms(100));
    }

    #[test]
    fn test_clear() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(1), ());
        timers.schedule(ms(2), ());
        timers.clear();
        assert!(timers.is_empty());
        assert_eq!(timers.stats().cancelled, 2);
    }
}
