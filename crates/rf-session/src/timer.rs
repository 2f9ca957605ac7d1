//! Keyed, cancellable deadlines driven by an external clock.

use chrono::{DateTime, Utc};

/// A set of pending deadlines, at most one per key.
///
/// Nothing fires on its own: the owner calls [`Scheduler::due`] with the
/// current time and reacts to the keys it gets back.
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    pending: Vec<(K, DateTime<Utc>)>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<K: PartialEq> Scheduler<K> {
    /// An empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to fire at `at`, replacing any earlier deadline for it.
    pub fn schedule(&mut self, key: K, at: DateTime<Utc>) {
        self.cancel(&key);
        self.pending.push((key, at));
    }

    /// Cancel the deadline for `key`. Returns whether one was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(k, _)| k != key);
        self.pending.len() != before
    }

    /// Remove and return every key due at or before `now`, earliest first.
    pub fn due(&mut self, now: DateTime<Utc>) -> Vec<K> {
        let (mut fired, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(_, at)| *at <= now);
        self.pending = waiting;
        fired.sort_by_key(|(_, at)| *at);
        fired.into_iter().map(|(key, _)| key).collect()
    }

    /// When `key` is due, if it is pending.
    pub fn deadline(&self, key: &K) -> Option<DateTime<Utc>> {
        self.pending
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, at)| *at)
    }

    /// The earliest pending deadline.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.iter().map(|(_, at)| *at).min()
    }

    /// Drop every pending deadline.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of pending deadlines.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn t(ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::default() + TimeDelta::milliseconds(ms)
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule("late", t(300));
        s.schedule("early", t(100));
        s.schedule("never", t(900));
        assert_eq!(s.due(t(50)), Vec::<&str>::new());
        assert_eq!(s.due(t(300)), vec!["early", "late"]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.next_deadline(), Some(t(900)));
    }

    #[test]
    fn rescheduling_replaces() {
        let mut s = Scheduler::new();
        s.schedule(1, t(100));
        s.schedule(1, t(500));
        assert_eq!(s.len(), 1);
        assert_eq!(s.deadline(&1), Some(t(500)));
        assert!(s.due(t(200)).is_empty());
    }

    #[test]
    fn cancel_and_clear() {
        let mut s = Scheduler::new();
        s.schedule('a', t(10));
        s.schedule('b', t(20));
        assert!(s.cancel(&'a'));
        assert!(!s.cancel(&'a'));
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.next_deadline(), None);
    }
}
