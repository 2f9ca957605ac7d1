//! History storage, eviction and freshness expiry.

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use super::entry::HistoryEntry;
use crate::timer::Scheduler;

/// A newest-first log of rolls, bounded to a fixed number of entries.
///
/// Recording an entry marks it new and demotes every older entry. The new
/// flag also expires on its own once the freshness window has passed.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    freshness_window: TimeDelta,
    timers: Scheduler<Uuid>,
}

impl HistoryLog {
    /// Create a log keeping at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize, freshness_window: TimeDelta) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            freshness_window,
            timers: Scheduler::new(),
        }
    }

    /// Prepend `entry` as the new newest entry, evicting the oldest past the cap.
    pub fn record(&mut self, mut entry: HistoryEntry, now: DateTime<Utc>) -> Uuid {
        for old in self.entries.iter_mut() {
            old.is_new = false;
        }
        self.timers.clear();

        let id = entry.id;
        entry.is_new = true;
        self.entries.push_front(entry);
        self.timers.schedule(id, now + self.freshness_window);

        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                tracing::debug!(id = %evicted.id, formula = %evicted.formula, "history entry evicted");
            }
        }
        id
    }

    /// Expire freshness flags whose window has passed. Returns how many flipped.
    pub fn tick(&mut self, now: DateTime<Utc>) -> usize {
        let mut flipped = 0;
        for id in self.timers.due(now) {
            if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id && e.is_new) {
                entry.is_new = false;
                flipped += 1;
            }
        }
        flipped
    }

    /// When the current freshness highlight expires.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timers.next_deadline()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.timers.clear();
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Maximum number of entries kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned copy of the entries, newest first.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rf_mechanics::RollResult;

    fn t(ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::default() + TimeDelta::milliseconds(ms)
    }

    fn entry(total: i64, at: DateTime<Utc>) -> HistoryEntry {
        let result = RollResult {
            total,
            rolls: Vec::new(),
            modifier: 0,
            formula: format!("+{total}"),
        };
        HistoryEntry::from_roll(&result, at)
    }

    fn window() -> TimeDelta {
        TimeDelta::milliseconds(750)
    }

    fn fresh_count(log: &HistoryLog) -> usize {
        log.entries().filter(|e| e.is_new).count()
    }

    #[test]
    fn newest_first_and_only_one_new() {
        let mut log = HistoryLog::new(5, window());
        log.record(entry(1, t(0)), t(0));
        log.record(entry(2, t(100)), t(100));
        log.record(entry(3, t(200)), t(200));
        let totals: Vec<i64> = log.entries().map(|e| e.total).collect();
        assert_eq!(totals, vec![3, 2, 1]);
        assert_eq!(fresh_count(&log), 1);
        assert!(log.newest().unwrap().is_new);
    }

    #[test]
    fn bound_evicts_oldest() {
        let mut log = HistoryLog::new(5, window());
        for i in 0..6 {
            log.record(entry(i, t(i * 10)), t(i * 10));
        }
        assert_eq!(log.len(), 5);
        let totals: Vec<i64> = log.entries().map(|e| e.total).collect();
        assert_eq!(totals, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn freshness_expires_after_window() {
        let mut log = HistoryLog::new(10, window());
        let id = log.record(entry(7, t(0)), t(0));
        assert_eq!(log.tick(t(749)), 0);
        assert!(log.get(id).unwrap().is_new);
        assert_eq!(log.next_deadline(), Some(t(750)));
        assert_eq!(log.tick(t(750)), 1);
        assert!(!log.get(id).unwrap().is_new);
        assert_eq!(log.next_deadline(), None);
    }

    #[test]
    fn newer_entry_supersedes_pending_expiry() {
        let mut log = HistoryLog::new(10, window());
        let first = log.record(entry(1, t(0)), t(0));
        let second = log.record(entry(2, t(500)), t(500));
        assert!(!log.get(first).unwrap().is_new);

        // The first entry's deadline has passed but it no longer matters.
        assert_eq!(log.tick(t(800)), 0);
        assert!(log.get(second).unwrap().is_new);

        assert_eq!(log.tick(t(1250)), 1);
        assert_eq!(fresh_count(&log), 0);
    }

    #[test]
    fn clear_empties_and_cancels() {
        let mut log = HistoryLog::new(3, window());
        log.record(entry(1, t(0)), t(0));
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.next_deadline(), None);
        assert_eq!(log.tick(t(1000)), 0);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut log = HistoryLog::new(0, window());
        log.record(entry(1, t(0)), t(0));
        log.record(entry(2, t(1)), t(1));
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.len(), 1);
        assert_eq!(log.newest().unwrap().total, 2);
    }

    proptest! {
        #[test]
        fn keeps_the_n_most_recent(cap in 1usize..12, extra in 1usize..12) {
            let mut log = HistoryLog::new(cap, window());
            let n = cap + extra;
            for i in 0..n {
                let at = t(i as i64);
                log.record(entry(i as i64, at), at);
                prop_assert!(fresh_count(&log) <= 1);
            }
            prop_assert_eq!(log.len(), cap);
            let totals: Vec<i64> = log.entries().map(|e| e.total).collect();
            let expected: Vec<i64> = (n - cap..n).rev().map(|i| i as i64).collect();
            prop_assert_eq!(totals, expected);
        }
    }
}
