use chrono::Duration;
use indexmap::IndexMap;
use lexis_types::TrendingEntry;
use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_RETENTION_DAYS: i64 = 7;
pub const DEFAULT_MIN_TERM_LEN: usize = 3;

/// Frequency/recency cache over searched terms.
///
/// Shared between request handlers; `record` is a read-modify-write so the
/// map sits behind a mutex.
pub struct TrendingTracker<C: Clock = SystemClock> {
    entries: Mutex<IndexMap<String, TrendingEntry>>,
    capacity: usize,
    retention: Duration,
    min_term_len: usize,
    clock: C,
}

impl TrendingTracker<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TrendingTracker<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TrendingTracker<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: Mutex::new(IndexMap::new()),
            capacity: DEFAULT_CAPACITY,
            retention: Duration::days(DEFAULT_RETENTION_DAYS),
            min_term_len: DEFAULT_MIN_TERM_LEN,
            clock,
        }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    pub fn min_term_len(mut self, min_term_len: usize) -> Self {
        self.min_term_len = min_term_len;
        self
    }

    /// Count one search of `term`
    pub fn record(&self, term: &str) {
        if term.chars().count() < self.min_term_len {
            return;
        }

        let now = self.clock.now();
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get_mut(term) {
            entry.count += 1;
            entry.last_seen_at = now;
            return;
        }

        entries.insert(
            term.to_string(),
            TrendingEntry {
                word: term.to_string(),
                count: 1,
                last_seen_at: now,
            },
        );

        if entries.len() > self.capacity {
            // stable: among equal counts the earliest tracked survive
            entries.sort_by(|_, a, _, b| b.count.cmp(&a.count));
            let evicted = entries.len() - self.capacity;
            entries.truncate(self.capacity);
            tracing::debug!("Evicted {} trending entries", evicted);
        }
    }

    /// Most searched terms seen within the retention window
    pub fn top_trending(&self, limit: usize) -> Vec<String> {
        self.recent(limit).into_iter().map(|e| e.word).collect()
    }

    /// Like [`top_trending`](Self::top_trending) but with counts
    pub fn recent(&self, limit: usize) -> Vec<TrendingEntry> {
        let cutoff = self.clock.now() - self.retention;

        let mut recent: Vec<TrendingEntry> = self
            .entries
            .lock()
            .values()
            .filter(|entry| entry.last_seen_at > cutoff)
            .cloned()
            .collect();

        recent.sort_by(|a, b| b.count.cmp(&a.count));
        recent.truncate(limit);
        recent
    }

    pub fn get(&self, term: &str) -> Option<TrendingEntry> {
        self.entries.lock().get(term).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::clock::ManualClock;

    fn tracker() -> (Arc<ManualClock>, TrendingTracker<Arc<ManualClock>>) {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        (clock.clone(), TrendingTracker::with_clock(clock))
    }

    #[test]
    fn short_terms_are_ignored() {
        let (_, tracker) = tracker();
        tracker.record("ox");
        tracker.record("");
        assert!(tracker.is_empty());

        tracker.record("cat");
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn repeat_searches_increment_and_refresh() {
        let (clock, tracker) = tracker();
        tracker.record("ephemeral");
        clock.advance(Duration::hours(3));
        tracker.record("ephemeral");

        let entry = tracker.get("ephemeral").unwrap();
        assert_eq!(entry.count, 2);
        assert_eq!(entry.last_seen_at, clock.now());
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn ranks_by_count() {
        let (_, tracker) = tracker();
        for (term, times) in [("alpha", 1), ("bravo", 3), ("charlie", 2)] {
            for _ in 0..times {
                tracker.record(term);
            }
        }

        assert_eq!(tracker.top_trending(2), vec!["bravo", "charlie"]);
        assert_eq!(tracker.top_trending(10).len(), 3);
    }

    #[test]
    fn capacity_evicts_lowest_count() {
        let (_, tracker) = tracker();
        for i in 0..100 {
            tracker.record(&format!("term{i:03}"));
            tracker.record(&format!("term{i:03}"));
        }
        // the newcomer is the only count-1 entry
        tracker.record("lonely");
        assert_eq!(tracker.len(), 100);
        assert!(tracker.get("lonely").is_none());
        assert!((0..100).all(|i| tracker.get(&format!("term{i:03}")).is_some()));
    }

    #[test]
    fn capacity_ties_evict_newest() {
        let (_, tracker) = tracker();
        let tracker = tracker.capacity(3);
        tracker.record("one");
        tracker.record("two");
        tracker.record("two");
        tracker.record("three");
        tracker.record("three");
        tracker.record("four");

        assert_eq!(tracker.len(), 3);
        assert!(tracker.get("four").is_none());
        assert!(tracker.get("one").is_some());
    }

    #[test]
    fn stale_entries_are_hidden_but_resident() {
        let (clock, tracker) = tracker();
        tracker.record("forgotten");
        tracker.record("forgotten");
        clock.advance(Duration::days(8));
        tracker.record("fresh");

        assert_eq!(tracker.top_trending(5), vec!["fresh"]);
        assert!(tracker.get("forgotten").is_some());
    }
}
