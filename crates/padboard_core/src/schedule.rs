//! Keyed debounce queue for coalescing persistence writes.
//!
//! # Responsibility
//! - Defer keyed actions by a fixed delay with cancel-and-reschedule
//!   semantics: each new schedule resets the deadline, so the last write
//!   within an idle window wins.
//!
//! # Invariants
//! - Time is an injected millisecond value; core never reads a wall clock,
//!   which keeps debounce behavior fully testable.
//! - Keys are independent: rescheduling one never disturbs another.

use std::collections::BTreeMap;

/// Deferred-write queue keyed by `K`.
#[derive(Debug)]
pub struct DebounceQueue<K: Ord + Clone> {
    deadlines: BTreeMap<K, u64>,
    delay_ms: u64,
}

impl<K: Ord + Clone> DebounceQueue<K> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            deadlines: BTreeMap::new(),
            delay_ms,
        }
    }

    /// Schedules (or reschedules) `key` to fire `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, key: K, now_ms: u64) {
        self.deadlines.insert(key, now_ms + self.delay_ms);
    }

    /// Cancels a pending key. Returns whether anything was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        self.deadlines.remove(key).is_some()
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.deadlines.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Drains and returns every key whose deadline has passed.
    pub fn due(&mut self, now_ms: u64) -> Vec<K> {
        let fired: Vec<K> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now_ms)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &fired {
            self.deadlines.remove(key);
        }
        fired
    }

    /// Drains every pending key regardless of deadline; used at teardown.
    pub fn drain_all(&mut self) -> Vec<K> {
        let keys: Vec<K> = self.deadlines.keys().cloned().collect();
        self.deadlines.clear();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::DebounceQueue;

    #[test]
    fn reschedule_resets_the_deadline() {
        let mut queue = DebounceQueue::new(500);
        queue.schedule("meta", 0);
        queue.schedule("meta", 400);
        assert!(queue.due(700).is_empty(), "deadline should have moved to 900");
        assert_eq!(queue.due(900), vec!["meta"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn keys_fire_independently() {
        let mut queue = DebounceQueue::new(500);
        queue.schedule("a", 0);
        queue.schedule("b", 300);
        assert_eq!(queue.due(500), vec!["a"]);
        assert!(queue.is_pending(&"b"));
        assert_eq!(queue.due(800), vec!["b"]);
    }

    #[test]
    fn cancel_removes_pending_entry() {
        let mut queue = DebounceQueue::new(500);
        queue.schedule("a", 0);
        assert!(queue.cancel(&"a"));
        assert!(!queue.cancel(&"a"));
        assert!(queue.due(1_000).is_empty());
    }

    #[test]
    fn drain_all_fires_early() {
        let mut queue = DebounceQueue::new(500);
        queue.schedule("a", 0);
        queue.schedule("b", 0);
        let mut drained = queue.drain_all();
        drained.sort();
        assert_eq!(drained, vec!["a", "b"]);
        assert!(queue.is_empty());
    }
}
