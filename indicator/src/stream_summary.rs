//! Space-Saving top-K summary.
//!
//! Tracks at most `capacity` keys. An untracked key arriving at a full
//! summary replaces the key with the lowest count and inherits that count
//! plus one, so every reported count is an upper bound on the true count.

use ahash::AHashMap;
use std::collections::BTreeSet;

/// A tracked key with its estimated count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    /// The key.
    pub key: u64,
    /// Upper bound on the number of occurrences.
    pub count: u64,
    /// Largest possible overestimate in `count`.
    pub error: u64,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    count: u64,
    error: u64,
    seq: u64,
}

/// Space-Saving summary of the most frequent keys.
#[derive(Debug, Clone)]
pub struct StreamSummary {
    capacity: usize,
    slots: AHashMap<u64, Slot>,
    // (count, seq, key), ordered so the first element is the eviction victim.
    order: BTreeSet<(u64, u64, u64)>,
    next_seq: u64,
}

impl StreamSummary {
    /// Create an empty summary tracking at most `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            slots: AHashMap::with_capacity(capacity),
            order: BTreeSet::new(),
            next_seq: 0,
        }
    }

    /// Record one occurrence of `key`.
    pub fn offer(&mut self, key: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;

        if let Some(slot) = self.slots.get_mut(&key) {
            self.order.remove(&(slot.count, slot.seq, key));
            slot.count += 1;
            slot.seq = seq;
            self.order.insert((slot.count, seq, key));
            return;
        }

        let (count, error) = if self.slots.len() < self.capacity {
            (1, 0)
        } else {
            match self.order.pop_first() {
                Some((min, _, victim)) => {
                    self.slots.remove(&victim);
                    (min + 1, min)
                }
                None => (1, 0),
            }
        };
        self.slots.insert(key, Slot { count, error, seq });
        self.order.insert((count, seq, key));
    }

    /// Up to `k` counters in descending order of count.
    pub fn top_k(&self, k: usize) -> impl Iterator<Item = Counter> + '_ {
        self.order
            .iter()
            .rev()
            .take(k)
            .map(|&(count, _, key)| Counter {
                key,
                count,
                error: self.slots.get(&key).map_or(0, |slot| slot.error),
            })
    }

    /// Estimated count of `key`, if tracked.
    pub fn count(&self, key: u64) -> Option<u64> {
        self.slots.get(&key).map(|slot| slot.count)
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no key is tracked.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of tracked keys.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_below_capacity() {
        let mut summary = StreamSummary::new(10);
        for key in [1, 1, 1, 1, 2, 2, 3] {
            summary.offer(key);
        }
        let top: Vec<(u64, u64)> = summary.top_k(10).map(|c| (c.key, c.count)).collect();
        assert_eq!(top, vec![(1, 4), (2, 2), (3, 1)]);
        assert!(summary.top_k(10).all(|c| c.error == 0));
    }

    #[test]
    fn test_replaces_minimum_when_full() {
        let mut summary = StreamSummary::new(2);
        for key in [1, 1, 1, 2, 3] {
            summary.offer(key);
        }
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.count(1), Some(3));
        assert_eq!(summary.count(2), None);
        assert_eq!(summary.count(3), Some(2));

        let replaced = summary.top_k(2).find(|c| c.key == 3).unwrap();
        assert_eq!(replaced.error, 1);
    }

    #[test]
    fn test_counts_are_upper_bounds() {
        let mut summary = StreamSummary::new(8);
        let mut truth = AHashMap::new();
        for i in 0..2_000u64 {
            let key = if i % 3 == 0 { i % 5 } else { i % 97 };
            summary.offer(key);
            *truth.entry(key).or_insert(0u64) += 1;
        }
        assert!(summary.len() <= summary.capacity());
        for counter in summary.top_k(8) {
            assert!(counter.count >= truth[&counter.key]);
            assert!(counter.count - counter.error <= truth[&counter.key]);
        }
    }

    #[test]
    fn test_top_k_truncates() {
        let mut summary = StreamSummary::new(10);
        for key in 0..10u64 {
            for _ in 0..=key {
                summary.offer(key);
            }
        }
        let top: Vec<u64> = summary.top_k(3).map(|c| c.key).collect();
        assert_eq!(top, vec![9, 8, 7]);
    }
}
