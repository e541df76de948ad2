//! Replacement bookkeeping for eviction policies
//!
//! A tracker only knows about keys. The owning [`CacheLevel`](super::CacheLevel)
//! stores the values and tells the tracker when a key is inserted, accessed
//! or dropped; the tracker answers which key should go next.

use std::collections::{BTreeMap, HashMap};

use super::policy::EvictionPolicy;

/// Capability interface shared by all replacement trackers
pub trait ReplacementTracker {
    /// Start tracking a key that is not yet tracked
    fn record_insert(&mut self, key: &str);

    /// Register a hit (or an overwrite) on a tracked key
    fn record_access(&mut self, key: &str);

    /// Stop tracking a key. Unknown keys are ignored.
    fn forget(&mut self, key: &str);

    /// The key that would be evicted next, if any
    fn victim(&self) -> Option<&str>;

    /// Tracked keys in policy-defined listing order
    fn ordered_keys(&self) -> Vec<&str>;

    /// Drop all bookkeeping
    fn clear(&mut self);
}

/// Recency order keyed by a monotonically increasing stamp.
///
/// The smallest stamp is the least recently used key.
#[derive(Debug, Default)]
pub struct LruTracker {
    next_stamp: u64,
    stamps: HashMap<String, u64>,
    order: BTreeMap<u64, String>,
}

impl ReplacementTracker for LruTracker {
    fn record_insert(&mut self, key: &str) {
        debug_assert!(!self.stamps.contains_key(key), "key already tracked: {key}");
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.stamps.insert(key.to_string(), stamp);
        self.order.insert(stamp, key.to_string());
    }

    fn record_access(&mut self, key: &str) {
        let Some(stamp) = self.stamps.get_mut(key) else {
            return;
        };
        let old = *stamp;
        *stamp = self.next_stamp;
        self.next_stamp += 1;

        if let Some(owned) = self.order.remove(&old) {
            self.order.insert(*stamp, owned);
        }
    }

    fn forget(&mut self, key: &str) {
        if let Some(stamp) = self.stamps.remove(key) {
            self.order.remove(&stamp);
        }
    }

    fn victim(&self) -> Option<&str> {
        self.order.values().next().map(String::as_str)
    }

    fn ordered_keys(&self) -> Vec<&str> {
        self.order.values().map(String::as_str).collect()
    }

    fn clear(&mut self) {
        self.stamps.clear();
        self.order.clear();
    }
}

#[derive(Debug, Clone, Copy)]
struct Frequency {
    count: u64,
    inserted: u64,
}

impl Frequency {
    fn rank(&self) -> (u64, u64) {
        (self.count, self.inserted)
    }
}

/// Access counts with an ordered index on `(count, insertion sequence)`.
///
/// The first key in the index has the lowest count and, among equal counts,
/// was inserted into the level earliest.
#[derive(Debug, Default)]
pub struct LfuTracker {
    next_seq: u64,
    counts: HashMap<String, Frequency>,
    by_rank: BTreeMap<(u64, u64), String>,
}

impl LfuTracker {
    /// Access count for a tracked key
    pub fn frequency(&self, key: &str) -> Option<u64> {
        self.counts.get(key).map(|f| f.count)
    }
}

impl ReplacementTracker for LfuTracker {
    fn record_insert(&mut self, key: &str) {
        debug_assert!(!self.counts.contains_key(key), "key already tracked: {key}");
        let freq = Frequency {
            count: 1,
            inserted: self.next_seq,
        };
        self.next_seq += 1;
        self.counts.insert(key.to_string(), freq);
        self.by_rank.insert(freq.rank(), key.to_string());
    }

    fn record_access(&mut self, key: &str) {
        let Some(freq) = self.counts.get_mut(key) else {
            return;
        };
        let Some(owned) = self.by_rank.remove(&freq.rank()) else {
            return;
        };
        freq.count += 1;
        self.by_rank.insert(freq.rank(), owned);
    }

    fn forget(&mut self, key: &str) {
        if let Some(freq) = self.counts.remove(key) {
            self.by_rank.remove(&freq.rank());
        }
    }

    fn victim(&self) -> Option<&str> {
        self.by_rank.values().next().map(String::as_str)
    }

    fn ordered_keys(&self) -> Vec<&str> {
        let mut keys: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(key, freq)| (key.as_str(), freq.inserted))
            .collect();
        keys.sort_unstable_by_key(|&(_, inserted)| inserted);
        keys.into_iter().map(|(key, _)| key).collect()
    }

    fn clear(&mut self) {
        self.counts.clear();
        self.by_rank.clear();
    }
}

/// Per-level tracker, one variant per [`EvictionPolicy`]
#[derive(Debug)]
pub enum Tracker {
    Lru(LruTracker),
    Lfu(LfuTracker),
}

impl Tracker {
    pub fn new(policy: EvictionPolicy) -> Self {
        match policy {
            EvictionPolicy::Lru => Tracker::Lru(LruTracker::default()),
            EvictionPolicy::Lfu => Tracker::Lfu(LfuTracker::default()),
        }
    }

    pub fn policy(&self) -> EvictionPolicy {
        match self {
            Tracker::Lru(_) => EvictionPolicy::Lru,
            Tracker::Lfu(_) => EvictionPolicy::Lfu,
        }
    }

    /// Access count for LFU levels; `None` for LRU or untracked keys
    pub fn frequency(&self, key: &str) -> Option<u64> {
        match self {
            Tracker::Lru(_) => None,
            Tracker::Lfu(t) => t.frequency(key),
        }
    }

    fn inner(&self) -> &dyn ReplacementTracker {
        match self {
            Tracker::Lru(t) => t,
            Tracker::Lfu(t) => t,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ReplacementTracker {
        match self {
            Tracker::Lru(t) => t,
            Tracker::Lfu(t) => t,
        }
    }
}

impl ReplacementTracker for Tracker {
    fn record_insert(&mut self, key: &str) {
        self.inner_mut().record_insert(key)
    }

    fn record_access(&mut self, key: &str) {
        self.inner_mut().record_access(key)
    }

    fn forget(&mut self, key: &str) {
        self.inner_mut().forget(key)
    }

    fn victim(&self) -> Option<&str> {
        self.inner().victim()
    }

    fn ordered_keys(&self) -> Vec<&str> {
        self.inner().ordered_keys()
    }

    fn clear(&mut self) {
        self.inner_mut().clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_victim_is_oldest_untouched() {
        let mut t = LruTracker::default();
        t.record_insert("a");
        t.record_insert("b");
        t.record_insert("c");
        assert_eq!(t.victim(), Some("a"));

        t.record_access("a");
        assert_eq!(t.victim(), Some("b"));
        assert_eq!(t.ordered_keys(), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_lru_forget_and_unknown_keys() {
        let mut t = LruTracker::default();
        t.record_insert("a");
        t.record_access("missing");
        t.forget("missing");
        t.forget("a");
        assert_eq!(t.victim(), None);
        assert!(t.ordered_keys().is_empty());
    }

    #[test]
    fn test_lfu_lowest_count_then_oldest_insert() {
        let mut t = LfuTracker::default();
        t.record_insert("a");
        t.record_insert("b");
        t.record_insert("c");
        // All at count 1: earliest insert goes first
        assert_eq!(t.victim(), Some("a"));

        t.record_access("a");
        assert_eq!(t.frequency("a"), Some(2));
        assert_eq!(t.victim(), Some("b"));

        t.record_access("b");
        t.record_access("c");
        // All at count 2 again
        assert_eq!(t.victim(), Some("a"));
    }

    #[test]
    fn test_lfu_listing_keeps_insertion_order() {
        let mut t = LfuTracker::default();
        t.record_insert("x");
        t.record_insert("y");
        t.record_access("x");
        t.record_access("x");
        assert_eq!(t.ordered_keys(), vec!["x", "y"]);

        t.forget("x");
        t.record_insert("x");
        assert_eq!(t.ordered_keys(), vec!["y", "x"]);
        assert_eq!(t.frequency("x"), Some(1));
    }

    #[test]
    fn test_tracker_dispatch_matches_policy() {
        let lru = Tracker::new(EvictionPolicy::Lru);
        let lfu = Tracker::new(EvictionPolicy::Lfu);
        assert_eq!(lru.policy(), EvictionPolicy::Lru);
        assert_eq!(lfu.policy(), EvictionPolicy::Lfu);

        let mut lru = lru;
        lru.record_insert("k");
        assert_eq!(lru.frequency("k"), None);
    }
}
