//! A single capacity-bounded cache level

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use super::policy::EvictionPolicy;
use super::stats::LevelStats;
use super::tracker::{ReplacementTracker, Tracker};
use crate::error::CacheError;

/// Fixed-capacity key/value container enforcing one eviction policy.
///
/// Capacity counts entries, not bytes. An entry evicted from a level is
/// discarded; it is never handed to another level.
#[derive(Debug)]
pub struct CacheLevel {
    capacity: usize,
    entries: HashMap<String, String>,
    tracker: Tracker,
    stats: LevelStats,
}

impl CacheLevel {
    /// Create an empty level. Capacity must be at least 1.
    pub fn new(capacity: usize, policy: EvictionPolicy) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "level capacity must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            tracker: Tracker::new(policy),
            stats: LevelStats::default(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.tracker.policy()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &LevelStats {
        &self.stats
    }

    /// Look up a key, updating recency (LRU) or access count (LFU) on a hit
    pub fn get(&mut self, key: &str) -> Option<&str> {
        if !self.entries.contains_key(key) {
            self.stats.misses += 1;
            return None;
        }

        self.tracker.record_access(key);
        self.stats.hits += 1;
        self.entries.get(key).map(String::as_str)
    }

    /// Insert or overwrite a key.
    ///
    /// Overwrites count as an access. Inserting a new key into a full level
    /// evicts exactly one entry first, which is returned.
    pub fn put(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<(String, String)> {
        let key = key.into();
        let value = value.into();

        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            self.tracker.record_access(&key);
            self.stats.updates += 1;
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        self.tracker.record_insert(&key);
        self.entries.insert(key, value);
        self.stats.insertions += 1;

        evicted
    }

    /// Delete a key without touching any other entry's bookkeeping
    pub fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.tracker.forget(key);
            true
        } else {
            false
        }
    }

    /// Membership test with no bookkeeping side effects
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Read a value with no bookkeeping side effects
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Access count of a key in an LFU level
    pub fn frequency(&self, key: &str) -> Option<u64> {
        self.tracker.frequency(key)
    }

    /// Entries in policy order: LRU from least to most recently used,
    /// LFU in insertion order.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        self.tracker
            .ordered_keys()
            .into_iter()
            .filter_map(|key| {
                self.entries
                    .get_key_value(key)
                    .map(|(k, v)| (k.as_str(), v.as_str()))
            })
            .collect()
    }

    /// Keys in policy order
    pub fn keys(&self) -> Vec<&str> {
        self.tracker.ordered_keys()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.tracker.clear();
    }

    /// Point-in-time copy of this level for diagnostics
    pub fn snapshot(&self, index: usize) -> LevelSnapshot {
        LevelSnapshot {
            index,
            capacity: self.capacity,
            policy: self.policy(),
            entries: self
                .entries()
                .into_iter()
                .map(|(key, value)| EntrySnapshot {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    fn evict(&mut self) -> Option<(String, String)> {
        let victim = self.tracker.victim()?.to_string();
        self.tracker.forget(&victim);
        let value = self.entries.remove(&victim)?;
        self.stats.evictions += 1;

        debug!(
            "Evicted {} from {} level (capacity {})",
            victim,
            self.policy(),
            self.capacity
        );
        Some((victim, value))
    }
}

/// A single key/value pair in a snapshot
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EntrySnapshot {
    pub key: String,
    pub value: String,
}

/// Diagnostic dump of one level
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LevelSnapshot {
    pub index: usize,
    pub capacity: usize,
    pub policy: EvictionPolicy,
    pub entries: Vec<EntrySnapshot>,
}

impl LevelSnapshot {
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }
}

impl fmt::Display for LevelSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level {} (capacity {}, {}):",
            self.index + 1,
            self.capacity,
            self.policy
        )?;
        for entry in &self.entries {
            write!(f, " ({}: {})", entry.key, entry.value)?;
        }
        Ok(())
    }
}
