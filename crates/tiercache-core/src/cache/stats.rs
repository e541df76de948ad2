//! Cache statistics

use serde::Serialize;
use std::fmt;

/// Counters for a single level
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct LevelStats {
    pub hits: u64,
    pub misses: u64,
    /// New keys written into the level
    pub insertions: u64,
    /// Overwrites of keys that were already resident
    pub updates: u64,
    pub evictions: u64,
}

/// Counters for lookups through the whole chain
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ChainStats {
    pub hits: u64,
    pub misses: u64,
    /// Hits below level 0 that copied the value upward
    pub promotions: u64,
}

impl ChainStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl fmt::Display for ChainStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} promotions={} hit_ratio={:.2}",
            self.hits,
            self.misses,
            self.promotions,
            self.hit_ratio()
        )
    }
}

impl fmt::Display for LevelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} insertions={} updates={} evictions={}",
            self.hits, self.misses, self.insertions, self.updates, self.evictions
        )
    }
}
