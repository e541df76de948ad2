//! Cache chain: ordered levels with lookup-time promotion

use tracing::{debug, info};

use super::level::{CacheLevel, LevelSnapshot};
use super::policy::EvictionPolicy;
use super::stats::ChainStats;
use crate::config::LevelConfig;
use crate::error::CacheError;

/// Ordered sequence of cache levels, index 0 being the fastest.
///
/// Writes go to level 0 only. A read that hits level `i > 0` copies the value
/// into every level above it and removes it from level `i`. Each of those
/// copies is a normal `put`, so promotion may evict entries from the
/// intermediate levels; evicted entries are dropped, never demoted.
#[derive(Debug, Default)]
pub struct CacheChain {
    levels: Vec<CacheLevel>,
    stats: ChainStats,
}

impl CacheChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from level configs, top level first
    pub fn from_config(levels: &[LevelConfig]) -> Result<Self, CacheError> {
        let mut chain = Self::new();
        for level in levels {
            chain.add_level_from_config(level)?;
        }
        Ok(chain)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[CacheLevel] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&CacheLevel> {
        self.levels.get(index)
    }

    /// Direct access to one level, bypassing the promotion protocol
    pub fn level_mut(&mut self, index: usize) -> Option<&mut CacheLevel> {
        self.levels.get_mut(index)
    }

    pub fn stats(&self) -> &ChainStats {
        &self.stats
    }

    /// Append an empty level at the slow end of the chain
    pub fn add_level(&mut self, capacity: usize, policy: EvictionPolicy) -> Result<(), CacheError> {
        let level = CacheLevel::new(capacity, policy)?;
        self.levels.push(level);

        info!(
            "Added cache level {} (capacity: {}, policy: {})",
            self.levels.len(),
            capacity,
            policy
        );
        Ok(())
    }

    /// Validate a level config and append it
    pub fn add_level_from_config(&mut self, config: &LevelConfig) -> Result<(), CacheError> {
        let (capacity, policy) = config.validate()?;
        self.add_level(capacity, policy)
    }

    /// Drop the level at `index`; later levels shift up by one
    pub fn remove_level(&mut self, index: usize) -> Result<(), CacheError> {
        if index >= self.levels.len() {
            return Err(CacheError::LevelIndexOutOfRange {
                index,
                len: self.levels.len(),
            });
        }

        let removed = self.levels.remove(index);
        info!(
            "Removed cache level {} ({} entries discarded)",
            index + 1,
            removed.len()
        );
        Ok(())
    }

    /// Look up a key, promoting it toward level 0 on a deeper hit
    pub fn get(&mut self, key: &str) -> Option<String> {
        let found = self
            .levels
            .iter_mut()
            .enumerate()
            .find_map(|(index, level)| level.get(key).map(|value| (index, value.to_string())));

        let Some((index, value)) = found else {
            self.stats.misses += 1;
            debug!("Cache miss for {}", key);
            return None;
        };

        self.stats.hits += 1;
        debug!("Found {} at level {}", key, index + 1);

        if index > 0 {
            self.promote(key, &value, index);
        }

        Some(value)
    }

    /// Write to level 0. A no-op on an empty chain.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self.levels.first_mut() {
            Some(top) => {
                debug!("Inserting {} into level 1", key);
                if let Some((evicted, _)) = top.put(key, value) {
                    debug!("Level 1 evicted {}", evicted);
                }
            }
            None => debug!("No cache levels configured, dropping put for {}", key),
        }
    }

    /// Diagnostic dump of every level in policy order
    pub fn list_contents(&self) -> Vec<LevelSnapshot> {
        self.levels
            .iter()
            .enumerate()
            .map(|(index, level)| level.snapshot(index))
            .collect()
    }

    fn promote(&mut self, key: &str, value: &str, from: usize) {
        for target in (0..from).rev() {
            if let Some((evicted, _)) = self.levels[target].put(key, value) {
                debug!(
                    "Promoting {} evicted {} from level {}",
                    key,
                    evicted,
                    target + 1
                );
            }
        }
        self.levels[from].remove(key);
        self.stats.promotions += 1;

        debug!("Promoted {} from level {} to level 1", key, from + 1);
    }
}
