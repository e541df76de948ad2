//! Shared level configuration types
//!
//! The config file is loaded by the `tiercache` binary, but the per-level
//! shape and its validation live here so the chain can be built from it.

use serde::{Deserialize, Serialize};

use crate::cache::EvictionPolicy;
use crate::error::CacheError;

/// One `[[levels]]` entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LevelConfig {
    /// Maximum number of entries held by the level
    pub capacity: i64,
    /// Eviction policy tag ("LRU" or "LFU", case-insensitive)
    #[serde(default = "default_policy")]
    pub policy: String,
}

fn default_policy() -> String {
    EvictionPolicy::default().as_str().to_string()
}

impl LevelConfig {
    pub fn new(capacity: i64, policy: impl Into<String>) -> Self {
        Self {
            capacity,
            policy: policy.into(),
        }
    }

    /// Check the capacity and parse the policy tag
    pub fn validate(&self) -> Result<(usize, EvictionPolicy), CacheError> {
        let capacity = usize::try_from(self.capacity)
            .ok()
            .filter(|&c| c >= 1)
            .ok_or_else(|| {
                CacheError::InvalidConfiguration(format!(
                    "level capacity must be a positive integer, got {}",
                    self.capacity
                ))
            })?;
        let policy = self.policy.parse::<EvictionPolicy>()?;
        Ok((capacity, policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_known_policies() {
        assert_eq!(
            LevelConfig::new(3, "LRU").validate().unwrap(),
            (3, EvictionPolicy::Lru)
        );
        assert_eq!(
            LevelConfig::new(1, "lfu").validate().unwrap(),
            (1, EvictionPolicy::Lfu)
        );
    }

    #[test]
    fn test_validate_rejects_non_positive_capacity() {
        for capacity in [0, -1, i64::MIN] {
            let err = LevelConfig::new(capacity, "LRU").validate().unwrap_err();
            assert!(matches!(err, CacheError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_validate_rejects_unknown_policy() {
        let err = LevelConfig::new(2, "ARC").validate().unwrap_err();
        assert!(matches!(err, CacheError::InvalidConfiguration(msg) if msg.contains("ARC")));
    }

    #[test]
    fn test_policy_defaults_to_lru() {
        let config: LevelConfig = toml::from_str("capacity = 4").unwrap();
        assert_eq!(config.policy, "LRU");
    }
}
