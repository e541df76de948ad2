//! Cache eviction policies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing eviction policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEvictionPolicyError(String);

impl fmt::Display for ParseEvictionPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid eviction policy: {} (expected LRU or LFU)", self.0)
    }
}

impl std::error::Error for ParseEvictionPolicyError {}

/// Eviction policy for a single cache level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvictionPolicy {
    /// Least Recently Used - evict the entry that has gone longest without access
    #[default]
    Lru,
    /// Least Frequently Used - evict the entry with the lowest access count,
    /// oldest insertion first among equal counts
    Lfu,
}

impl EvictionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "LRU",
            EvictionPolicy::Lfu => "LFU",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = ParseEvictionPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "lfu" => Ok(EvictionPolicy::Lfu),
            _ => Err(ParseEvictionPolicyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("LRU".parse::<EvictionPolicy>().unwrap(), EvictionPolicy::Lru);
        assert_eq!("lfu".parse::<EvictionPolicy>().unwrap(), EvictionPolicy::Lfu);
        assert_eq!(" Lfu ".parse::<EvictionPolicy>().unwrap(), EvictionPolicy::Lfu);
    }

    #[test]
    fn test_parse_rejects_unknown_tags() {
        let err = "fifo".parse::<EvictionPolicy>().unwrap_err();
        assert!(err.to_string().contains("fifo"));
        assert!("".parse::<EvictionPolicy>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for policy in [EvictionPolicy::Lru, EvictionPolicy::Lfu] {
            assert_eq!(policy.to_string().parse::<EvictionPolicy>().unwrap(), policy);
        }
    }
}
