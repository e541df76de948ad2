//! TierCache Core
//!
//! This crate provides the multilevel in-memory cache: fixed-capacity levels
//! with LRU or LFU eviction, chained so that a hit in a slower level is
//! promoted into every faster one.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{
    CacheChain, CacheLevel, ChainStats, EntrySnapshot, EvictionPolicy, LevelSnapshot, LevelStats,
    ParseEvictionPolicyError,
};
pub use config::LevelConfig;
pub use error::CacheError;
