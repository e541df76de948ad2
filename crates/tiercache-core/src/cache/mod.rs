//! Cache levels, eviction policies and the level chain

mod chain;
mod level;
mod policy;
mod stats;
mod tracker;

pub use chain::CacheChain;
pub use level::{CacheLevel, EntrySnapshot, LevelSnapshot};
pub use policy::{EvictionPolicy, ParseEvictionPolicyError};
pub use stats::{ChainStats, LevelStats};
pub use tracker::{LfuTracker, LruTracker, ReplacementTracker, Tracker};
