//! Core error types

use thiserror::Error;

use crate::cache::ParseEvictionPolicyError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Level index {index} out of range (chain has {len} levels)")]
    LevelIndexOutOfRange { index: usize, len: usize },
}

impl From<ParseEvictionPolicyError> for CacheError {
    fn from(err: ParseEvictionPolicyError) -> Self {
        CacheError::InvalidConfiguration(err.to_string())
    }
}
