//! Error types for the fallible edges of the crate.
//!
//! Dungeon generation, combat and progression never fail; only loading
//! configuration and touching persistent storage can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("could not determine a data directory")]
    NoDataDirectory,
}

#[derive(Debug, Error)]
pub enum EconomyError {
    #[error("not enough gold words: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}
