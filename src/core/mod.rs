//! Shared constants and configuration.

pub mod config;
pub mod constants;

pub use config::{CombatConfig, GameConfig, RoomConfig};
