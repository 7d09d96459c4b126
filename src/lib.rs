//! Wordcaster - dungeon generation and spoken-word combat core for a
//! reading roguelike.
//!
//! This module exposes the game logic for the binaries, the simulator and
//! external front-ends.

pub mod build_info;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod economy;
pub mod error;
pub mod logging;
pub mod progression;
pub mod simulator;

pub use combat::{CombatEvent, CombatSystem};
pub use dungeon::{Dungeon, DungeonGenerator};
pub use error::{ConfigError, EconomyError, StorageError};
