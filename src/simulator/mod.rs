//! Monte Carlo floor simulator.
//!
//! Runs many seeded descents to check:
//! - Layout quality per floor (connectivity, fallbacks, boss distance)
//! - How many reads it takes to clear rooms at each floor
//! - Gold, experience and drop pacing
//!
//! The simulator drives the real `DungeonGenerator`, spawn planner and
//! `CombatSystem`, so its numbers match gameplay behavior.

mod config;
mod report;
mod runner;

pub use config::{SimConfig, DEFAULT_WORD_LIST};
pub use report::{FloorSummary, SimReport};
pub use runner::{run_simulation, simulate_single_run, FloorStats, RunStats};
