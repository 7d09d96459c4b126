//! Simulation configuration.

use crate::core::config::GameConfig;
use crate::core::constants::MAX_FLOOR;

/// Words the scripted player reads, cycled in order
pub const DEFAULT_WORD_LIST: [&str; 12] = [
    "cat", "frog", "ship", "knight", "thumb", "garden", "sunshine", "storm", "whale", "planet",
    "rainbow", "butterfly",
];

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated descents
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// First and last floor of each descent, inclusive
    pub start_floor: u32,
    pub end_floor: u32,

    /// Fight each floor through `CombatSystem`, or only generate it
    pub simulate_combat: bool,

    pub word_list: Vec<String>,

    /// Simulated reading time between casts
    pub cast_interval_ms: i64,

    /// Casts allowed per room before the fight is abandoned
    pub max_casts_per_room: u32,

    /// Room sizing and player stats
    pub game: GameConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            start_floor: 1,
            end_floor: MAX_FLOOR,
            simulate_combat: true,
            word_list: DEFAULT_WORD_LIST.iter().map(|w| w.to_string()).collect(),
            cast_interval_ms: 1500,
            max_casts_per_room: 200,
            game: GameConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Generation-only sweep, for layout quality
    pub fn generation_check(num_runs: u32) -> Self {
        Self {
            num_runs,
            simulate_combat: false,
            ..Default::default()
        }
    }

    /// Short combat run over the early floors
    pub fn quick() -> Self {
        Self {
            num_runs: 20,
            end_floor: 5,
            ..Default::default()
        }
    }

    pub fn floors(&self) -> std::ops::RangeInclusive<u32> {
        self.start_floor.max(1)..=self.end_floor
    }
}
