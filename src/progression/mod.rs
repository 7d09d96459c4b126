//! Floor-to-difficulty mapping.
//!
//! A floor is a dungeon level; a reading level is the word difficulty tier
//! (1..=20, Kindergarten upward). Everything here is a pure function of the
//! floor, with randomness injected where sampling happens.

pub mod spawning;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::constants::*;
pub use spawning::{plan_spawns, EnemyKind, EnemySpawn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelWeight {
    pub level: u32,
    pub weight: f64,
}

/// Inclusive enemy-count band for one room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyCountRange {
    pub min: u32,
    pub max: u32,
}

impl EnemyCountRange {
    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        rng.gen_range(self.min..=self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossConfig {
    pub hp_multiplier: f64,
    pub damage_multiplier: f64,
    pub word_level_boost: u32,
}

/// Outcome of one enemy's loot roll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRoll {
    pub consumable: bool,
    pub rune: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionEntry {
    pub floor: u32,
    pub level: u32,
    pub is_transition: bool,
}

/// Primary reading level for a floor: `clamp(floor, 1, 20)`
pub fn word_level_for_floor(floor: u32) -> u32 {
    floor.clamp(1, MAX_READING_LEVEL)
}

/// Floors never blend two reading levels yet
pub fn is_transition_level(_floor: u32) -> bool {
    false
}

/// Falloff distribution of enemy reading levels around the floor.
///
/// Same level 0.6, one above 0.25, one below 0.3, two below 0.1, three or
/// more below 0.02. Floor 1 (and 0) is always level 1.
pub fn enemy_level_weights(floor: u32) -> Vec<LevelWeight> {
    if floor <= 1 {
        return vec![LevelWeight {
            level: 1,
            weight: 1.0,
        }];
    }

    let current = floor.min(MAX_READING_LEVEL);
    let top = (current + 1).min(MAX_READING_LEVEL);

    (1..=top)
        .filter_map(|level| {
            let weight = match floor as i64 - level as i64 {
                0 => 0.6,
                -1 => 0.25,
                1 => 0.3,
                2 => 0.1,
                d if d >= 3 => 0.02,
                _ => 0.0,
            };
            (weight > 0.0).then_some(LevelWeight { level, weight })
        })
        .collect()
}

/// Samples `enemy_level_weights` by cumulative subtraction
pub fn random_enemy_level(floor: u32, rng: &mut impl Rng) -> u32 {
    let weights = enemy_level_weights(floor);
    let total: f64 = weights.iter().map(|w| w.weight).sum();

    let mut roll = rng.gen::<f64>() * total;
    for entry in &weights {
        roll -= entry.weight;
        if roll <= 0.0 {
            return entry.level;
        }
    }
    word_level_for_floor(floor)
}

pub fn enemy_count_for_floor(floor: u32) -> EnemyCountRange {
    let (min, max) = match floor {
        0..=2 => (1, 2),
        3..=4 => (2, 3),
        5..=10 => (2, 4),
        _ => (3, 5),
    };
    EnemyCountRange { min, max }
}

/// Enemy kinds unlocked by this floor, weakest first
pub fn enemy_type_pool(floor: u32) -> Vec<EnemyKind> {
    use EnemyKind::*;
    match floor {
        0..=2 => vec![Bat, Slime],
        3..=4 => vec![Bat, Slime, Goblin],
        5..=6 => vec![Bat, Slime, Goblin, Skeleton],
        _ => vec![Bat, Slime, Goblin, Skeleton, Orc],
    }
}

/// Boss scaling; the same on every floor
pub fn boss_config(_floor: u32) -> BossConfig {
    BossConfig {
        hp_multiplier: BOSS_HP_MULTIPLIER,
        damage_multiplier: BOSS_DAMAGE_MULTIPLIER,
        word_level_boost: BOSS_WORD_LEVEL_BOOST,
    }
}

/// One above a sampled enemy level, never below the floor's own level
pub fn boss_level(floor: u32, rng: &mut impl Rng) -> u32 {
    let normal = random_enemy_level(floor, rng);
    (normal + BOSS_WORD_LEVEL_BOOST).max(floor.min(MAX_READING_LEVEL))
}

/// Early grades get enemies frozen while a word is being read
pub fn should_pause_enemies_during_casting(floor: u32) -> bool {
    floor <= CASTING_PAUSE_MAX_FLOOR
}

pub fn consumable_drop_chance(floor: u32, is_boss: bool) -> f64 {
    if is_boss {
        return 1.0;
    }
    CONSUMABLE_DROP_BASE + floor as f64 * CONSUMABLE_DROP_PER_FLOOR
}

pub fn rune_drop_chance(floor: u32, is_boss: bool) -> f64 {
    let (base, cap) = if is_boss {
        (RUNE_DROP_BOSS_BASE, RUNE_DROP_BOSS_CAP)
    } else {
        (RUNE_DROP_BASE, RUNE_DROP_CAP)
    };
    (base + floor as f64 * RUNE_DROP_PER_FLOOR).min(cap)
}

/// Independent consumable and rune rolls for one defeated enemy
pub fn roll_drops(floor: u32, is_boss: bool, rng: &mut impl Rng) -> DropRoll {
    DropRoll {
        consumable: rng.gen::<f64>() < consumable_drop_chance(floor, is_boss),
        rune: rng.gen::<f64>() < rune_drop_chance(floor, is_boss),
    }
}

const GRADE_NAMES: [&str; 11] = [
    "Kindergarten",
    "1st Grade",
    "2nd Grade",
    "3rd Grade",
    "4th Grade",
    "5th Grade",
    "6th Grade",
    "7th Grade",
    "8th Grade",
    "9th Grade",
    "10th Grade",
];

pub fn level_name(floor: u32) -> String {
    let level = word_level_for_floor(floor) as usize;
    match GRADE_NAMES.get(level - 1) {
        Some(name) => name.to_string(),
        None => format!("{}th Grade", level - 1),
    }
}

pub fn floor_description(floor: u32) -> String {
    let flavor = match word_level_for_floor(floor) {
        0..=2 => "The dungeon begins...",
        3..=5 => "Darkness deepens...",
        6..=10 => "Ancient halls await...",
        11..=15 => "Peril grows...",
        _ => "The abyss beckons...",
    };
    format!("{} (Floor {})", flavor, floor)
}

/// Reading level for every floor 1..=20
pub fn progression_table() -> Vec<ProgressionEntry> {
    (1..=MAX_FLOOR)
        .map(|floor| ProgressionEntry {
            floor,
            level: word_level_for_floor(floor),
            is_transition: is_transition_level(floor),
        })
        .collect()
}
