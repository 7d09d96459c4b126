use serde::{Deserialize, Serialize};

use crate::core::config::CombatConfig;
use crate::core::constants::*;
use crate::dungeon::GridPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub health: u32,
    pub max_health: u32,
    pub damage: u32,
    pub defense: u32,
}

impl CombatStats {
    pub fn new(max_health: u32, damage: u32, defense: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            damage,
            defense,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self::new(BASE_PLAYER_HP, BASE_PLAYER_DAMAGE, BASE_PLAYER_DEFENSE)
    }
}

impl From<&CombatConfig> for CombatStats {
    fn from(config: &CombatConfig) -> Self {
        Self::new(
            config.player_health,
            config.player_damage,
            config.player_defense,
        )
    }
}

/// Partial stat override for `CombatSystem::initialize_player`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsUpdate {
    pub health: Option<u32>,
    pub max_health: Option<u32>,
    pub damage: Option<u32>,
    pub defense: Option<u32>,
}

/// The player or an enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEntity {
    pub id: String,
    pub name: String,
    pub stats: CombatStats,
    pub grid_position: GridPos,
}

impl CombatEntity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        stats: CombatStats,
        grid_position: GridPos,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stats,
            grid_position,
        }
    }

    pub fn player() -> Self {
        Self::new("player", "Wizard", CombatStats::default(), GridPos::default())
    }

    pub fn distance_to(&self, pos: GridPos) -> i32 {
        self.grid_position.manhattan(pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboState {
    pub count: u32,
    pub multiplier: f64,
    /// Milliseconds timestamp of the last cast (0 before any cast)
    pub last_cast_time: i64,
    pub time_window_ms: i64,
}

impl ComboState {
    pub fn new(time_window_ms: i64) -> Self {
        Self {
            count: 0,
            multiplier: 1.0,
            last_cast_time: 0,
            time_window_ms,
        }
    }

    /// Step function of the combo count
    pub fn multiplier_for(count: u32) -> f64 {
        match count {
            0..=1 => 1.0,
            2..=3 => 1.5,
            4..=6 => 2.0,
            7..=10 => 2.5,
            _ => 3.0,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now - self.last_cast_time > self.time_window_ms
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.multiplier = 1.0;
    }

    pub fn record_cast(&mut self, now: i64) {
        self.count += 1;
        self.last_cast_time = now;
        self.multiplier = Self::multiplier_for(self.count);
    }
}

impl Default for ComboState {
    fn default() -> Self {
        Self::new(COMBO_WINDOW_MS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Neutral,
}

/// Transcription result handed in by the speech collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechResult {
    /// 0.0..=1.0, defaults to 1.0
    pub pronunciation_score: Option<f64>,
    pub is_critical_hit: Option<bool>,
    /// 0.0..=1.0, defaults to 0.0
    pub spelling_penalty: Option<f64>,
}

impl SpeechResult {
    pub fn new(pronunciation_score: f64, is_critical_hit: bool, spelling_penalty: f64) -> Self {
        Self {
            pronunciation_score: Some(pronunciation_score),
            is_critical_hit: Some(is_critical_hit),
            spelling_penalty: Some(spelling_penalty),
        }
    }
}

/// One casting attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCast {
    pub word: String,
    pub damage: u32,
    pub element: Element,
    pub timestamp: i64,
    pub is_critical_hit: bool,
    pub pronunciation_score: f64,
    pub spelling_penalty: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub gold_words: u32,
    pub experience: u32,
}

impl Reward {
    /// Reward for defeating an enemy with the given max health
    pub fn for_enemy(max_health: u32) -> Self {
        let gold_words =
            (GOLD_REWARD_BASE * (max_health as f64 / GOLD_REWARD_HEALTH_DIVISOR)).floor() as u32;
        Self {
            gold_words,
            experience: max_health / XP_REWARD_HEALTH_DIVISOR,
        }
    }
}

/// Bonus paid out when combat ends with a live combo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboBonus {
    pub max_combo: u32,
    pub bonus_reward: u32,
}

impl ComboBonus {
    pub fn for_combo(count: u32) -> Option<Self> {
        (count > 0).then(|| Self {
            max_combo: count,
            bonus_reward: count * COMBO_BONUS_PER_CAST,
        })
    }
}
