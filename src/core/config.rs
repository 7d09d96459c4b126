//! Tunable game configuration.
//!
//! Defaults mirror `core::constants`; a JSON file can override any subset
//! of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::constants::*;
use crate::error::ConfigError;

/// Room generation parameters consumed by `DungeonGenerator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Smallest room edge (inclusive)
    pub min_room_size: i32,
    /// Largest room edge (exclusive)
    pub max_room_size: i32,
    pub base_rooms: u32,
    pub rooms_per_floor: f64,
    pub max_rooms: u32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            min_room_size: MIN_ROOM_SIZE,
            max_room_size: MAX_ROOM_SIZE,
            base_rooms: BASE_ROOMS,
            rooms_per_floor: ROOMS_PER_FLOOR,
            max_rooms: MAX_ROOMS,
        }
    }
}

/// Starting player stats and combo timing consumed by `CombatSystem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub player_health: u32,
    pub player_damage: u32,
    pub player_defense: u32,
    pub combo_window_ms: i64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            player_health: BASE_PLAYER_HP,
            player_damage: BASE_PLAYER_DAMAGE,
            player_defense: BASE_PLAYER_DEFENSE,
            combo_window_ms: COMBO_WINDOW_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rooms: RoomConfig,
    pub combat: CombatConfig,
}

impl GameConfig {
    /// Loads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rooms = &self.rooms;
        if rooms.min_room_size <= 0 {
            return Err(ConfigError::Invalid(
                "min_room_size must be positive".to_string(),
            ));
        }
        if rooms.min_room_size >= rooms.max_room_size {
            return Err(ConfigError::Invalid(format!(
                "min_room_size ({}) must be below max_room_size ({})",
                rooms.min_room_size, rooms.max_room_size
            )));
        }
        if rooms.max_rooms == 0 {
            return Err(ConfigError::Invalid("max_rooms must be positive".to_string()));
        }
        if self.combat.combo_window_ms <= 0 {
            return Err(ConfigError::Invalid(
                "combo_window_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = GameConfig::default();
        assert_eq!(config.rooms.min_room_size, 5);
        assert_eq!(config.rooms.max_room_size, 9);
        assert_eq!(config.rooms.base_rooms, 8);
        assert_eq!(config.rooms.rooms_per_floor, 2.5);
        assert_eq!(config.rooms.max_rooms, 30);
        assert_eq!(config.combat.player_damage, 10);
        assert_eq!(config.combat.combo_window_ms, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "rooms": { "max_rooms": 12 } }"#).unwrap();
        assert_eq!(config.rooms.max_rooms, 12);
        assert_eq!(config.rooms.base_rooms, 8);
        assert_eq!(config.combat, CombatConfig::default());
    }

    #[test]
    fn test_rejects_inverted_room_sizes() {
        let result = GameConfig::from_json(
            r#"{ "rooms": { "min_room_size": 9, "max_room_size": 5 } }"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_combo_window() {
        let result = GameConfig::from_json(r#"{ "combat": { "combo_window_ms": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = GameConfig::from_json("{ rooms: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let mut config = GameConfig::default();
        config.combat.player_damage = 14;
        let parsed = GameConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(parsed, config);
    }
}
