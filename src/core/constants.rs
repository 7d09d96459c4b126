// Tile grid
pub const TILE_FLOOR: u8 = 0;
pub const TILE_WALL: u8 = 1;
pub const TILE_DOOR: u8 = 2;
pub const BORDER_THICKNESS: i32 = 3;

// Grid sizing: width = 30 + floor*2, height = 24 + floor*1.5
pub const GRID_BASE_WIDTH: i32 = 30;
pub const GRID_WIDTH_PER_FLOOR: f64 = 2.0;
pub const GRID_BASE_HEIGHT: i32 = 24;
pub const GRID_HEIGHT_PER_FLOOR: f64 = 1.5;
/// Grids stop growing past this depth
pub const GRID_MAX_SIZING_FLOOR: u32 = 1_000;

// Room generation
pub const MIN_ROOM_SIZE: i32 = 5;
pub const MAX_ROOM_SIZE: i32 = 9;
pub const BASE_ROOMS: u32 = 8;
pub const ROOMS_PER_FLOOR: f64 = 2.5;
pub const MAX_ROOMS: u32 = 30;
pub const ROOM_PLACEMENT_ATTEMPTS: u32 = 100;
pub const ROOM_OVERLAP_BUFFER: i32 = 2;
pub const MAX_GENERATION_ATTEMPTS: u32 = 10;

// Room type draw for non-entrance rooms (cumulative thresholds)
pub const ROOM_TYPE_COMBAT_THRESHOLD: f64 = 0.80;
pub const ROOM_TYPE_TREASURE_THRESHOLD: f64 = 0.90;

// Boss placement: probability 0.9^i at sorted position i
pub const BOSS_PLACEMENT_DECAY: f64 = 0.9;
pub const BOSS_NEAR_TIE_DISTANCE: i32 = 1;

// Player defaults
pub const BASE_PLAYER_HP: u32 = 100;
pub const BASE_PLAYER_DAMAGE: u32 = 10;
pub const BASE_PLAYER_DEFENSE: u32 = 5;

// Combo
pub const COMBO_WINDOW_MS: i64 = 3000;
pub const COMBO_BONUS_PER_CAST: u32 = 5;

// Damage formula
pub const COMPLEXITY_DAMAGE_FACTOR: f64 = 0.5;
pub const CRITICAL_HIT_MULTIPLIER: f64 = 2.0;
pub const PRONUNCIATION_BASE: f64 = 0.5;
pub const PRONUNCIATION_SCALE: f64 = 1.0;
pub const MIN_SPELLING_MULTIPLIER: f64 = 0.3;

// Word complexity bonuses
pub const BLEND_BONUS: f64 = 0.5;
pub const DIGRAPH_BONUS: f64 = 0.5;
pub const SILENT_LETTER_BONUS: f64 = 1.0;
pub const COMPOUND_BONUS: f64 = 1.5;

// Enemy defeat rewards
pub const GOLD_REWARD_BASE: f64 = 10.0;
pub const GOLD_REWARD_HEALTH_DIVISOR: f64 = 50.0;
pub const XP_REWARD_HEALTH_DIVISOR: u32 = 10;

// Counter-attacks (Manhattan tiles)
pub const COUNTER_ATTACK_MELEE_RANGE: i32 = 3;
pub const COUNTER_ATTACK_RANGED_RANGE: i32 = 6;
pub const COUNTER_ATTACK_RANGED_CHANCE: f64 = 0.5;
pub const COUNTER_ATTACK_MIN_FACTOR: f64 = 0.5;
pub const COUNTER_ATTACK_FALLOFF_TILES: f64 = 10.0;

// Word defense
pub const DEFENSE_FAILURE_CHANCE: f64 = 0.3;

// Progression
pub const MAX_READING_LEVEL: u32 = 20;
pub const MAX_FLOOR: u32 = 20;
pub const ENEMY_LEVEL_STAT_STEP: f64 = 0.2;
pub const DEFAULT_AGGRO_RANGE: i32 = 5;
pub const CASTING_PAUSE_MAX_FLOOR: u32 = 4;

// Boss scaling
pub const BOSS_HP_MULTIPLIER: f64 = 4.5;
pub const BOSS_DAMAGE_MULTIPLIER: f64 = 3.5;
pub const BOSS_WORD_LEVEL_BOOST: u32 = 1;

// Drops
pub const CONSUMABLE_DROP_BASE: f64 = 0.15;
pub const CONSUMABLE_DROP_PER_FLOOR: f64 = 0.01;
pub const RUNE_DROP_BASE: f64 = 0.03;
pub const RUNE_DROP_BOSS_BASE: f64 = 0.15;
pub const RUNE_DROP_PER_FLOOR: f64 = 0.02;
pub const RUNE_DROP_CAP: f64 = 0.10;
pub const RUNE_DROP_BOSS_CAP: f64 = 0.30;

// Economy
pub const MAX_TRANSACTION_HISTORY: usize = 50;
pub const CURRENCY_STORAGE_KEY: &str = "wordcaster_currency";
