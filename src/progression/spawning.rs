//! Enemy kinds and per-floor spawn plans.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{boss_config, boss_level, enemy_count_for_floor, enemy_type_pool, random_enemy_level};
use crate::combat::{CombatEntity, CombatStats};
use crate::core::constants::{DEFAULT_AGGRO_RANGE, ENEMY_LEVEL_STAT_STEP};
use crate::dungeon::{Dungeon, GridPos, Room, RoomType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Bat,
    Slime,
    Goblin,
    Skeleton,
    Orc,
    Demon,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Bat,
        EnemyKind::Slime,
        EnemyKind::Goblin,
        EnemyKind::Skeleton,
        EnemyKind::Orc,
        EnemyKind::Demon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Bat => "Bat",
            EnemyKind::Slime => "Slime",
            EnemyKind::Goblin => "Goblin",
            EnemyKind::Skeleton => "Skeleton",
            EnemyKind::Orc => "Orc",
            EnemyKind::Demon => "Demon",
        }
    }

    /// Level-1 stats
    pub fn base_stats(&self) -> CombatStats {
        match self {
            EnemyKind::Bat => CombatStats::new(20, 4, 1),
            EnemyKind::Slime => CombatStats::new(50, 3, 5),
            EnemyKind::Goblin => CombatStats::new(30, 5, 2),
            EnemyKind::Skeleton => CombatStats::new(40, 8, 3),
            EnemyKind::Orc => CombatStats::new(60, 12, 5),
            EnemyKind::Demon => CombatStats::new(100, 15, 8),
        }
    }
}

/// `1 + (level - 1) * 0.2`
pub fn level_multiplier(level: u32) -> f64 {
    1.0 + level.saturating_sub(1) as f64 * ENEMY_LEVEL_STAT_STEP
}

/// Base stats scaled by `level_multiplier`, floored (integer fifths)
pub fn enemy_stats(kind: EnemyKind, level: u32) -> CombatStats {
    let base = kind.base_stats();
    let fifths = 4 + level.max(1);
    let scale = |v: u32| v * fifths / 5;
    CombatStats::new(scale(base.max_health), scale(base.damage), scale(base.defense))
}

/// Level-scaled stats with the boss health and damage multipliers on top
pub fn boss_stats(kind: EnemyKind, level: u32, floor: u32) -> CombatStats {
    let config = boss_config(floor);
    let scaled = enemy_stats(kind, level);
    CombatStats::new(
        (scaled.max_health as f64 * config.hp_multiplier).floor() as u32,
        (scaled.damage as f64 * config.damage_multiplier).floor() as u32,
        scaled.defense,
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub id: Uuid,
    pub kind: EnemyKind,
    pub level: u32,
    pub room_index: usize,
    pub position: GridPos,
    pub stats: CombatStats,
    pub is_boss: bool,
    pub aggro_range: i32,
}

impl EnemySpawn {
    pub fn display_name(&self) -> String {
        if self.is_boss {
            format!("{} Boss", self.kind.name())
        } else {
            self.kind.name().to_string()
        }
    }

    pub fn to_combat_entity(&self) -> CombatEntity {
        CombatEntity::new(
            self.id.to_string(),
            self.display_name(),
            self.stats,
            self.position,
        )
    }
}

fn spawn_id(rng: &mut impl Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Walkable tiles strictly inside the room's walls
fn interior_tiles(dungeon: &Dungeon, room: &Room) -> Vec<GridPos> {
    let mut tiles = Vec::new();
    for y in room.y + 1..room.y + room.height - 1 {
        for x in room.x + 1..room.x + room.width - 1 {
            if dungeon.is_walkable(x, y) {
                tiles.push(GridPos::new(x, y));
            }
        }
    }
    tiles
}

/// Enemies for every guarded room of a floor.
///
/// Combat rooms get an `enemy_count_for_floor` draw of pool kinds at
/// sampled levels on distinct interior tiles. The boss room gets one boss
/// at its center.
pub fn plan_spawns(dungeon: &Dungeon, rng: &mut impl Rng) -> Vec<EnemySpawn> {
    let floor = dungeon.floor;
    let pool = enemy_type_pool(floor);
    let mut spawns = Vec::new();

    for (room_index, room) in dungeon.rooms.iter().enumerate() {
        match room.room_type {
            RoomType::Combat => {
                let count = enemy_count_for_floor(floor).roll(rng) as usize;
                let tiles = interior_tiles(dungeon, room);
                let picked: Vec<GridPos> = tiles.choose_multiple(rng, count).copied().collect();

                for position in picked {
                    let Some(&kind) = pool.choose(rng) else {
                        continue;
                    };
                    let level = random_enemy_level(floor, rng);
                    spawns.push(EnemySpawn {
                        id: spawn_id(rng),
                        kind,
                        level,
                        room_index,
                        position,
                        stats: enemy_stats(kind, level),
                        is_boss: false,
                        aggro_range: DEFAULT_AGGRO_RANGE,
                    });
                }
            }
            RoomType::Boss => {
                let Some(&kind) = pool.choose(rng) else {
                    continue;
                };
                let level = boss_level(floor, rng);
                spawns.push(EnemySpawn {
                    id: spawn_id(rng),
                    kind,
                    level,
                    room_index,
                    position: room.center(),
                    stats: boss_stats(kind, level, floor),
                    is_boss: true,
                    aggro_range: DEFAULT_AGGRO_RANGE,
                });
            }
            _ => {}
        }
    }

    debug!(floor, enemies = spawns.len(), "spawns planned");
    spawns
}
