//! Simulation runner.
//!
//! Each run descends the configured floors with a seeded RNG: generate the
//! floor, plan its spawns, then clear guarded rooms in dungeon order by
//! reading words through the real `CombatSystem`. Statistics are tallied
//! from the combat events, not recomputed.

use std::collections::{BTreeMap, HashMap};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::config::SimConfig;
use super::report::SimReport;
use crate::combat::{CombatEvent, CombatSystem};
use crate::dungeon::{DoorLocks, Dungeon, DungeonGenerator};
use crate::economy::Wallet;
use crate::progression::{plan_spawns, roll_drops, EnemySpawn};

/// Everything measured on one floor of one run
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct FloorStats {
    pub floor: u32,
    pub rooms: usize,
    pub doors: usize,
    pub generation_attempts: u32,
    pub fully_connected: bool,
    pub boss_distance: Option<i32>,
    pub enemies: usize,
    pub kills: u32,
    pub boss_killed: bool,
    pub casts: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub max_combo: u32,
    pub combo_bonus: u32,
    pub gold_earned: u32,
    pub experience: u32,
    pub consumable_drops: u32,
    pub rune_drops: u32,
    pub rooms_abandoned: u32,
    pub player_died: bool,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct RunStats {
    pub floors: Vec<FloorStats>,
    pub deepest_floor: u32,
    pub died: bool,
    pub final_gold: u32,
    pub total_experience: u32,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, &mut rng);
        if config.verbosity >= 2 {
            info!(
                run = run_idx + 1,
                deepest_floor = run.deepest_floor,
                died = run.died,
                gold = run.final_gold,
                xp = run.total_experience,
                "run finished"
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs)
}

pub fn simulate_single_run(config: &SimConfig, rng: &mut ChaCha8Rng) -> RunStats {
    let generator = DungeonGenerator::new(config.game.rooms.clone());
    let mut combat =
        CombatSystem::with_config_and_rng(&config.game.combat, ChaCha8Rng::seed_from_u64(rng.gen()));
    let mut wallet = Wallet::new();
    let mut run = RunStats::default();

    for floor in config.floors() {
        let dungeon = generator.generate(floor, rng);
        let mut stats = FloorStats {
            floor,
            rooms: dungeon.rooms.len(),
            doors: dungeon.doors.len(),
            generation_attempts: dungeon.generation_attempts,
            fully_connected: dungeon.fully_connected,
            boss_distance: dungeon.boss_distance(),
            ..Default::default()
        };

        if config.simulate_combat {
            combat.clear_all();
            let max_health = combat.player_stats().max_health;
            combat.heal_player(max_health);
            combat.drain_events();

            fight_floor(config, &dungeon, &mut combat, &mut wallet, &mut stats, rng);
        }

        run.deepest_floor = floor;
        let died = stats.player_died;
        run.floors.push(stats);
        if died {
            run.died = true;
            break;
        }
    }

    run.final_gold = wallet.balance();
    run.total_experience = run.floors.iter().map(|f| f.experience).sum();
    run
}

fn fight_floor(
    config: &SimConfig,
    dungeon: &Dungeon,
    combat: &mut CombatSystem<ChaCha8Rng>,
    wallet: &mut Wallet,
    stats: &mut FloorStats,
    rng: &mut ChaCha8Rng,
) {
    let spawns = plan_spawns(dungeon, rng);
    stats.enemies = spawns.len();

    let bosses: HashMap<String, bool> = spawns
        .iter()
        .map(|s| (s.id.to_string(), s.is_boss))
        .collect();

    let mut by_room: BTreeMap<usize, Vec<&EnemySpawn>> = BTreeMap::new();
    for spawn in &spawns {
        by_room.entry(spawn.room_index).or_default().push(spawn);
    }

    let mut locks = DoorLocks::new(&dungeon.doors);
    let mut now: i64 = 0;
    let mut word_idx = 0usize;

    for (room_index, room_spawns) in by_room {
        let Some(room) = dungeon.rooms.get(room_index) else {
            continue;
        };
        combat.update_player_position(room.center());
        for spawn in &room_spawns {
            combat.add_enemy(spawn.to_combat_entity());
        }
        locks.enter_room(room_index, combat.enemy_count());

        let mut casts = 0;
        while combat.enemy_count() > 0 && casts < config.max_casts_per_room {
            let word = config
                .word_list
                .get(word_idx % config.word_list.len().max(1))
                .map(String::as_str)
                .unwrap_or("cat");
            word_idx += 1;
            now += config.cast_interval_ms;
            casts += 1;
            stats.casts += 1;

            combat.cast_spell_at(word, None, None, now);
            tally_events(combat, wallet, stats, &bosses, dungeon.floor, rng);

            if stats.player_died {
                return;
            }
        }

        if combat.enemy_count() > 0 {
            debug!(floor = dungeon.floor, room = room_index, "room abandoned");
            stats.rooms_abandoned += 1;
            combat.clear_all();
        }
        locks.clear_room(room_index);
    }
}

/// Folds queued combat events into the floor stats.
///
/// Counter-attacks are applied to the player here, which queues further
/// events; the loop drains until the queue is quiet.
fn tally_events(
    combat: &mut CombatSystem<ChaCha8Rng>,
    wallet: &mut Wallet,
    stats: &mut FloorStats,
    bosses: &HashMap<String, bool>,
    floor: u32,
    rng: &mut ChaCha8Rng,
) {
    loop {
        let events = combat.drain_events();
        if events.is_empty() {
            return;
        }
        for event in events {
            match event {
                CombatEvent::SpellCast { combo, .. } => {
                    stats.max_combo = stats.max_combo.max(combo);
                }
                CombatEvent::DamageDealt { applied, .. } => {
                    stats.damage_dealt += applied as u64;
                }
                CombatEvent::EnemyDefeated {
                    enemy_id,
                    enemy_name,
                    reward,
                } => {
                    let is_boss = bosses.get(&enemy_id).copied().unwrap_or(false);
                    stats.kills += 1;
                    stats.boss_killed |= is_boss;
                    stats.experience += reward.experience;
                    stats.gold_earned += reward.gold_words;
                    wallet.earn_reward(&reward, &enemy_name);

                    let drops = roll_drops(floor, is_boss, rng);
                    stats.consumable_drops += drops.consumable as u32;
                    stats.rune_drops += drops.rune as u32;
                }
                CombatEvent::CombatEnded { bonus: Some(bonus) } => {
                    stats.combo_bonus += bonus.bonus_reward;
                    wallet.earn(bonus.bonus_reward, "combo bonus");
                }
                CombatEvent::EnemyCounterAttack { damage, .. } => {
                    stats.damage_taken += damage as u64;
                    combat.take_damage(damage);
                }
                CombatEvent::PlayerDefeated => {
                    stats.player_died = true;
                }
                _ => {}
            }
        }
    }
}
