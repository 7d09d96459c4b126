//! The combat state machine.
//!
//! `CombatSystem` owns the player, the set of engaged enemies, the combo
//! and the spell history. It never performs I/O: callers feed it words,
//! speech results and timestamps, and read back `CombatEvent`s either
//! through registered observers or by draining the event queue.

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::events::{CombatEvent, CombatObserver};
use super::types::*;
use super::words::{word_complexity, word_element};
use crate::core::config::CombatConfig;
use crate::core::constants::*;
use crate::dungeon::GridPos;

/// Spell damage before any enemy mitigation.
///
/// `floor(base * (1 + complexity/2) * combo [* 2 crit] [* (0.5 + score)]
/// [* max(0.3, 1 - penalty)])`, the bracketed terms applying only when a
/// speech result is present.
pub fn calculate_spell_damage(
    base_damage: u32,
    complexity: f64,
    combo_multiplier: f64,
    speech: Option<&SpeechResult>,
) -> u32 {
    let complexity_multiplier = 1.0 + complexity * COMPLEXITY_DAMAGE_FACTOR;
    let mut total_multiplier = complexity_multiplier * combo_multiplier;

    if let Some(speech) = speech {
        if speech.is_critical_hit.unwrap_or(false) {
            total_multiplier *= CRITICAL_HIT_MULTIPLIER;
        }
        let score = speech.pronunciation_score.unwrap_or(1.0);
        total_multiplier *= PRONUNCIATION_BASE + score * PRONUNCIATION_SCALE;
        let penalty = speech.spelling_penalty.unwrap_or(0.0);
        total_multiplier *= MIN_SPELLING_MULTIPLIER.max(1.0 - penalty);
    }

    (base_damage as f64 * total_multiplier).floor() as u32
}

pub struct CombatSystem<R = StdRng> {
    player: CombatEntity,
    enemies: BTreeMap<String, CombatEntity>,
    combo: ComboState,
    combo_window_ms: i64,
    spell_history: Vec<SpellCast>,
    in_combat: bool,
    complexity_cache: HashMap<String, f64>,
    events: Vec<CombatEvent>,
    observers: Vec<Box<dyn CombatObserver>>,
    rng: R,
}

impl CombatSystem<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self::with_config_and_rng(config, StdRng::from_entropy())
    }
}

impl Default for CombatSystem<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> CombatSystem<R> {
    pub fn with_rng(rng: R) -> Self {
        Self::with_config_and_rng(&CombatConfig::default(), rng)
    }

    pub fn with_config_and_rng(config: &CombatConfig, rng: R) -> Self {
        let mut player = CombatEntity::player();
        player.stats = CombatStats::from(config);
        Self {
            player,
            enemies: BTreeMap::new(),
            combo: ComboState::new(config.combo_window_ms),
            combo_window_ms: config.combo_window_ms,
            spell_history: Vec::new(),
            in_combat: false,
            complexity_cache: HashMap::new(),
            events: Vec::new(),
            observers: Vec::new(),
            rng,
        }
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn subscribe(&mut self, observer: impl CombatObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Takes every queued event, oldest first
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[CombatEvent] {
        &self.events
    }

    fn emit(&mut self, event: CombatEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
        self.events.push(event);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn player(&self) -> &CombatEntity {
        &self.player
    }

    pub fn player_stats(&self) -> CombatStats {
        self.player.stats
    }

    pub fn combo_state(&self) -> ComboState {
        self.combo
    }

    pub fn enemies(&self) -> impl Iterator<Item = &CombatEntity> {
        self.enemies.values()
    }

    pub fn enemy(&self, id: &str) -> Option<&CombatEntity> {
        self.enemies.get(id)
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_in_combat(&self) -> bool {
        self.in_combat
    }

    pub fn spell_history(&self) -> &[SpellCast] {
        &self.spell_history
    }

    /// Complexity computed for a word cast since the last `clear_all`
    pub fn complexity_bonus(&self, word: &str) -> Option<f64> {
        self.complexity_cache.get(word).copied()
    }

    // ------------------------------------------------------------------
    // Player
    // ------------------------------------------------------------------

    /// Overrides any subset of the player's stats
    pub fn initialize_player(&mut self, update: StatsUpdate) {
        let stats = &mut self.player.stats;
        if let Some(max_health) = update.max_health {
            stats.max_health = max_health;
        }
        if let Some(health) = update.health {
            stats.health = health;
        }
        if let Some(damage) = update.damage {
            stats.damage = damage;
        }
        if let Some(defense) = update.defense {
            stats.defense = defense;
        }
    }

    pub fn update_player_position(&mut self, position: GridPos) {
        self.player.grid_position = position;
    }

    pub fn take_damage(&mut self, amount: u32) {
        let stats = &mut self.player.stats;
        let previous_health = stats.health;
        stats.health = stats.health.saturating_sub(amount);
        let remaining_health = stats.health;

        self.emit(CombatEvent::PlayerDamaged {
            damage: amount,
            remaining_health,
        });
        // only the hit that crosses to zero defeats the player
        if previous_health > 0 && remaining_health == 0 {
            info!("player defeated");
            self.emit(CombatEvent::PlayerDefeated);
        }
    }

    pub fn heal_player(&mut self, amount: u32) {
        let stats = &mut self.player.stats;
        stats.health = stats.health.saturating_add(amount).min(stats.max_health);
        let current_health = stats.health;

        self.emit(CombatEvent::PlayerHealed {
            amount,
            current_health,
        });
    }

    // ------------------------------------------------------------------
    // Enemy set
    // ------------------------------------------------------------------

    pub fn add_enemy(&mut self, enemy: CombatEntity) {
        debug!(enemy = %enemy.id, name = %enemy.name, "enemy engaged");
        self.enemies.insert(enemy.id.clone(), enemy);
        if !self.in_combat {
            self.start_combat();
        }
    }

    pub fn remove_enemy(&mut self, enemy_id: &str) -> Option<CombatEntity> {
        let removed = self.enemies.remove(enemy_id);
        if self.enemies.is_empty() && self.in_combat {
            self.end_combat();
        }
        removed
    }

    /// Pays out and removes an enemy whose death was decided elsewhere
    pub fn defeat_enemy(&mut self, enemy_id: &str) -> Option<Reward> {
        let enemy = self.enemies.get(enemy_id)?;
        let reward = Reward::for_enemy(enemy.stats.max_health);
        let enemy_name = enemy.name.clone();

        debug!(enemy = %enemy_id, gold = reward.gold_words, xp = reward.experience, "enemy defeated");
        self.emit(CombatEvent::EnemyDefeated {
            enemy_id: enemy_id.to_string(),
            enemy_name,
            reward,
        });
        self.remove_enemy(enemy_id);
        Some(reward)
    }

    fn start_combat(&mut self) {
        self.in_combat = true;
        debug!("combat started");
        self.emit(CombatEvent::CombatStarted);
    }

    fn end_combat(&mut self) {
        self.in_combat = false;
        let bonus = ComboBonus::for_combo(self.combo.count);
        debug!(combo = self.combo.count, "combat ended");
        self.emit(CombatEvent::CombatEnded { bonus });
        self.combo.reset();
    }

    /// Hard reset for a floor transition. Player stats survive.
    pub fn clear_all(&mut self) {
        self.enemies.clear();
        self.in_combat = false;
        self.combo = ComboState::new(self.combo_window_ms);
        self.spell_history.clear();
        self.complexity_cache.clear();
        self.events.clear();
        debug!("combat state cleared");
    }

    // ------------------------------------------------------------------
    // Casting
    // ------------------------------------------------------------------

    /// Casts at the current wall-clock time
    pub fn cast_spell(
        &mut self,
        word: &str,
        target_id: Option<&str>,
        speech: Option<SpeechResult>,
    ) -> SpellCast {
        let now = chrono::Utc::now().timestamp_millis();
        self.cast_spell_at(word, target_id, speech, now)
    }

    /// Casts at an explicit millisecond timestamp
    pub fn cast_spell_at(
        &mut self,
        word: &str,
        target_id: Option<&str>,
        speech: Option<SpeechResult>,
        now: i64,
    ) -> SpellCast {
        self.update_combo(now);

        let complexity = word_complexity(word);
        self.complexity_cache.insert(word.to_string(), complexity);

        let damage = calculate_spell_damage(
            self.player.stats.damage,
            complexity,
            self.combo.multiplier,
            speech.as_ref(),
        );
        let element = word_element(word);

        let spell = SpellCast {
            word: word.to_string(),
            damage,
            element,
            timestamp: now,
            is_critical_hit: speech.and_then(|s| s.is_critical_hit).unwrap_or(false),
            pronunciation_score: speech.and_then(|s| s.pronunciation_score).unwrap_or(1.0),
            spelling_penalty: speech.and_then(|s| s.spelling_penalty).unwrap_or(0.0),
        };
        self.spell_history.push(spell.clone());

        self.combo.record_cast(now);
        debug!(
            word,
            damage,
            complexity,
            combo = self.combo.count,
            multiplier = self.combo.multiplier,
            "spell cast"
        );

        let mut defeated = None;
        if let Some(target) = self.resolve_target(target_id) {
            if self.deal_damage(&target, damage, element) {
                defeated = Some(target);
            }
        }

        self.emit(CombatEvent::SpellCast {
            spell: spell.clone(),
            combo: self.combo.count,
            multiplier: self.combo.multiplier,
        });

        // a kill may end combat and reset the combo, so it settles after SpellCast
        if let Some(target) = defeated {
            self.defeat_enemy(&target);
        }

        self.trigger_counter_attacks();

        spell
    }

    fn update_combo(&mut self, now: i64) {
        if self.combo.is_expired(now) {
            if self.combo.count > 0 {
                self.emit(CombatEvent::ComboLost {
                    count: self.combo.count,
                    multiplier: self.combo.multiplier,
                });
            }
            self.combo.reset();
        }
    }

    /// Explicit target if engaged and alive, otherwise the nearest enemy
    fn resolve_target(&self, target_id: Option<&str>) -> Option<String> {
        if let Some(id) = target_id {
            if self.enemies.get(id).is_some_and(|e| e.stats.is_alive()) {
                return Some(id.to_string());
            }
        }
        self.nearest_enemy().map(|e| e.id.clone())
    }

    pub fn nearest_enemy(&self) -> Option<&CombatEntity> {
        let player_pos = self.player.grid_position;
        self.enemies
            .values()
            .min_by_key(|e| e.distance_to(player_pos))
    }

    /// Applies mitigated damage; true when the hit leaves the target at zero
    fn deal_damage(&mut self, target_id: &str, damage: u32, element: Element) -> bool {
        let Some(enemy) = self.enemies.get_mut(target_id) else {
            return false;
        };
        let applied = damage.saturating_sub(enemy.stats.defense).max(1);
        enemy.stats.health = enemy.stats.health.saturating_sub(applied);
        let remaining_health = enemy.stats.health;

        self.emit(CombatEvent::DamageDealt {
            target_id: target_id.to_string(),
            damage,
            applied,
            element,
            remaining_health,
        });

        remaining_health == 0
    }

    /// Enemies near the player strike back after a cast.
    ///
    /// Within melee range always, within ranged range on a coin flip.
    /// Damage is reported, not applied; callers route it to `take_damage`.
    fn trigger_counter_attacks(&mut self) {
        let player_pos = self.player.grid_position;
        let mut attacks = Vec::new();

        for enemy in self.enemies.values() {
            let distance = enemy.distance_to(player_pos);
            let attacks_back = if distance <= COUNTER_ATTACK_MELEE_RANGE {
                true
            } else if distance <= COUNTER_ATTACK_RANGED_RANGE {
                self.rng.gen::<f64>() < COUNTER_ATTACK_RANGED_CHANCE
            } else {
                false
            };

            if attacks_back {
                let factor = COUNTER_ATTACK_MIN_FACTOR
                    .max(1.0 - distance as f64 / COUNTER_ATTACK_FALLOFF_TILES);
                attacks.push(CombatEvent::EnemyCounterAttack {
                    enemy_id: enemy.id.clone(),
                    enemy_name: enemy.name.clone(),
                    damage: (enemy.stats.damage as f64 * factor).floor() as u32,
                    distance,
                    is_ranged: distance > COUNTER_ATTACK_MELEE_RANGE,
                });
            }
        }

        for attack in attacks {
            self.emit(attack);
        }
    }

    /// Blocks an incoming attack by reading a word; succeeds 70% of the time
    pub fn defend_with_word(&mut self, word: &str) -> bool {
        let success = self.rng.gen::<f64>() > DEFENSE_FAILURE_CHANCE;
        let word = word.to_string();
        if success {
            self.emit(CombatEvent::DefenseSucceeded { word });
        } else {
            self.emit(CombatEvent::DefenseFailed { word });
        }
        success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn system() -> CombatSystem<ChaCha8Rng> {
        CombatSystem::with_rng(ChaCha8Rng::seed_from_u64(42))
    }

    fn enemy(id: &str, health: u32, x: i32, y: i32) -> CombatEntity {
        CombatEntity::new(
            id,
            format!("Goblin {}", id),
            CombatStats::new(health, 5, 0),
            GridPos::new(x, y),
        )
    }

    fn names(events: &[CombatEvent]) -> Vec<&'static str> {
        events.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn test_plain_cast_damage() {
        let mut combat = system();
        let spell = combat.cast_spell_at("cat", None, None, 0);
        assert_eq!(spell.damage, 10);
        assert_eq!(spell.element, Element::Neutral);
        assert!(!spell.is_critical_hit);
        assert_eq!(spell.pronunciation_score, 1.0);
    }

    #[test]
    fn test_critical_hit_triples_plain_damage() {
        let mut combat = system();
        let speech = SpeechResult::new(1.0, true, 0.0);
        let spell = combat.cast_spell_at("cat", None, Some(speech), 0);
        assert_eq!(spell.damage, 30);
        assert!(spell.is_critical_hit);
    }

    #[test]
    fn test_zero_pronunciation_halves_damage() {
        let speech = SpeechResult::new(0.0, false, 0.0);
        assert_eq!(calculate_spell_damage(10, 0.0, 1.0, Some(&speech)), 5);
    }

    #[test]
    fn test_spelling_penalty_floor() {
        let speech = SpeechResult::new(1.0, false, 0.95);
        // 10 * 1.5 * 0.3
        assert_eq!(calculate_spell_damage(10, 0.0, 1.0, Some(&speech)), 4);
    }

    #[test]
    fn test_missing_speech_fields_use_defaults() {
        let speech = SpeechResult::default();
        // 10 * 1.5 (score defaults to 1.0)
        assert_eq!(calculate_spell_damage(10, 0.0, 1.0, Some(&speech)), 15);
    }

    #[test]
    fn test_complexity_scales_damage() {
        // "garden": complexity 2 -> multiplier 2.0
        let mut combat = system();
        assert_eq!(combat.cast_spell_at("garden", None, None, 0).damage, 20);
        assert_eq!(combat.complexity_bonus("garden"), Some(2.0));
    }

    #[test]
    fn test_combo_builds_within_window() {
        let mut combat = system();
        combat.cast_spell_at("cat", None, None, 0);
        assert_eq!(combat.combo_state().count, 1);
        assert_eq!(combat.combo_state().multiplier, 1.0);

        // Second cast computes at 1.0, then the multiplier steps to 1.5
        let second = combat.cast_spell_at("cat", None, None, 1000);
        assert_eq!(second.damage, 10);
        assert_eq!(combat.combo_state().multiplier, 1.5);

        let third = combat.cast_spell_at("cat", None, None, 2000);
        assert_eq!(third.damage, 15);
    }

    #[test]
    fn test_combo_lost_after_window() {
        let mut combat = system();
        combat.cast_spell_at("cat", None, None, 0);
        combat.drain_events();

        let spell = combat.cast_spell_at("cat", None, None, 3001);
        assert_eq!(spell.damage, 10);

        let events = combat.drain_events();
        assert_eq!(
            events[0],
            CombatEvent::ComboLost {
                count: 1,
                multiplier: 1.0
            }
        );
        assert_eq!(events[1].name(), "spell_cast");
        assert_eq!(combat.combo_state().count, 1);
    }

    #[test]
    fn test_first_cast_after_gap_emits_nothing_without_combo() {
        let mut combat = system();
        combat.cast_spell_at("cat", None, None, 1_000_000);
        assert!(!names(combat.pending_events()).contains(&"combo_lost"));
    }

    #[test]
    fn test_add_first_enemy_starts_combat() {
        let mut combat = system();
        combat.add_enemy(enemy("a", 30, 5, 5));
        combat.add_enemy(enemy("b", 30, 6, 5));
        assert!(combat.is_in_combat());
        assert_eq!(names(&combat.drain_events()), vec!["combat_started"]);
    }

    #[test]
    fn test_removing_last_enemy_ends_combat_with_combo_bonus() {
        let mut combat = system();
        combat.add_enemy(enemy("a", 500, 20, 20));
        combat.cast_spell_at("cat", None, None, 0);
        combat.cast_spell_at("cat", None, None, 100);
        combat.drain_events();

        combat.remove_enemy("a");
        assert!(!combat.is_in_combat());
        let events = combat.drain_events();
        assert_eq!(
            events,
            vec![CombatEvent::CombatEnded {
                bonus: Some(ComboBonus {
                    max_combo: 2,
                    bonus_reward: 10
                })
            }]
        );
        assert_eq!(combat.combo_state().count, 0);
        assert_eq!(combat.combo_state().multiplier, 1.0);
    }

    #[test]
    fn test_combat_end_without_combo_has_no_bonus() {
        let mut combat = system();
        combat.add_enemy(enemy("a", 30, 20, 20));
        combat.remove_enemy("a");
        assert_eq!(
            combat.drain_events().last(),
            Some(&CombatEvent::CombatEnded { bonus: None })
        );
    }

    #[test]
    fn test_remove_unknown_enemy_outside_combat_is_quiet() {
        let mut combat = system();
        assert!(combat.remove_enemy("ghost").is_none());
        assert!(combat.pending_events().is_empty());
    }

    #[test]
    fn test_auto_targets_nearest_enemy() {
        let mut combat = system();
        combat.update_player_position(GridPos::new(0, 0));
        combat.add_enemy(enemy("far", 100, 30, 30));
        combat.add_enemy(enemy("near", 100, 12, 0));
        combat.cast_spell_at("cat", None, None, 0);

        assert_eq!(combat.enemy("near").unwrap().stats.health, 90);
        assert_eq!(combat.enemy("far").unwrap().stats.health, 100);
    }

    #[test]
    fn test_explicit_target_wins() {
        let mut combat = system();
        combat.add_enemy(enemy("far", 100, 30, 30));
        combat.add_enemy(enemy("near", 100, 12, 0));
        combat.cast_spell_at("cat", Some("far"), None, 0);
        assert_eq!(combat.enemy("far").unwrap().stats.health, 90);
    }

    #[test]
    fn test_unknown_target_falls_back_to_nearest() {
        let mut combat = system();
        combat.add_enemy(enemy("only", 100, 12, 0));
        combat.cast_spell_at("cat", Some("ghost"), None, 0);
        assert_eq!(combat.enemy("only").unwrap().stats.health, 90);
    }

    #[test]
    fn test_no_enemies_damage_not_applied() {
        let mut combat = system();
        let spell = combat.cast_spell_at("cat", Some("ghost"), None, 0);
        assert_eq!(spell.damage, 10);
        assert!(!names(combat.pending_events()).contains(&"damage_dealt"));
    }

    #[test]
    fn test_enemy_defense_mitigates_with_minimum_one() {
        let mut combat = system();
        let mut tank = enemy("tank", 50, 20, 20);
        tank.stats.defense = 30;
        combat.add_enemy(tank);
        combat.cast_spell_at("cat", None, None, 0);
        assert_eq!(combat.enemy("tank").unwrap().stats.health, 49);
    }

    #[test]
    fn test_killing_last_enemy_pays_reward_and_ends_combat() {
        let mut combat = system();
        combat.add_enemy(enemy("slime", 10, 20, 20));
        combat.drain_events();

        combat.cast_spell_at("cat", None, None, 0);
        let events = combat.drain_events();
        assert_eq!(
            names(&events),
            vec!["damage_dealt", "spell_cast", "enemy_defeated", "combat_ended"]
        );
        assert!(events.contains(&CombatEvent::EnemyDefeated {
            enemy_id: "slime".to_string(),
            enemy_name: "Goblin slime".to_string(),
            reward: Reward {
                gold_words: 2,
                experience: 1
            },
        }));
        assert_eq!(combat.enemy_count(), 0);
        assert!(!combat.is_in_combat());
    }

    #[test]
    fn test_defeat_enemy_reward() {
        let mut combat = system();
        combat.add_enemy(enemy("ogre", 50, 20, 20));
        let reward = combat.defeat_enemy("ogre").unwrap();
        assert_eq!(reward.gold_words, 10);
        assert_eq!(reward.experience, 5);
        assert!(combat.defeat_enemy("ogre").is_none());
    }

    #[test]
    fn test_melee_enemies_counter_attack() {
        let mut combat = system();
        combat.add_enemy(enemy("a", 500, 2, 0));
        combat.drain_events();
        combat.cast_spell_at("cat", Some("a"), None, 0);

        let counter = combat
            .drain_events()
            .into_iter()
            .find(|e| e.name() == "enemy_counter_attack");
        // damage 5 * max(0.5, 1 - 2/10) = 4
        assert_eq!(
            counter,
            Some(CombatEvent::EnemyCounterAttack {
                enemy_id: "a".to_string(),
                enemy_name: "Goblin a".to_string(),
                damage: 4,
                distance: 2,
                is_ranged: false,
            })
        );
    }

    #[test]
    fn test_distant_enemies_never_counter_attack() {
        let mut combat = system();
        combat.add_enemy(enemy("a", 500, 7, 0));
        for t in 0..20 {
            combat.cast_spell_at("cat", None, None, t * 100);
        }
        assert!(!names(combat.pending_events()).contains(&"enemy_counter_attack"));
    }

    #[test]
    fn test_player_damage_and_defeat() {
        let mut combat = system();
        combat.take_damage(40);
        assert_eq!(combat.player_stats().health, 60);
        combat.take_damage(500);
        assert_eq!(combat.player_stats().health, 0);
        let events = combat.drain_events();
        assert_eq!(events.last(), Some(&CombatEvent::PlayerDefeated));
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut combat = system();
        combat.take_damage(30);
        combat.heal_player(500);
        assert_eq!(combat.player_stats().health, 100);
    }

    #[test]
    fn test_initialize_player_partial_update() {
        let mut combat = system();
        combat.initialize_player(StatsUpdate {
            damage: Some(25),
            ..StatsUpdate::default()
        });
        let stats = combat.player_stats();
        assert_eq!(stats.damage, 25);
        assert_eq!(stats.health, 100);
        assert_eq!(combat.cast_spell_at("cat", None, None, 0).damage, 25);
    }

    #[test]
    fn test_observers_see_events_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut combat = system();
        combat.subscribe(move |event: &CombatEvent| sink.borrow_mut().push(event.name()));
        combat.add_enemy(enemy("a", 30, 20, 20));
        combat.remove_enemy("a");

        assert_eq!(*seen.borrow(), vec!["combat_started", "combat_ended"]);
    }

    #[test]
    fn test_clear_all_is_idempotent() {
        let mut combat = system();
        combat.add_enemy(enemy("a", 500, 20, 20));
        combat.cast_spell_at("knight", None, None, 0);
        combat.cast_spell_at("frog", None, None, 500);

        combat.clear_all();
        combat.clear_all();

        let fresh = system();
        assert_eq!(combat.enemy_count(), fresh.enemy_count());
        assert_eq!(combat.combo_state(), fresh.combo_state());
        assert_eq!(combat.spell_history(), fresh.spell_history());
        assert_eq!(combat.is_in_combat(), fresh.is_in_combat());
        assert!(combat.pending_events().is_empty());
        assert_eq!(combat.complexity_bonus("knight"), None);
    }

    #[test]
    fn test_defense_roll_emits_matching_event() {
        let mut combat = system();
        let mut successes = 0;
        for _ in 0..200 {
            if combat.defend_with_word("shield") {
                successes += 1;
            }
        }
        assert!((100..=180).contains(&successes), "successes = {}", successes);
        let events = combat.drain_events();
        let succeeded = events
            .iter()
            .filter(|e| matches!(e, CombatEvent::DefenseSucceeded { .. }))
            .count();
        assert_eq!(succeeded, successes);
    }
}
