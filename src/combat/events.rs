//! Combat signals and observer registration.

use serde::{Deserialize, Serialize};

use super::types::{ComboBonus, Element, Reward, SpellCast};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// First enemy registered
    CombatStarted,
    /// Last enemy removed; carries the combo payout if a combo was live
    CombatEnded { bonus: Option<ComboBonus> },
    SpellCast {
        spell: SpellCast,
        combo: u32,
        multiplier: f64,
    },
    /// Combo window elapsed; `count` is the value before the reset
    ComboLost { count: u32, multiplier: f64 },
    DamageDealt {
        target_id: String,
        /// Spell damage before enemy defense
        damage: u32,
        /// Health actually removed
        applied: u32,
        element: Element,
        remaining_health: u32,
    },
    EnemyDefeated {
        enemy_id: String,
        enemy_name: String,
        reward: Reward,
    },
    EnemyCounterAttack {
        enemy_id: String,
        enemy_name: String,
        damage: u32,
        distance: i32,
        is_ranged: bool,
    },
    PlayerDamaged { damage: u32, remaining_health: u32 },
    PlayerHealed { amount: u32, current_health: u32 },
    PlayerDefeated,
    DefenseSucceeded { word: String },
    DefenseFailed { word: String },
}

impl CombatEvent {
    /// Short stable name, handy for logs and assertions
    pub fn name(&self) -> &'static str {
        match self {
            CombatEvent::CombatStarted => "combat_started",
            CombatEvent::CombatEnded { .. } => "combat_ended",
            CombatEvent::SpellCast { .. } => "spell_cast",
            CombatEvent::ComboLost { .. } => "combo_lost",
            CombatEvent::DamageDealt { .. } => "damage_dealt",
            CombatEvent::EnemyDefeated { .. } => "enemy_defeated",
            CombatEvent::EnemyCounterAttack { .. } => "enemy_counter_attack",
            CombatEvent::PlayerDamaged { .. } => "player_damaged",
            CombatEvent::PlayerHealed { .. } => "player_healed",
            CombatEvent::PlayerDefeated => "player_defeated",
            CombatEvent::DefenseSucceeded { .. } => "defense_succeeded",
            CombatEvent::DefenseFailed { .. } => "defense_failed",
        }
    }
}

/// Receives every event as it is emitted.
///
/// Closures taking `&CombatEvent` implement this directly.
pub trait CombatObserver {
    fn on_event(&mut self, event: &CombatEvent);
}

impl<F: FnMut(&CombatEvent)> CombatObserver for F {
    fn on_event(&mut self, event: &CombatEvent) {
        self(event)
    }
}
