//! Spoken-word combat: spell damage, combos, enemy set and events.

pub mod events;
pub mod logic;
pub mod types;
pub mod words;

pub use events::{CombatEvent, CombatObserver};
pub use logic::{calculate_spell_damage, CombatSystem};
pub use types::*;
pub use words::{is_compound, word_complexity, word_element};
