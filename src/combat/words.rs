//! Word scoring used by spell damage.
//!
//! These are spelling heuristics, not phonology: patterns are matched as
//! raw substrings of the word as spoken/typed.

use super::types::Element;
use crate::core::constants::{BLEND_BONUS, COMPOUND_BONUS, DIGRAPH_BONUS, SILENT_LETTER_BONUS};

const BLENDS: [&str; 20] = [
    "bl", "br", "cl", "cr", "dr", "fl", "fr", "gl", "gr", "pl", "pr", "sc", "sk", "sl", "sm", "sn",
    "sp", "st", "sw", "tr",
];
const DIGRAPHS: [&str; 5] = ["ch", "sh", "th", "wh", "ph"];
const SILENT_LETTERS: [&str; 4] = ["kn", "wr", "mb", "gh"];
const COMPOUND_WORDS: [&str; 8] = [
    "anywhere",
    "something",
    "everyone",
    "basketball",
    "football",
    "sunshine",
    "rainbow",
    "butterfly",
];

fn contains_any(word: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| word.contains(p))
}

fn length_tier(word: &str) -> f64 {
    match word.chars().count() {
        0..=3 => 0.0,
        4..=5 => 1.0,
        6..=7 => 2.0,
        _ => 3.0,
    }
}

pub fn is_compound(word: &str) -> bool {
    word.contains('-') || COMPOUND_WORDS.contains(&word.to_lowercase().as_str())
}

/// Complexity score in `0.0..=6.5`: length tier plus pattern bonuses.
pub fn word_complexity(word: &str) -> f64 {
    let mut complexity = length_tier(word);
    if contains_any(word, &BLENDS) {
        complexity += BLEND_BONUS;
    }
    if contains_any(word, &DIGRAPHS) {
        complexity += DIGRAPH_BONUS;
    }
    if contains_any(word, &SILENT_LETTERS) {
        complexity += SILENT_LETTER_BONUS;
    }
    if is_compound(word) {
        complexity += COMPOUND_BONUS;
    }
    complexity
}

/// Element bucket from the word's opening letter(s)
pub fn word_element(word: &str) -> Element {
    let lower = word.to_lowercase();
    match lower.chars().next() {
        Some('k' | 't' | 'p') => Element::Lightning,
        Some('s' | 'm' | 'l') => Element::Ice,
        Some('f' | 'v') => Element::Fire,
        _ if lower.starts_with("th") => Element::Fire,
        _ => Element::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_plain_word_is_zero() {
        assert_eq!(word_complexity("cat"), 0.0);
        assert_eq!(word_complexity(""), 0.0);
    }

    #[test]
    fn test_length_tiers() {
        assert_eq!(word_complexity("jump"), 1.0);
        assert_eq!(word_complexity("garden"), 2.0);
        assert_eq!(word_complexity("elephant"), 3.5); // "ph" digraph
    }

    #[test]
    fn test_pattern_bonuses_stack() {
        // "frog": 1 + blend
        assert_eq!(word_complexity("frog"), 1.5);
        // "ship": 1 + digraph
        assert_eq!(word_complexity("ship"), 1.5);
        // "knight": 2 + silent (kn, gh)
        assert_eq!(word_complexity("knight"), 3.0);
        // "thumb": 1 + digraph + silent
        assert_eq!(word_complexity("thumb"), 2.5);
    }

    #[test]
    fn test_compounds() {
        assert!(is_compound("ice-cream"));
        assert!(is_compound("Rainbow"));
        assert!(!is_compound("rain"));
        // "basketball": 3 + "sk" blend + compound
        assert_eq!(word_complexity("basketball"), 5.0);
    }

    #[test]
    fn test_patterns_are_case_sensitive() {
        assert_eq!(word_complexity("SHIP"), 1.0);
    }

    #[test]
    fn test_elements() {
        assert_eq!(word_element("kite"), Element::Lightning);
        assert_eq!(word_element("Tiger"), Element::Lightning);
        assert_eq!(word_element("pan"), Element::Lightning);
        assert_eq!(word_element("snow"), Element::Ice);
        assert_eq!(word_element("moon"), Element::Ice);
        assert_eq!(word_element("leaf"), Element::Ice);
        assert_eq!(word_element("fire"), Element::Fire);
        assert_eq!(word_element("vine"), Element::Fire);
        assert_eq!(word_element("apple"), Element::Neutral);
        assert_eq!(word_element(""), Element::Neutral);
    }

    #[test]
    fn test_th_is_lightning_before_fire() {
        // Leading 't' matches the lightning bucket first
        assert_eq!(word_element("thunder"), Element::Lightning);
    }
}
