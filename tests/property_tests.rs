//! Property-based tests using proptest
//!
//! Invariants that must hold for all inputs:
//! - Progression: level weights, reading level clamp, drop chances
//! - Words: complexity bounds, speech scaling stays bounded
//! - Generation: any seed gives a well-formed floor
//! - Economy: balance never underflows

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wordcaster::combat::{calculate_spell_damage, word_complexity, SpeechResult};
use wordcaster::core::constants::{MAX_READING_LEVEL, MAX_ROOMS};
use wordcaster::dungeon::{DungeonGenerator, RoomType};
use wordcaster::economy::Wallet;
use wordcaster::progression::{
    consumable_drop_chance, enemy_level_weights, random_enemy_level, rune_drop_chance,
    word_level_for_floor,
};

// ============================================================
// Progression Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_same_level_weight_is_fixed(floor in 2u32..=20) {
        let weights = enemy_level_weights(floor);
        let same = weights.iter().find(|w| w.level == floor).map(|w| w.weight);
        prop_assert_eq!(same, Some(0.6));
    }

    #[test]
    fn prop_weights_are_positive_and_bounded(floor in 0u32..=40) {
        let weights = enemy_level_weights(floor);
        prop_assert!(!weights.is_empty());
        let top = (floor + 1).clamp(1, MAX_READING_LEVEL);
        for w in &weights {
            prop_assert!(w.weight > 0.0);
            prop_assert!(w.level >= 1 && w.level <= top, "level {} on floor {}", w.level, floor);
        }
    }

    #[test]
    fn prop_sampled_levels_come_from_the_weights(floor in 1u32..=25, seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let allowed: Vec<u32> = enemy_level_weights(floor).iter().map(|w| w.level).collect();
        for _ in 0..20 {
            let level = random_enemy_level(floor, &mut rng);
            prop_assert!(allowed.contains(&level));
        }
    }

    #[test]
    fn prop_word_level_is_clamped(floor in any::<u32>()) {
        let level = word_level_for_floor(floor);
        prop_assert!((1..=MAX_READING_LEVEL).contains(&level));
    }

    #[test]
    fn prop_drop_chances_are_probabilities(floor in 0u32..=60, is_boss in any::<bool>()) {
        let rune = rune_drop_chance(floor, is_boss);
        prop_assert!((0.0..=0.3).contains(&rune));
        let consumable = consumable_drop_chance(floor, is_boss);
        prop_assert!(consumable > 0.0);
        if is_boss {
            prop_assert_eq!(consumable, 1.0);
        }
    }
}

// ============================================================
// Word and Damage Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_complexity_is_bounded(word in "[a-z-]{0,16}") {
        let complexity = word_complexity(&word);
        prop_assert!((0.0..=6.5).contains(&complexity), "{} scored {}", word, complexity);
    }

    #[test]
    fn prop_longer_plain_words_never_score_lower(len in 1usize..12) {
        let shorter = "a".repeat(len);
        let longer = "a".repeat(len + 1);
        prop_assert!(word_complexity(&longer) >= word_complexity(&shorter));
    }

    #[test]
    fn prop_speech_never_increases_past_full_marks(
        base in 1u32..50,
        word in "[a-z]{1,10}",
        score in 0.0f64..=1.0,
        penalty in 0.0f64..=1.0,
    ) {
        let complexity = word_complexity(&word);
        let clean = calculate_spell_damage(base, complexity, 1.0, None);
        let speech = SpeechResult::new(score, false, penalty);
        let spoken = calculate_spell_damage(base, complexity, 1.0, Some(&speech));
        // best case is 1.5x for a perfect non-critical reading
        prop_assert!(spoken as f64 <= clean as f64 * 1.5 + 1.0);
        prop_assert!(clean >= base);
    }
}

// ============================================================
// Generation Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn prop_any_seed_generates_valid_floor(seed in any::<u64>(), floor in 1u32..=20) {
        let generator = DungeonGenerator::default();
        let dungeon = generator.generate(floor, &mut ChaCha8Rng::seed_from_u64(seed));

        prop_assert_eq!(dungeon.floor, floor);
        prop_assert!(dungeon.rooms.len() <= MAX_ROOMS as usize);
        prop_assert_eq!(dungeon.rooms[0].room_type, RoomType::Entrance);
        prop_assert!((1..=10).contains(&dungeon.generation_attempts));

        let (width, height) = generator.grid_dimensions(floor);
        prop_assert_eq!((dungeon.width, dungeon.height), (width, height));
        prop_assert!(dungeon.is_walkable(dungeon.player_start.x, dungeon.player_start.y));
        if let Some(stairs) = dungeon.stairwell_position {
            prop_assert!(dungeon.is_walkable(stairs.x, stairs.y));
        }
    }

    #[test]
    fn prop_floor_generation_is_deterministic(seed in any::<u64>(), floor in 1u32..=20) {
        let a = DungeonGenerator::default().generate(floor, &mut ChaCha8Rng::seed_from_u64(seed));
        let b = DungeonGenerator::default().generate(floor, &mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(a.rooms, b.rooms);
        prop_assert_eq!(a.tiles, b.tiles);
        prop_assert_eq!(a.doors, b.doors);
    }
}

// ============================================================
// Economy Properties
// ============================================================

proptest! {
    #[test]
    fn prop_balance_matches_successful_transactions(
        ops in prop::collection::vec((any::<bool>(), 0u32..200), 0..60)
    ) {
        let mut wallet = Wallet::new();
        let mut expected: u32 = 0;
        for (is_earn, amount) in ops {
            if is_earn {
                wallet.earn(amount, "test");
                expected += amount;
            } else if wallet.spend(amount, "test").is_ok() {
                expected -= amount;
            } else {
                prop_assert!(amount > expected);
            }
            prop_assert_eq!(wallet.balance(), expected);
            prop_assert!(wallet.can_afford(expected));
        }
    }
}
