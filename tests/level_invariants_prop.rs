//! Property tests over generated seeds and symbol counts.
//!
//! Invariants covered:
//! - A shuffled board is full, has no chain, and has at least one legal swap.
//! - Every listed legal swap really forms a chain.
//! - After removal and gravity no tile is empty below an occupied one.
//! - Resolving a move leaves a full, chain-free board and a 60-multiple score.
//! - Sessions always terminate within their move budget.

use proptest::prelude::*;

use match_three::core::{Level, LevelDefinition, SimpleRng};
use match_three::engine::{policy_from_str, Session};

fn shuffled_level(seed: u32, symbols: u8) -> Level {
    let def = LevelDefinition::full(9, 9, 1000, 20)
        .and_then(|d| d.with_symbol_count(symbols))
        .unwrap();
    let mut level = Level::new(&def, SimpleRng::new(seed));
    level.shuffle().unwrap();
    level
}

fn assert_no_gaps_under_pieces(level: &Level) {
    for column in 0..level.columns() {
        let mut seen_hole = false;
        for row in 0..level.rows() {
            match level.piece_at(column, row) {
                None => seen_hole = true,
                Some(_) => {
                    assert!(!seen_hole, "piece floats above a hole at ({}, {})", column, row)
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn shuffled_board_is_full_and_playable(seed in any::<u32>(), symbols in 3u8..=6) {
        let level = shuffled_level(seed, symbols);

        prop_assert!(level.snapshot().is_full());
        prop_assert!(level.detect_horizontal_matches().is_empty());
        prop_assert!(level.detect_vertical_matches().is_empty());
        prop_assert!(!level.possible_swaps().is_empty());
        prop_assert_eq!(level.combo_multiplier(), 1);
    }

    #[test]
    fn every_legal_swap_forms_a_chain(
        seed in any::<u32>(),
        symbols in 3u8..=6,
    ) {
        let level = shuffled_level(seed, symbols);

        for swap in level.possible_swaps() {
            prop_assert!(swap.is_adjacent());
            let mut trial = level.clone();
            trial.perform_swap(swap);
            let (a, b) = (swap.a.position(), swap.b.position());
            prop_assert!(trial.has_chain_at(a.0, a.1) || trial.has_chain_at(b.0, b.1));
        }
    }

    #[test]
    fn gravity_leaves_no_floating_pieces(
        seed in any::<u32>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut level = shuffled_level(seed, 5);
        let swap = *pick.get(level.possible_swaps());

        level.perform_swap(&swap);
        let chains = level.remove_matches();
        prop_assert!(!chains.is_empty());
        level.fill_holes();

        assert_no_gaps_under_pieces(&level);
    }

    #[test]
    fn resolution_settles_the_board(
        seed in any::<u32>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut level = shuffled_level(seed, 4);
        let swap = *pick.get(level.possible_swaps());

        level.perform_swap(&swap);
        let resolution = level.resolve_matches().unwrap();

        prop_assert!(resolution.score >= 60);
        prop_assert_eq!(resolution.score % 60, 0);
        prop_assert!(level.snapshot().is_full());
        prop_assert!(level.detect_horizontal_matches().is_empty());
        prop_assert!(level.detect_vertical_matches().is_empty());
    }

    #[test]
    fn session_ends_within_budget(
        seed in any::<u32>(),
        moves in 1u32..12,
        greedy in any::<bool>(),
    ) {
        let def = LevelDefinition::full(9, 9, 2000, moves).unwrap();
        let mut session = Session::new(&def, SimpleRng::new(seed)).unwrap();
        let name = if greedy { "greedy" } else { "first" };
        let mut policy = policy_from_str::<SimpleRng>(name).unwrap();

        while !session.status().is_finished() {
            let swap = policy.choose(session.level()).unwrap();
            let report = session.play_swap(&swap).unwrap();
            prop_assert!(!report.resolution.is_empty());
            if !report.status.is_finished() {
                prop_assert!(!session.level().possible_swaps().is_empty());
                prop_assert_eq!(session.level().combo_multiplier(), 1);
            }
        }

        prop_assert!(session.turns() <= moves);
    }
}
