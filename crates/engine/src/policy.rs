//! Swap-choosing policies for automated play
//!
//! Policies only read the level. `Greedy` tries each candidate on a clone,
//! so the live board and its random source are never advanced.

use crate::core::{Level, RandomSource, Swap};

/// Picks the next swap to play
pub trait Policy<R> {
    fn choose(&mut self, level: &Level<R>) -> Option<Swap>;

    fn name(&self) -> &'static str;
}

/// Always plays the hint
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSwap;

impl<R: RandomSource> Policy<R> for FirstSwap {
    fn choose(&mut self, level: &Level<R>) -> Option<Swap> {
        level.first_possible_swap()
    }

    fn name(&self) -> &'static str {
        "first"
    }
}

/// Plays the swap with the largest immediate chain score
///
/// Only the first removal pass is evaluated; cascades depend on refills the
/// policy cannot see. Ties go to the earliest swap in discovery order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl Greedy {
    /// Immediate score of playing `swap` on `level`
    pub fn evaluate<R: RandomSource + Clone>(level: &Level<R>, swap: &Swap) -> u32 {
        let mut trial = level.clone();
        trial.perform_swap(swap);
        trial
            .remove_matches()
            .iter()
            .fold(0u32, |acc, chain| acc.saturating_add(chain.score()))
    }
}

impl<R: RandomSource + Clone> Policy<R> for Greedy {
    fn choose(&mut self, level: &Level<R>) -> Option<Swap> {
        let mut best: Option<(u32, Swap)> = None;
        for swap in level.possible_swaps() {
            let value = Self::evaluate(level, swap);
            if best.map_or(true, |(top, _)| value > top) {
                best = Some((value, *swap));
            }
        }
        best.map(|(_, swap)| swap)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Build a policy from its name ("first" or "greedy")
pub fn policy_from_str<R>(name: &str) -> Option<Box<dyn Policy<R>>>
where
    R: RandomSource + Clone + 'static,
{
    match name.to_lowercase().as_str() {
        "first" | "hint" => Some(Box::new(FirstSwap)),
        "greedy" => Some(Box::new(Greedy)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LevelDefinition, SimpleRng};
    use crate::types::SymbolKind::*;

    #[test]
    fn test_greedy_prefers_longer_chain() {
        // The first legal swap in scan order, (0,0) with (0,1), makes three
        // Ones; swapping (6,0) with (6,1) lines up four Fours on the bottom row.
        let def = LevelDefinition::full(8, 2, 0, 1).unwrap();
        let level = Level::from_layout(
            &def,
            SimpleRng::new(1),
            &[
                [One, Three, Five, Three, Six, Three, Four, Five].map(Some),
                [Two, One, One, Five, Four, Four, Three, Four].map(Some),
            ],
        )
        .unwrap();

        let first = FirstSwap.choose(&level).unwrap();
        let greedy = Greedy.choose(&level).unwrap();

        assert!(Greedy::evaluate(&level, &greedy) > Greedy::evaluate(&level, &first));
        assert_eq!(Greedy::evaluate(&level, &greedy), 120);
    }

    #[test]
    fn test_greedy_leaves_level_untouched() {
        let def = LevelDefinition::full(9, 9, 0, 1).unwrap();
        let mut level = Level::new(&def, SimpleRng::new(8));
        level.shuffle().unwrap();
        let before = level.snapshot();

        assert!(Greedy.choose(&level).is_some());
        assert_eq!(level.snapshot(), before);
    }

    #[test]
    fn test_policy_names() {
        let first = policy_from_str::<SimpleRng>("first").unwrap();
        assert_eq!(first.name(), "first");
        assert_eq!(policy_from_str::<SimpleRng>("GREEDY").unwrap().name(), "greedy");
        assert!(policy_from_str::<SimpleRng>("random").is_none());
    }
}
