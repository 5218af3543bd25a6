//! Scoring module - chain scores and the combo multiplier
//!
//! A chain of length `L` scored at multiplier `M` is worth
//! `CHAIN_BASE_SCORE * (L - 2) * M`. The multiplier goes up by one after every
//! scored chain, so later chains in the same cascade are worth more.

use crate::matching::Chain;
use crate::types::CHAIN_BASE_SCORE;

/// Score for one chain of `length` pieces at `multiplier`
pub fn chain_score(length: usize, multiplier: u32) -> u32 {
    let extra = length.saturating_sub(2) as u32;
    CHAIN_BASE_SCORE
        .saturating_mul(extra)
        .saturating_mul(multiplier)
}

/// Assign scores to `chains` in order, bumping `multiplier` after each.
/// Returns the sum.
pub fn score_chains(chains: &mut [Chain], multiplier: &mut u32) -> u32 {
    let mut total = 0u32;
    for chain in chains.iter_mut() {
        let score = chain_score(chain.len(), *multiplier);
        chain.set_score(score);
        total = total.saturating_add(score);
        *multiplier = multiplier.saturating_add(1);
    }
    total
}
