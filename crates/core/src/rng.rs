//! RNG module - pluggable randomness for symbol generation
//!
//! The engine only ever asks for a uniform integer below a bound. Anything that
//! can answer that implements [`RandomSource`]:
//!
//! - [`SimpleRng`]: a seeded LCG, the default, deterministic for replays and tests
//! - [`RandSource`]: wraps any `rand::RngCore` (with the `rand` feature)

use crate::types::SymbolKind;

/// Source of uniform random integers
pub trait RandomSource {
    /// Uniform value in `[0, bound)`. `bound` is never zero.
    fn next_below(&mut self, bound: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG cycle with short periods; use the high half.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Current internal state (restarting from it replays the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.next_range(bound)
    }
}

/// Adapter for `rand` generators
#[cfg(feature = "rand")]
#[derive(Debug, Clone)]
pub struct RandSource<R>(pub R);

#[cfg(feature = "rand")]
impl<R: rand::RngCore> RandomSource for RandSource<R> {
    fn next_below(&mut self, bound: u32) -> u32 {
        use rand::Rng;
        self.0.gen_range(0..bound.max(1))
    }
}

/// Draw a symbol uniformly among the first `count` kinds
///
/// `count` is clamped to `1..=SymbolKind::COUNT`.
pub fn random_symbol<R: RandomSource + ?Sized>(rng: &mut R, count: u8) -> SymbolKind {
    let count = count.clamp(1, SymbolKind::COUNT);
    SymbolKind::ALL[rng.next_below(count as u32) as usize]
}
