//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of a match-three board: filling, legal swaps,
//! chain detection, removal, gravity, refilling and scoring. It has **zero
//! dependencies** on rendering, input, or I/O, making it:
//!
//! - **Deterministic**: same seed and same moves produce the same board
//! - **Testable**: every rule is a plain method over owned state
//! - **Portable**: a terminal, a GUI or a headless simulator can drive it
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size sparse 2D storage with range-checked access
//! - [`piece`]: pieces, the arena that owns them, and swaps
//! - [`board`]: tile mask plus the live piece layer
//! - [`matching`]: single-cell and full-board chain detection
//! - [`scoring`]: chain scores and the combo multiplier
//! - [`rng`]: the pluggable random source
//! - [`definition`]: validated level shape, target and move budget
//! - [`level`]: the engine tying it all together
//! - [`snapshot`]: value copies of the board for renderers and logs
//!
//! # Game Rules
//!
//! - **Chains**: three or more equal symbols in a row or column
//! - **Legal swap**: two neighboring pieces whose exchange forms a chain
//! - **Scoring**: `60 * (length - 2) * combo`, combo rising by one per chain
//! - **Gravity**: pieces fall toward row 0 into empty tiles
//! - **Top-up**: new pieces fill each column from the top, never repeating the
//!   symbol generated just before
//!
//! # Example
//!
//! ```
//! use match_three_core::{Level, LevelDefinition, SimpleRng};
//!
//! let definition = LevelDefinition::full(9, 9, 1000, 20).unwrap();
//! let mut level = Level::new(&definition, SimpleRng::new(12345));
//!
//! // Fill the board until it has a legal move.
//! let pieces = level.shuffle().unwrap();
//! assert_eq!(pieces.len(), 81);
//!
//! // Play the first legal swap and resolve every cascade.
//! let swap = level.first_possible_swap().unwrap();
//! level.perform_swap(&swap);
//! let resolution = level.resolve_matches().unwrap();
//! assert!(resolution.score >= 60);
//! ```

pub mod board;
pub mod definition;
pub mod error;
pub mod grid;
pub mod level;
pub mod matching;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use match_three_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use definition::LevelDefinition;
pub use error::LevelError;
pub use grid::Grid;
pub use level::{CascadeStep, ColumnPieces, Level, Resolution};
pub use matching::{detect_horizontal_matches, detect_vertical_matches, has_chain_at, Chain};
pub use piece::{Piece, PieceArena, PieceId, Swap};
#[cfg(feature = "rand")]
pub use rng::RandSource;
pub use rng::{random_symbol, RandomSource, SimpleRng};
pub use scoring::{chain_score, score_chains};
pub use snapshot::LevelSnapshot;
