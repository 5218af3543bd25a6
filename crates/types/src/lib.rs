//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no required dependencies, so they can be used
//! by the rule engine, a renderer, or a simulator alike.
//!
//! # Board Dimensions
//!
//! The reference board is 9x9. Coordinates are `(column, row)` with column 0 on
//! the left and row 0 at the bottom:
//!
//! - **Columns**: indexed 0..columns, left to right
//! - **Rows**: indexed 0..rows, bottom to top (gravity pulls toward row 0)
//!
//! Boards of other shapes are allowed up to [`MAX_DIMENSION`] in either axis.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CHAIN_BASE_SCORE` | 60 | Points per chain cell beyond the second |
//! | `MIN_CHAIN_LENGTH` | 3 | Shortest run that counts as a chain |
//!
//! # Retry Ceilings
//!
//! The random fill loops are bounded. Exceeding a ceiling means the board shape
//! or symbol count cannot satisfy the fill constraints:
//!
//! - `MAX_REROLL_ATTEMPTS`: re-rolls of one cell before giving up
//! - `MAX_SHUFFLE_ATTEMPTS`: full board rebuilds looking for a playable board
//! - `MAX_CASCADE_PASSES`: remove/fill/top-up passes in one resolution
//!
//! # Examples
//!
//! ```
//! use match_three_types::{ChainKind, SymbolKind, DEFAULT_COLUMNS, DEFAULT_ROWS};
//!
//! let symbol = SymbolKind::from_raw(3).unwrap();
//! assert_eq!(symbol, SymbolKind::Three);
//! assert_eq!(symbol.raw(), 3);
//!
//! assert_eq!(ChainKind::Vertical.as_str(), "vertical");
//!
//! assert_eq!(DEFAULT_COLUMNS, 9);
//! assert_eq!(DEFAULT_ROWS, 9);
//! ```

#[cfg(feature = "serde")]
use serde::Serialize;

/// Reference board width (9 columns)
pub const DEFAULT_COLUMNS: usize = 9;

/// Reference board height (9 rows)
pub const DEFAULT_ROWS: usize = 9;

/// Largest supported board extent in either axis.
///
/// Chains are stored inline, so a chain can never be longer than this.
pub const MAX_DIMENSION: usize = 16;

/// Number of symbol kinds the reference game draws from
pub const DEFAULT_SYMBOL_COUNT: u8 = 5;

/// Fewest symbol kinds a level may use; fewer cannot avoid initial triples
pub const MIN_SYMBOL_COUNT: u8 = 3;

/// Shortest run of equal symbols that forms a chain
pub const MIN_CHAIN_LENGTH: usize = 3;

/// Points awarded per chain cell beyond the second, before the combo multiplier
pub const CHAIN_BASE_SCORE: u32 = 60;

/// Re-rolls allowed for a single cell during initial fill or top-up
pub const MAX_REROLL_ATTEMPTS: u32 = 256;

/// Full rebuilds allowed while searching for a board with a legal swap
pub const MAX_SHUFFLE_ATTEMPTS: u32 = 1_000;

/// Remove/fill/top-up passes allowed in one resolution
pub const MAX_CASCADE_PASSES: u32 = 1_000;

/// The symbol printed on a piece
///
/// The engine only cares about equality between symbols; names and artwork
/// belong to whoever draws the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(into = "u8"))]
pub enum SymbolKind {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl SymbolKind {
    /// All symbol kinds in raw-value order
    pub const ALL: [SymbolKind; 6] = [
        SymbolKind::One,
        SymbolKind::Two,
        SymbolKind::Three,
        SymbolKind::Four,
        SymbolKind::Five,
        SymbolKind::Six,
    ];

    /// Number of distinct symbol kinds
    pub const COUNT: u8 = 6;

    /// Build from the 1-based raw value
    ///
    /// # Examples
    ///
    /// ```
    /// use match_three_types::SymbolKind;
    ///
    /// assert_eq!(SymbolKind::from_raw(1), Some(SymbolKind::One));
    /// assert_eq!(SymbolKind::from_raw(6), Some(SymbolKind::Six));
    /// assert_eq!(SymbolKind::from_raw(0), None);
    /// assert_eq!(SymbolKind::from_raw(7), None);
    /// ```
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1..=6 => Some(Self::ALL[(raw - 1) as usize]),
            _ => None,
        }
    }

    /// 1-based raw value
    pub fn raw(&self) -> u8 {
        match self {
            SymbolKind::One => 1,
            SymbolKind::Two => 2,
            SymbolKind::Three => 3,
            SymbolKind::Four => 4,
            SymbolKind::Five => 5,
            SymbolKind::Six => 6,
        }
    }
}

impl From<SymbolKind> for u8 {
    fn from(value: SymbolKind) -> Self {
        value.raw()
    }
}

/// Axis a chain runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChainKind {
    Horizontal,
    Vertical,
}

impl ChainKind {
    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainKind::Horizontal => "horizontal",
            ChainKind::Vertical => "vertical",
        }
    }
}

/// Marker stored in the tile mask for a playable cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile;
