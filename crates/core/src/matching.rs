//! Matching module - chain detection over the piece layer
//!
//! All functions here are pure reads of the board:
//!
//! - [`has_chain_at`]: does the run through one cell reach three on either axis
//! - [`detect_horizontal_matches`] / [`detect_vertical_matches`]: full scans
//!
//! Horizontal and vertical scans are independent, so a piece at the crossing
//! of an L or T shape shows up in one chain of each orientation.

use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{ChainKind, SymbolKind, MAX_DIMENSION, MIN_CHAIN_LENGTH};

/// A straight run of equal symbols
///
/// Equality compares member positions as a set; order and score are ignored.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Chain {
    kind: ChainKind,
    pieces: ArrayVec<Piece, MAX_DIMENSION>,
    score: u32,
}

impl Chain {
    pub fn new(kind: ChainKind) -> Self {
        Self {
            kind,
            pieces: ArrayVec::new(),
            score: 0,
        }
    }

    /// Append a piece. A chain never outgrows the board, so overflow is a bug.
    pub fn add(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    pub fn kind(&self) -> ChainKind {
        self.kind
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn first(&self) -> Option<&Piece> {
        self.pieces.first()
    }

    pub fn last(&self) -> Option<&Piece> {
        self.pieces.last()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Symbol shared by every member
    pub fn symbol(&self) -> Option<SymbolKind> {
        self.pieces.first().map(|p| p.kind)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn contains(&self, column: usize, row: usize) -> bool {
        self.pieces
            .iter()
            .any(|p| p.column == column && p.row == row)
    }

    fn sorted_positions(&self) -> ArrayVec<(usize, usize), MAX_DIMENSION> {
        let mut positions: ArrayVec<_, MAX_DIMENSION> =
            self.pieces.iter().map(Piece::position).collect();
        positions.sort_unstable();
        positions
    }
}

impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.sorted_positions() == other.sorted_positions()
    }
}

impl Eq for Chain {}

impl Hash for Chain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_positions().hash(state);
    }
}

/// Whether the cell at `(column, row)` sits in a run of three or more
///
/// Counts equal neighbors left+right and down+up independently, each axis
/// starting at 1 for the cell itself. An empty cell has no chain.
pub fn has_chain_at(board: &Board, column: usize, row: usize) -> bool {
    let Some(kind) = board.kind_at(column, row) else {
        return false;
    };

    // Horizontal
    let mut horizontal = 1;
    let mut i = column;
    while i > 0 && board.kind_at(i - 1, row) == Some(kind) {
        i -= 1;
        horizontal += 1;
    }
    let mut i = column + 1;
    while i < board.columns() && board.kind_at(i, row) == Some(kind) {
        i += 1;
        horizontal += 1;
    }
    if horizontal >= MIN_CHAIN_LENGTH {
        return true;
    }

    // Vertical
    let mut vertical = 1;
    let mut i = row;
    while i > 0 && board.kind_at(column, i - 1) == Some(kind) {
        i -= 1;
        vertical += 1;
    }
    let mut i = row + 1;
    while i < board.rows() && board.kind_at(column, i) == Some(kind) {
        i += 1;
        vertical += 1;
    }
    vertical >= MIN_CHAIN_LENGTH
}

/// All horizontal chains, row by row from the bottom, left to right
pub fn detect_horizontal_matches(board: &Board) -> Vec<Chain> {
    let mut chains = Vec::new();
    for row in 0..board.rows() {
        scan_line(board, ChainKind::Horizontal, |i| (i, row), board.columns(), &mut chains);
    }
    chains
}

/// All vertical chains, column by column from the left, bottom to top
pub fn detect_vertical_matches(board: &Board) -> Vec<Chain> {
    let mut chains = Vec::new();
    for column in 0..board.columns() {
        scan_line(board, ChainKind::Vertical, |i| (column, i), board.rows(), &mut chains);
    }
    chains
}

/// Scan one line of `len` cells, `at(i)` mapping a line offset to a cell
fn scan_line(
    board: &Board,
    kind: ChainKind,
    at: impl Fn(usize) -> (usize, usize),
    len: usize,
    chains: &mut Vec<Chain>,
) {
    let kind_at = |i: usize| {
        let (column, row) = at(i);
        board.kind_at(column, row)
    };

    let mut i = 0;
    // The last two cells cannot start a run of three.
    while i + 2 < len {
        let Some(symbol) = kind_at(i) else {
            i += 1;
            continue;
        };

        if kind_at(i + 1) == Some(symbol) && kind_at(i + 2) == Some(symbol) {
            let mut chain = Chain::new(kind);
            while i < len && kind_at(i) == Some(symbol) {
                let (column, row) = at(i);
                if let Some(piece) = board.piece_at(column, row) {
                    chain.add(piece);
                }
                i += 1;
            }
            if !chains.contains(&chain) {
                chains.push(chain);
            }
            continue;
        }

        i += 1;
    }
}
