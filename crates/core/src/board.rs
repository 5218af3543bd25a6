//! Board module - tile mask plus the live piece layer
//!
//! The tile mask is fixed when the board is built and says which cells may
//! ever hold a piece. The piece layer is a grid of [`PieceId`]s backed by a
//! [`PieceArena`]; moving a piece rewrites the grid and the piece's stored
//! position, never its id.
//!
//! Queries are public. Mutation is crate-private and driven by the level.

use crate::grid::Grid;
use crate::piece::{Piece, PieceArena, PieceId};
use crate::types::{SymbolKind, Tile};

/// The playing field
#[derive(Debug, Clone)]
pub struct Board {
    tiles: Grid<Tile>,
    cells: Grid<PieceId>,
    pieces: PieceArena,
}

impl Board {
    /// Create an empty board over a tile mask
    pub fn new(tiles: Grid<Tile>) -> Self {
        let cells = Grid::new(tiles.columns(), tiles.rows());
        Self {
            tiles,
            cells,
            pieces: PieceArena::new(),
        }
    }

    pub fn columns(&self) -> usize {
        self.tiles.columns()
    }

    pub fn rows(&self) -> usize {
        self.tiles.rows()
    }

    /// Check if position is within the board
    pub fn contains(&self, column: usize, row: usize) -> bool {
        self.tiles.contains(column, row)
    }

    /// Tile at `(column, row)`; panics when out of range
    pub fn tile_at(&self, column: usize, row: usize) -> Option<Tile> {
        self.tiles.get(column, row).copied()
    }

    pub fn is_tile(&self, column: usize, row: usize) -> bool {
        self.tiles.is_occupied(column, row)
    }

    /// Piece at `(column, row)`; panics when out of range
    pub fn piece_at(&self, column: usize, row: usize) -> Option<Piece> {
        self.cells
            .get(column, row)
            .and_then(|id| self.pieces.get(*id))
            .copied()
    }

    /// Symbol at `(column, row)`; panics when out of range
    #[inline]
    pub fn kind_at(&self, column: usize, row: usize) -> Option<SymbolKind> {
        self.cells
            .get(column, row)
            .and_then(|id| self.pieces.get(*id))
            .map(|piece| piece.kind)
    }

    /// Resolve a handle to the piece's current state
    pub fn piece(&self, id: PieceId) -> Option<Piece> {
        self.pieces.get(id).copied()
    }

    /// Number of live pieces
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Live pieces in row-major order (row outer, column inner)
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells
            .iter()
            .filter_map(move |(_, _, id)| self.pieces.get(*id).copied())
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    /// Put a new piece on an empty tile
    pub(crate) fn spawn(&mut self, column: usize, row: usize, kind: SymbolKind) -> Piece {
        assert!(
            self.is_tile(column, row),
            "cannot place a piece on non-tile cell ({}, {})",
            column,
            row
        );
        assert!(
            !self.cells.is_occupied(column, row),
            "cell ({}, {}) already holds a piece",
            column,
            row
        );
        let piece = self.pieces.insert(column, row, kind);
        self.cells.set(column, row, Some(piece.id));
        piece
    }

    /// Remove the piece at `(column, row)`, if any
    pub(crate) fn remove(&mut self, column: usize, row: usize) -> Option<Piece> {
        let id = self.cells.take(column, row)?;
        self.pieces.remove(id)
    }

    /// Move the piece at `from` into the empty cell `to`
    pub(crate) fn move_piece(&mut self, from: (usize, usize), to: (usize, usize)) -> Option<Piece> {
        assert!(
            !self.cells.is_occupied(to.0, to.1),
            "cell ({}, {}) already holds a piece",
            to.0,
            to.1
        );
        let id = self.cells.take(from.0, from.1)?;
        self.cells.set(to.0, to.1, Some(id));
        let piece = self.pieces.get_mut(id)?;
        piece.column = to.0;
        piece.row = to.1;
        Some(*piece)
    }

    /// Exchange two cells and update both pieces' positions
    pub(crate) fn exchange(&mut self, a: (usize, usize), b: (usize, usize)) {
        self.cells.swap(a, b);
        for (column, row) in [a, b] {
            if let Some(id) = self.cells.get(column, row).copied() {
                if let Some(piece) = self.pieces.get_mut(id) {
                    piece.column = column;
                    piece.row = row;
                }
            }
        }
    }

    /// Exchange two cells without touching stored positions.
    ///
    /// Used for speculative probes that are undone right away; between the
    /// two calls the grid and the arena disagree on positions.
    pub(crate) fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        self.cells.swap(a, b);
    }

    /// Remove every piece
    pub(crate) fn clear_pieces(&mut self) {
        self.cells.clear();
        self.pieces.clear();
    }
}
