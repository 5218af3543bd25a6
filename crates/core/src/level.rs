//! Level module - the rule engine
//!
//! Ties together the board, match detection, scoring and the random source.
//! A turn runs as:
//!
//! 1. [`Level::shuffle`] until the board has a legal swap
//! 2. [`Level::is_possible_swap`] / [`Level::perform_swap`] for the player's move
//! 3. [`Level::resolve_matches`]: remove chains, let pieces fall, top up, repeat
//! 4. [`Level::detect_possible_swaps`] to refresh the legal moves
//!
//! Every operation completes synchronously. Fill loops are bounded by the
//! ceilings in [`crate::types`] and report [`LevelError`] when exceeded.

use crate::board::Board;
use crate::definition::LevelDefinition;
use crate::error::LevelError;
use crate::matching::{self, Chain};
use crate::piece::{Piece, Swap};
use crate::rng::{random_symbol, RandomSource, SimpleRng};
use crate::scoring::score_chains;
use crate::snapshot::LevelSnapshot;
use crate::types::{
    SymbolKind, Tile, MAX_CASCADE_PASSES, MAX_REROLL_ATTEMPTS, MAX_SHUFFLE_ATTEMPTS,
};

/// Pieces that moved or appeared, grouped per column.
///
/// Columns with nothing to report are left out; each piece carries its column.
pub type ColumnPieces = Vec<Vec<Piece>>;

/// One remove/fall/top-up pass of a cascade
#[derive(Debug, Clone, Default)]
pub struct CascadeStep {
    /// Chains removed, horizontal ones first, each in discovery order
    pub chains: Vec<Chain>,
    /// Pieces that fell into holes, bottom to top within a column
    pub falls: ColumnPieces,
    /// Pieces added at the top, top to bottom within a column
    pub new_pieces: ColumnPieces,
    /// Sum of the chain scores in this pass
    pub score: u32,
}

/// Everything that happened while resolving one move
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub steps: Vec<CascadeStep>,
    pub score: u32,
}

impl Resolution {
    /// No chain formed at all
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn chain_count(&self) -> usize {
        self.steps.iter().map(|s| s.chains.len()).sum()
    }

    /// All removed chains in scoring order
    pub fn chains(&self) -> impl Iterator<Item = &Chain> + '_ {
        self.steps.iter().flat_map(|s| s.chains.iter())
    }
}

/// Match-three rule engine for one level
#[derive(Debug, Clone)]
pub struct Level<R = SimpleRng> {
    board: Board,
    target_score: u32,
    maximum_moves: u32,
    symbol_count: u8,
    combo_multiplier: u32,
    possible_swaps: Vec<Swap>,
    rng: R,
}

impl<R: RandomSource> Level<R> {
    /// Create a level with an empty board
    pub fn new(definition: &LevelDefinition, rng: R) -> Self {
        Self {
            board: Board::new(definition.tiles().clone()),
            target_score: definition.target_score(),
            maximum_moves: definition.maximum_moves(),
            symbol_count: definition.symbol_count(),
            combo_multiplier: 1,
            possible_swaps: Vec::new(),
            rng,
        }
    }

    /// Restore a level from explicit symbols, rows listed top to bottom
    ///
    /// `None` leaves a cell empty. Symbols on non-tile cells are rejected. The
    /// legal swaps are recomputed for the restored board.
    ///
    /// # Examples
    ///
    /// ```
    /// use match_three_core::{Level, LevelDefinition, SimpleRng};
    /// use match_three_core::types::SymbolKind::{One, Two};
    ///
    /// let def = LevelDefinition::full(3, 1, 60, 1).unwrap();
    /// let level = Level::from_layout(
    ///     &def,
    ///     SimpleRng::new(1),
    ///     &[[Some(One), Some(Two), Some(One)]],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(level.piece_at(1, 0).map(|p| p.kind), Some(Two));
    /// ```
    pub fn from_layout<Row: AsRef<[Option<SymbolKind>]>>(
        definition: &LevelDefinition,
        rng: R,
        rows: &[Row],
    ) -> Result<Self, LevelError> {
        let mut level = Self::new(definition, rng);
        let height = level.rows();
        let width = level.columns();

        if rows.len() != height {
            return Err(LevelError::InvalidLayout(format!(
                "{} rows, expected {}",
                rows.len(),
                height
            )));
        }

        for (source_row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != width {
                return Err(LevelError::InvalidLayout(format!(
                    "row {} has {} cells, expected {}",
                    source_row,
                    cells.len(),
                    width
                )));
            }

            let row = height - source_row - 1;
            for (column, cell) in cells.iter().enumerate() {
                let Some(kind) = cell else { continue };
                if !level.board.is_tile(column, row) {
                    return Err(LevelError::InvalidLayout(format!(
                        "symbol on non-tile cell ({}, {})",
                        column, row
                    )));
                }
                level.board.spawn(column, row, *kind);
            }
        }

        level.detect_possible_swaps();
        Ok(level)
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn maximum_moves(&self) -> u32 {
        self.maximum_moves
    }

    pub fn symbol_count(&self) -> u8 {
        self.symbol_count
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo_multiplier
    }

    pub fn columns(&self) -> usize {
        self.board.columns()
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Piece at `(column, row)`; panics when out of range
    pub fn piece_at(&self, column: usize, row: usize) -> Option<Piece> {
        self.board.piece_at(column, row)
    }

    /// Tile at `(column, row)`; panics when out of range
    pub fn tile_at(&self, column: usize, row: usize) -> Option<Tile> {
        self.board.tile_at(column, row)
    }

    /// Legal swaps found by the last [`Level::detect_possible_swaps`]
    pub fn possible_swaps(&self) -> &[Swap] {
        &self.possible_swaps
    }

    pub fn reset_combo_multiplier(&mut self) {
        self.combo_multiplier = 1;
    }

    /// Wipe the board and fill every tile with a random symbol
    ///
    /// Cells are visited row by row from the bottom, left to right. A symbol is
    /// re-rolled while it would complete a run of three with the two cells to
    /// its left or the two cells below it.
    pub fn create_initial_pieces(&mut self) -> Result<Vec<Piece>, LevelError> {
        self.board.clear_pieces();
        self.possible_swaps.clear();

        let mut created = Vec::with_capacity(self.columns() * self.rows());
        for row in 0..self.rows() {
            for column in 0..self.columns() {
                if !self.board.is_tile(column, row) {
                    continue;
                }

                let mut attempts = 0;
                let kind = loop {
                    if attempts == MAX_REROLL_ATTEMPTS {
                        return Err(LevelError::RerollExhausted { column, row });
                    }
                    attempts += 1;

                    let kind = random_symbol(&mut self.rng, self.symbol_count);
                    if !self.completes_run(column, row, kind) {
                        break kind;
                    }
                };

                created.push(self.board.spawn(column, row, kind));
            }
        }
        Ok(created)
    }

    fn completes_run(&self, column: usize, row: usize, kind: SymbolKind) -> bool {
        let left = column >= 2
            && self.board.kind_at(column - 1, row) == Some(kind)
            && self.board.kind_at(column - 2, row) == Some(kind);
        let below = row >= 2
            && self.board.kind_at(column, row - 1) == Some(kind)
            && self.board.kind_at(column, row - 2) == Some(kind);
        left || below
    }

    /// Rebuild the board until at least one legal swap exists
    ///
    /// Each attempt regenerates the whole board. Resets the combo multiplier.
    pub fn shuffle(&mut self) -> Result<Vec<Piece>, LevelError> {
        for _ in 0..MAX_SHUFFLE_ATTEMPTS {
            let created = self.create_initial_pieces()?;
            if self.detect_possible_swaps() > 0 {
                self.reset_combo_multiplier();
                return Ok(created);
            }
        }
        Err(LevelError::ShuffleExhausted {
            attempts: MAX_SHUFFLE_ATTEMPTS,
        })
    }

    /// Recompute the legal swaps from scratch and return how many there are
    ///
    /// Every piece is tried against its right and upper neighbor. A swap is
    /// legal when either moved piece ends up in a run of three.
    pub fn detect_possible_swaps(&mut self) -> usize {
        let mut swaps = Vec::new();

        for row in 0..self.rows() {
            for column in 0..self.columns() {
                let Some(piece) = self.board.piece_at(column, row) else {
                    continue;
                };

                if column + 1 < self.columns() {
                    if let Some(other) = self.board.piece_at(column + 1, row) {
                        if self.swap_forms_chain((column, row), (column + 1, row)) {
                            swaps.push(Swap::new(piece, other));
                        }
                    }
                }

                if row + 1 < self.rows() {
                    if let Some(other) = self.board.piece_at(column, row + 1) {
                        if self.swap_forms_chain((column, row), (column, row + 1)) {
                            swaps.push(Swap::new(piece, other));
                        }
                    }
                }
            }
        }

        self.possible_swaps = swaps;
        self.possible_swaps.len()
    }

    /// Exchange two cells, test both for a chain, then put them back
    fn swap_forms_chain(&mut self, a: (usize, usize), b: (usize, usize)) -> bool {
        self.board.swap_cells(a, b);
        let found = matching::has_chain_at(&self.board, b.0, b.1)
            || matching::has_chain_at(&self.board, a.0, a.1);
        self.board.swap_cells(a, b);
        found
    }

    /// Whether `swap` is in the current legal set (order of the pair is irrelevant)
    pub fn is_possible_swap(&self, swap: &Swap) -> bool {
        self.possible_swaps.contains(swap)
    }

    /// First legal swap in discovery order, useful as a hint
    pub fn first_possible_swap(&self) -> Option<Swap> {
        self.possible_swaps.first().copied()
    }

    /// Exchange the two pieces of a legal swap
    ///
    /// Panics when `swap` is not in the legal set. Only positions change.
    ///
    /// The legal set describes the board before the exchange, so it is emptied
    /// here: [`Level::possible_swaps`] stays empty and
    /// [`Level::is_possible_swap`] is false for every swap until
    /// [`Level::detect_possible_swaps`] runs again.
    pub fn perform_swap(&mut self, swap: &Swap) {
        assert!(
            self.is_possible_swap(swap),
            "swap {:?} <-> {:?} is not legal",
            swap.a.position(),
            swap.b.position()
        );
        self.board.exchange(swap.a.position(), swap.b.position());
        self.possible_swaps.clear();
    }

    /// Whether the piece at `(column, row)` is part of a run of three
    pub fn has_chain_at(&self, column: usize, row: usize) -> bool {
        matching::has_chain_at(&self.board, column, row)
    }

    pub fn detect_horizontal_matches(&self) -> Vec<Chain> {
        matching::detect_horizontal_matches(&self.board)
    }

    pub fn detect_vertical_matches(&self) -> Vec<Chain> {
        matching::detect_vertical_matches(&self.board)
    }

    /// Remove every chain on the board and score it
    ///
    /// Horizontal chains are scored first, then vertical ones, each in
    /// discovery order; the combo multiplier rises by one per chain. A piece in
    /// both a horizontal and a vertical chain is removed once but counted in
    /// both chains.
    pub fn remove_matches(&mut self) -> Vec<Chain> {
        let mut chains = self.detect_horizontal_matches();
        for chain in self.detect_vertical_matches() {
            if !chains.contains(&chain) {
                chains.push(chain);
            }
        }

        for chain in &chains {
            for piece in chain.pieces() {
                self.board.remove(piece.column, piece.row);
            }
        }

        score_chains(&mut chains, &mut self.combo_multiplier);
        chains
    }

    /// Let pieces fall into empty tiles below them
    ///
    /// Each column is scanned from the bottom; an empty tile takes the nearest
    /// piece above it. Returns the moved pieces per column in fill order.
    pub fn fill_holes(&mut self) -> ColumnPieces {
        let mut columns = Vec::new();

        for column in 0..self.columns() {
            let mut moved = Vec::new();

            for row in 0..self.rows() {
                if !self.board.is_tile(column, row) || self.board.kind_at(column, row).is_some() {
                    continue;
                }

                let source =
                    (row + 1..self.rows()).find(|&r| self.board.kind_at(column, r).is_some());
                if let Some(lookup) = source {
                    if let Some(piece) = self.board.move_piece((column, lookup), (column, row)) {
                        moved.push(piece);
                    }
                }
            }

            if !moved.is_empty() {
                columns.push(moved);
            }
        }

        columns
    }

    /// Fill the empty tiles at the top of every column with new pieces
    ///
    /// Each column is walked down from the top row until an occupied cell. A
    /// new symbol always differs from the one generated just before it in this
    /// pass; runs formed with older pieces are left for the next detection.
    /// All symbols are drawn before any piece is placed, so on error the board
    /// is unchanged.
    pub fn top_up_pieces(&mut self) -> Result<ColumnPieces, LevelError> {
        let mut planned: Vec<Vec<(usize, usize, SymbolKind)>> = Vec::new();
        let mut previous: Option<SymbolKind> = None;

        for column in 0..self.columns() {
            let mut cells = Vec::new();

            for row in (0..self.rows()).rev() {
                if self.board.kind_at(column, row).is_some() {
                    break;
                }
                if !self.board.is_tile(column, row) {
                    continue;
                }

                let mut attempts = 0;
                let kind = loop {
                    if attempts == MAX_REROLL_ATTEMPTS {
                        return Err(LevelError::RerollExhausted { column, row });
                    }
                    attempts += 1;

                    let kind = random_symbol(&mut self.rng, self.symbol_count);
                    if Some(kind) != previous {
                        break kind;
                    }
                };
                previous = Some(kind);
                cells.push((column, row, kind));
            }

            if !cells.is_empty() {
                planned.push(cells);
            }
        }

        let columns = planned
            .into_iter()
            .map(|cells| {
                cells
                    .into_iter()
                    .map(|(column, row, kind)| self.board.spawn(column, row, kind))
                    .collect()
            })
            .collect();
        Ok(columns)
    }

    /// Remove, fall and top up until the board has no chains
    ///
    /// The combo multiplier keeps rising across passes; resetting it is the
    /// caller's turn boundary.
    pub fn resolve_matches(&mut self) -> Result<Resolution, LevelError> {
        let mut resolution = Resolution::default();

        for _ in 0..MAX_CASCADE_PASSES {
            let chains = self.remove_matches();
            if chains.is_empty() {
                return Ok(resolution);
            }

            let score = chains.iter().fold(0u32, |acc, c| acc.saturating_add(c.score()));
            let falls = self.fill_holes();
            let new_pieces = self.top_up_pieces()?;

            resolution.score = resolution.score.saturating_add(score);
            resolution.steps.push(CascadeStep {
                chains,
                falls,
                new_pieces,
                score,
            });
        }

        Err(LevelError::CascadeLimit {
            passes: MAX_CASCADE_PASSES,
        })
    }

    /// Value copy of the board for rendering or logging
    pub fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot::capture(self)
    }
}
