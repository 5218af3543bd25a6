use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::level::Level;
use crate::rng::RandomSource;
use crate::types::SymbolKind;

/// Plain copy of a level's board
///
/// Cells are stored row-major with row 0 at the bottom. `Display` draws the
/// board top row first: a digit per piece, `.` for an empty tile and a space
/// for a cell outside the mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LevelSnapshot {
    pub columns: usize,
    pub rows: usize,
    pub tiles: Vec<bool>,
    pub symbols: Vec<Option<SymbolKind>>,
    pub combo_multiplier: u32,
    pub possible_swaps: usize,
}

impl LevelSnapshot {
    pub fn capture<R: RandomSource>(level: &Level<R>) -> Self {
        let board = level.board();
        let (columns, rows) = (board.columns(), board.rows());
        let mut tiles = Vec::with_capacity(columns * rows);
        let mut symbols = Vec::with_capacity(columns * rows);

        for row in 0..rows {
            for column in 0..columns {
                tiles.push(board.is_tile(column, row));
                symbols.push(board.kind_at(column, row));
            }
        }

        Self {
            columns,
            rows,
            tiles,
            symbols,
            combo_multiplier: level.combo_multiplier(),
            possible_swaps: level.possible_swaps().len(),
        }
    }

    pub fn symbol_at(&self, column: usize, row: usize) -> Option<SymbolKind> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.symbols[row * self.columns + column]
    }

    pub fn is_full(&self) -> bool {
        self.tiles
            .iter()
            .zip(&self.symbols)
            .all(|(tile, symbol)| !tile || symbol.is_some())
    }
}

impl fmt::Display for LevelSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for column in 0..self.columns {
                let idx = row * self.columns + column;
                let ch = match (self.tiles[idx], self.symbols[idx]) {
                    (false, _) => ' ',
                    (true, None) => '.',
                    (true, Some(kind)) => char::from(b'0' + kind.raw()),
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
