//! Level definition - the already-decoded shape and goals of a level
//!
//! Decoding level files happens elsewhere. This module only validates the
//! decoded values and converts the tile rows into the engine's orientation:
//! source row 0 is the top of the board, internal row 0 is the bottom.

use crate::error::LevelError;
use crate::grid::Grid;
use crate::types::{
    SymbolKind, Tile, DEFAULT_SYMBOL_COUNT, MAX_DIMENSION, MIN_SYMBOL_COUNT,
};

/// Board shape plus target score and move budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDefinition {
    tiles: Grid<Tile>,
    target_score: u32,
    maximum_moves: u32,
    symbol_count: u8,
}

impl LevelDefinition {
    /// Build from 0/1 rows listed top to bottom
    ///
    /// # Examples
    ///
    /// ```
    /// use match_three_core::LevelDefinition;
    ///
    /// let def = LevelDefinition::from_rows(
    ///     &[vec![0, 1, 1], vec![1, 1, 1]],
    ///     500,
    ///     10,
    /// )
    /// .unwrap();
    ///
    /// // The first source row is the top row of the board.
    /// assert!(!def.is_tile(0, 1));
    /// assert!(def.is_tile(0, 0));
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(
        rows: &[R],
        target_score: u32,
        maximum_moves: u32,
    ) -> Result<Self, LevelError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        check_dimensions(width, height)?;

        let mut tiles = Grid::new(width, height);
        for (source_row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(LevelError::InvalidDefinition(format!(
                    "row {} has {} cells, expected {}",
                    source_row,
                    values.len(),
                    width
                )));
            }

            let row = height - source_row - 1;
            for (column, &value) in values.iter().enumerate() {
                match value {
                    0 => {}
                    1 => {
                        tiles.set(column, row, Some(Tile));
                    }
                    other => {
                        return Err(LevelError::InvalidDefinition(format!(
                            "cell ({}, {}) has value {}, expected 0 or 1",
                            column, source_row, other
                        )))
                    }
                }
            }
        }

        Ok(Self {
            tiles,
            target_score,
            maximum_moves,
            symbol_count: DEFAULT_SYMBOL_COUNT,
        })
    }

    /// Every cell of a `columns x rows` board is playable
    pub fn full(
        columns: usize,
        rows: usize,
        target_score: u32,
        maximum_moves: u32,
    ) -> Result<Self, LevelError> {
        check_dimensions(columns, rows)?;
        let mut tiles = Grid::new(columns, rows);
        for row in 0..rows {
            for column in 0..columns {
                tiles.set(column, row, Some(Tile));
            }
        }
        Ok(Self {
            tiles,
            target_score,
            maximum_moves,
            symbol_count: DEFAULT_SYMBOL_COUNT,
        })
    }

    /// Use `count` distinct symbols for random fills
    pub fn with_symbol_count(mut self, count: u8) -> Result<Self, LevelError> {
        if !(MIN_SYMBOL_COUNT..=SymbolKind::COUNT).contains(&count) {
            return Err(LevelError::InvalidDefinition(format!(
                "symbol count {} outside {}..={}",
                count,
                MIN_SYMBOL_COUNT,
                SymbolKind::COUNT
            )));
        }
        self.symbol_count = count;
        Ok(self)
    }

    pub fn columns(&self) -> usize {
        self.tiles.columns()
    }

    pub fn rows(&self) -> usize {
        self.tiles.rows()
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

    /// Whether `(column, row)` (internal orientation) is playable
    pub fn is_tile(&self, column: usize, row: usize) -> bool {
        self.tiles.is_occupied(column, row)
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }
}

fn check_dimensions(columns: usize, rows: usize) -> Result<(), LevelError> {
    if columns == 0 || rows == 0 {
        return Err(LevelError::InvalidDefinition(
            "board has no cells".to_string(),
        ));
    }
    if columns > MAX_DIMENSION || rows > MAX_DIMENSION {
        return Err(LevelError::InvalidDefinition(format!(
            "board {}x{} exceeds {}x{}",
            columns, rows, MAX_DIMENSION, MAX_DIMENSION
        )));
    }
    Ok(())
}
