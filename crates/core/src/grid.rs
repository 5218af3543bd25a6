//! Grid module - fixed-size sparse 2D storage
//!
//! A `columns x rows` grid where each cell is either empty or holds a `T`.
//! Storage is a flat vector in row-major order (`row * columns + column`).
//! Coordinates are `(column, row)`, row 0 at the bottom.
//!
//! Every accessor is range-checked and panics on an out-of-range coordinate.
//! Callers that are unsure use [`Grid::contains`] first.

/// Sparse 2D container with fixed dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    columns: usize,
    rows: usize,
    /// Flat array of cells, row-major order (row * columns + column)
    cells: Vec<Option<T>>,
}

impl<T> Grid<T> {
    /// Create an empty grid
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut cells = Vec::with_capacity(columns * rows);
        cells.resize_with(columns * rows, || None);
        Self {
            columns,
            rows,
            cells,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Check whether `(column, row)` lies inside the grid
    #[inline]
    pub fn contains(&self, column: usize, row: usize) -> bool {
        column < self.columns && row < self.rows
    }

    #[inline(always)]
    fn index(&self, column: usize, row: usize) -> usize {
        assert!(
            self.contains(column, row),
            "grid coordinate ({}, {}) outside {}x{}",
            column,
            row,
            self.columns,
            self.rows
        );
        row * self.columns + column
    }

    /// Occupant at `(column, row)`, if any
    pub fn get(&self, column: usize, row: usize) -> Option<&T> {
        let idx = self.index(column, row);
        self.cells[idx].as_ref()
    }

    /// Replace the occupant at `(column, row)`, returning the previous one
    pub fn set(&mut self, column: usize, row: usize, value: Option<T>) -> Option<T> {
        let idx = self.index(column, row);
        std::mem::replace(&mut self.cells[idx], value)
    }

    /// Remove and return the occupant at `(column, row)`
    pub fn take(&mut self, column: usize, row: usize) -> Option<T> {
        let idx = self.index(column, row);
        self.cells[idx].take()
    }

    pub fn is_occupied(&self, column: usize, row: usize) -> bool {
        self.get(column, row).is_some()
    }

    /// Exchange the contents of two cells
    pub fn swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        let ia = self.index(a.0, a.1);
        let ib = self.index(b.0, b.1);
        self.cells.swap(ia, ib);
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Iterate occupied cells as `(column, row, &T)` in storage order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| cell.as_ref().map(|v| (idx % columns, idx / columns, v)))
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}
