//! Cell grid data structures
//!
//! A fixed-size, row-major matrix of binary cells.

use std::fmt;

/// Position of a cell in the grid (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellPos {
    pub col: usize,
    pub row: usize,
}

impl CellPos {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub cols: usize,
    pub rows: usize,
}

impl GridSize {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.cols * self.rows
    }
}

/// Binary cell matrix (alive = `true`, dead = `false`)
///
/// The dimensions never change after construction; loading a pattern
/// replaces the whole grid. Indexing outside the grid panics, since every
/// caller is expected to go through the viewport's clamped coordinates.
#[derive(Clone, PartialEq, Eq)]
pub struct CellGrid {
    size: GridSize,
    cells: Vec<bool>,
}

impl CellGrid {
    /// Create a grid with every cell dead
    pub fn new(size: GridSize) -> Self {
        assert!(
            size.cols > 0 && size.rows > 0,
            "grid dimensions must be at least 1x1, got {}x{}",
            size.cols,
            size.rows
        );
        Self {
            size,
            cells: vec![false; size.area()],
        }
    }

    /// Build a grid from rows of 0/1 values (any non-zero value is alive)
    ///
    /// All rows must have the same, non-zero length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut grid = Self::new(GridSize::new(cols, rows.len()));
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            assert_eq!(values.len(), cols, "row {} has a different width", row);
            for (col, &value) in values.iter().enumerate() {
                grid.set(CellPos::new(col, row), value != 0);
            }
        }
        grid
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cols(&self) -> usize {
        self.size.cols
    }

    pub fn rows(&self) -> usize {
        self.size.rows
    }

    #[inline]
    fn index(&self, pos: CellPos) -> usize {
        assert!(
            pos.col < self.size.cols && pos.row < self.size.rows,
            "cell ({}, {}) is outside the {}x{} grid",
            pos.col,
            pos.row,
            self.size.cols,
            self.size.rows
        );
        pos.row * self.size.cols + pos.col
    }

    /// Whether the cell is alive
    #[inline]
    pub fn get(&self, pos: CellPos) -> bool {
        self.cells[self.index(pos)]
    }

    pub fn set(&mut self, pos: CellPos, alive: bool) {
        let idx = self.index(pos);
        self.cells[idx] = alive;
    }

    /// Flip a cell, returning its new state
    pub fn toggle(&mut self, pos: CellPos) -> bool {
        let idx = self.index(pos);
        self.cells[idx] = !self.cells[idx];
        self.cells[idx]
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[bool] {
        assert!(row < self.size.rows, "row {} is outside the grid", row);
        let start = row * self.size.cols;
        &self.cells[start..start + self.size.cols]
    }

    /// Iterate over the rows, top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.size.cols)
    }

    /// Copy out the grid as rows of 0/1 values
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.iter_rows()
            .map(|row| row.iter().map(|&alive| u8::from(alive)).collect())
            .collect()
    }
}

// Summary only: a managed grid holds one cell per surface pixel.
impl fmt::Debug for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellGrid")
            .field("cols", &self.size.cols)
            .field("rows", &self.size.rows)
            .field("alive", &self.alive_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_dead() {
        let grid = CellGrid::new(GridSize::new(4, 3));
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut grid = CellGrid::new(GridSize::new(2, 2));
        assert!(grid.toggle(CellPos::new(1, 0)));
        assert!(grid.get(CellPos::new(1, 0)));
        assert!(!grid.toggle(CellPos::new(1, 0)));
        assert!(!grid.get(CellPos::new(1, 0)));
    }

    #[test]
    fn test_from_rows_is_row_major() {
        let grid = CellGrid::from_rows(&[vec![1u8, 0, 0], vec![0, 0, 1]]);
        assert_eq!(grid.size(), GridSize::new(3, 2));
        assert!(grid.get(CellPos::new(0, 0)));
        assert!(grid.get(CellPos::new(2, 1)));
        assert!(!grid.get(CellPos::new(2, 0)));
        assert_eq!(grid.to_rows(), vec![vec![1, 0, 0], vec![0, 0, 1]]);
    }

    #[test]
    fn test_clear() {
        let mut grid = CellGrid::from_rows(&[[1u8, 1], [1, 1]]);
        grid.clear();
        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn test_row_slice() {
        let grid = CellGrid::from_rows(&[[0u8, 1], [1, 1]]);
        assert_eq!(grid.row(0), &[false, true]);
        assert_eq!(grid.iter_rows().count(), 2);
    }

    #[test]
    #[should_panic(expected = "outside the 2x2 grid")]
    fn test_out_of_bounds_panics() {
        let grid = CellGrid::new(GridSize::new(2, 2));
        grid.get(CellPos::new(2, 0));
    }

    #[test]
    fn test_debug_is_summarized() {
        let grid = CellGrid::from_rows(&[[1u8, 0], [0, 1]]);
        let text = format!("{:?}", grid);
        assert_eq!(text, "CellGrid { cols: 2, rows: 2, alive: 2 }");
    }
}
