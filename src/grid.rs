//! Per-side occupancy and shot tracking.

use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::CoreError;
use crate::config::BOARD_SIZE;

/// Bitboard sized for the classic board.
pub type BB = BitBoard<u128, BOARD_SIZE>;

/// A board coordinate. Construction is unchecked; every grid operation
/// bounds-checks and reports [`CoreError::OutOfBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the cell lies on the N×N board.
    pub const fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One side's board: which cells hold a ship segment and which have been
/// fired upon. Placement writes occupancy during setup, attacks write shots
/// during play.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Grid {
    occupied: BB,
    shots: BB,
}

impl Grid {
    /// An empty grid: nothing occupied, nothing shot.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_occupied(&self, cell: Cell) -> Result<bool, CoreError> {
        Ok(self.occupied.get(cell)?)
    }

    pub fn set_occupied(&mut self, cell: Cell) -> Result<(), CoreError> {
        Ok(self.occupied.set(cell)?)
    }

    pub fn is_shot(&self, cell: Cell) -> Result<bool, CoreError> {
        Ok(self.shots.get(cell)?)
    }

    /// Mark `cell` as fired upon. Marking twice is harmless.
    pub fn mark_shot(&mut self, cell: Cell) -> Result<(), CoreError> {
        Ok(self.shots.set(cell)?)
    }

    /// All occupied cells.
    pub fn occupancy(&self) -> BB {
        self.occupied
    }

    /// All cells fired upon.
    pub fn shots(&self) -> BB {
        self.shots
    }

    /// Cells fired upon that held a ship segment.
    pub fn hits(&self) -> BB {
        self.shots & self.occupied
    }

    /// Number of cells not yet fired upon.
    pub fn unshot_count(&self) -> usize {
        BOARD_SIZE * BOARD_SIZE - self.shots.count_ones()
    }

    /// Commit every cell of `footprint` as occupied.
    pub(crate) fn occupy(&mut self, footprint: BB) {
        self.occupied |= footprint;
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grid {{\n  occupied:\n{}\n  shots:\n{}\n}}",
            self.occupied, self.shots
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_grid_is_empty() {
        let grid = Grid::new();
        assert!(grid.occupancy().is_empty());
        assert_eq!(grid.unshot_count(), 100);
    }

    #[test]
    fn shots_and_occupancy_are_independent() {
        let mut grid = Grid::new();
        grid.set_occupied(Cell::new(2, 3)).unwrap();
        grid.mark_shot(Cell::new(2, 3)).unwrap();
        grid.mark_shot(Cell::new(5, 5)).unwrap();
        assert!(grid.is_occupied(Cell::new(2, 3)).unwrap());
        assert!(!grid.is_occupied(Cell::new(5, 5)).unwrap());
        assert_eq!(grid.hits().count_ones(), 1);
        assert_eq!(grid.unshot_count(), 98);
    }

    #[test]
    fn out_of_range_cells_fail() {
        let mut grid = Grid::new();
        let err = CoreError::OutOfBounds { row: 0, col: 10 };
        assert_eq!(grid.is_occupied(Cell::new(0, 10)), Err(err.clone()));
        assert_eq!(grid.set_occupied(Cell::new(0, 10)), Err(err.clone()));
        assert_eq!(grid.is_shot(Cell::new(0, 10)), Err(err.clone()));
        assert_eq!(grid.mark_shot(Cell::new(0, 10)), Err(err));
        assert_eq!(grid, Grid::new());
    }
}
