//! A fixed-size cell set packed into an unsigned integer.
//!
//! `BitBoard<T, N>` stores an `N×N` board in the low `N*N` bits of `T`
//! (row-major). It is `no_std` friendly and never allocates. Grids, ship
//! footprints and adjacency buffers are all expressed as bitboards so that
//! overlap checks reduce to a single `&`.

use core::ops::{BitAnd, BitOr, BitOrAssign};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::grid::Cell;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Row or column index is out of bounds [0..N).
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

/// A fixed-size N×N set of cells stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    // Fails to compile when the board does not fit in `T`.
    const FITS: () = assert!(N * N <= mem::size_of::<T>() * 8, "board does not fit in T");

    /// Create an empty bitboard.
    #[inline]
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS;
        BitBoard { bits: T::zero() }
    }

    /// Number of set cells.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns true if no cells are set.
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Whether `cell` is set.
    pub fn get(&self, cell: Cell) -> Result<bool, BitBoardError> {
        let idx = Self::index(cell)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    /// Set `cell`.
    pub fn set(&mut self, cell: Cell) -> Result<(), BitBoardError> {
        let idx = Self::index(cell)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    #[inline]
    fn index(cell: Cell) -> Result<usize, BitBoardError> {
        if cell.row >= N || cell.col >= N {
            Err(BitBoardError::IndexOutOfBounds {
                row: cell.row,
                col: cell.col,
            })
        } else {
            Ok(cell.row * N + cell.col)
        }
    }

    /// Build a bitboard from a sequence of cells, failing on the first one
    /// outside the board.
    pub fn from_cells<I>(cells: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut board = Self::new();
        for cell in cells {
            board.set(cell)?;
        }
        Ok(board)
    }

    /// The set grown by one cell in all eight directions, clipped to the
    /// board. Applied to a ship footprint this yields the footprint plus its
    /// adjacency ring.
    pub fn dilate(&self) -> Self {
        let mut grown = *self;
        for cell in self.cells() {
            let rows = cell.row.saturating_sub(1)..=(cell.row + 1).min(N - 1);
            for r in rows {
                let cols = cell.col.saturating_sub(1)..=(cell.col + 1).min(N - 1);
                for c in cols {
                    grown.bits = grown.bits | (T::one() << (r * N + c));
                }
            }
        }
        grown
    }

    /// Iterator over the set cells in row-major order.
    #[inline]
    pub fn cells(&self) -> Cells<T, N> {
        Cells {
            bits: self.bits,
            idx: 0,
        }
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}>:", N)?;
        fmt::Display::fmt(self, f)
    }
}

impl<T, const N: usize> fmt::Display for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..N {
            for c in 0..N {
                let bit = if ((self.bits >> (r * N + c)) & T::one()) != T::zero() {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            if r + 1 < N {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set cells of a bitboard.
#[derive(Clone, Copy)]
pub struct Cells<T, const N: usize> {
    bits: T,
    idx: usize,
}

impl<T, const N: usize> Iterator for Cells<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if ((self.bits >> idx) & T::one()) != T::zero() {
                return Some(Cell::new(idx / N, idx % N));
            }
        }
        None
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits | rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOrAssign for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}
