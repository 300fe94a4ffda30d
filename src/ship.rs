//! Ship kinds and placed ships with per-segment hit tracking.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::CoreError;
use crate::config::BOARD_SIZE;
use crate::grid::{Cell, BB};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Extends along the row, towards higher columns.
    Horizontal,
    /// Extends along the column, towards higher rows.
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// The `i`-th cell of a ship starting at `origin`.
    pub(crate) fn step(self, origin: Cell, i: usize) -> Cell {
        match self {
            Orientation::Horizontal => Cell::new(origin.row, origin.col + i),
            Orientation::Vertical => Cell::new(origin.row + i, origin.col),
        }
    }
}

/// The five ship classes of the classic fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipKind {
    /// Number of segments.
    pub const fn size(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser => 3,
            ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
        }
    }

    /// Display name, e.g. `Carrier`.
    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
        }
    }

    /// Lowercase identifier used in results, e.g. `destroyer`.
    pub const fn id(self) -> &'static str {
        match self {
            ShipKind::Carrier => "carrier",
            ShipKind::Battleship => "battleship",
            ShipKind::Cruiser => "cruiser",
            ShipKind::Submarine => "submarine",
            ShipKind::Destroyer => "destroyer",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The cells covered by a ship of `size` at `origin`, or `None` if any of
/// them falls off the board.
pub fn footprint(size: usize, origin: Cell, orientation: Orientation) -> Option<BB> {
    if !origin.in_bounds() || size == 0 {
        return None;
    }
    let end = match orientation {
        Orientation::Horizontal => origin.col + size,
        Orientation::Vertical => origin.row + size,
    };
    if end > BOARD_SIZE {
        return None;
    }
    BB::from_cells((0..size).map(|i| orientation.step(origin, i))).ok()
}

/// A ship committed to a fleet.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Ship {
    kind: ShipKind,
    origin: Cell,
    orientation: Orientation,
    hits: Vec<bool>,
}

impl Ship {
    /// Build an unhit ship, checking only that it fits on the board.
    pub fn new(kind: ShipKind, origin: Cell, orientation: Orientation) -> Result<Self, CoreError> {
        if footprint(kind.size(), origin, orientation).is_none() {
            return Err(CoreError::InvalidPlacement {
                kind,
                origin,
                orientation,
                issue: crate::common::PlacementIssue::OffBoard,
            });
        }
        Ok(Ship {
            kind,
            origin,
            orientation,
            hits: vec![false; kind.size()],
        })
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.hits.len()
    }

    pub fn origin(&self) -> Cell {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Per-segment hit flags, origin first.
    pub fn hit_mask(&self) -> &[bool] {
        &self.hits
    }

    /// Cells covered by the ship, origin first.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size()).map(move |i| self.orientation.step(self.origin, i))
    }

    /// Footprint as a bitboard.
    pub fn footprint(&self) -> BB {
        BB::from_cells(self.cells()).unwrap_or_default()
    }

    /// Segment index covering `cell`, if the ship covers it.
    pub fn segment_of(&self, cell: Cell) -> Option<usize> {
        let (along, across, fixed) = match self.orientation {
            Orientation::Horizontal => (cell.col, cell.row, self.origin.row),
            Orientation::Vertical => (cell.row, cell.col, self.origin.col),
        };
        let start = match self.orientation {
            Orientation::Horizontal => self.origin.col,
            Orientation::Vertical => self.origin.row,
        };
        if across != fixed || along < start || along >= start + self.size() {
            return None;
        }
        Some(along - start)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.segment_of(cell).is_some()
    }

    /// Mark the segment at `cell` as hit. Returns the segment index, or
    /// `None` if the ship does not cover `cell`. Hitting a segment twice is
    /// harmless.
    pub fn register_hit(&mut self, cell: Cell) -> Option<usize> {
        let segment = self.segment_of(cell)?;
        self.hits[segment] = true;
        Some(segment)
    }

    /// Every segment has been hit.
    pub fn is_sunk(&self) -> bool {
        self.hits.iter().all(|&h| h)
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ kind: {}, origin: {}, orientation: {:?}, hits: {}/{} }}",
            self.kind,
            self.origin,
            self.orientation,
            self.hits.iter().filter(|&&h| h).count(),
            self.size(),
        )
    }
}
