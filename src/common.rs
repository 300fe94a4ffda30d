//! Common types: sides, attack results and the engine error.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::config::NUM_SHIPS;
use crate::game::Phase;
use crate::grid::Cell;
use crate::ship::{Orientation, ShipKind};

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Side {
    /// The human.
    Player,
    /// The automated opponent.
    Opponent,
}

impl Side {
    /// The other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a resolved (non-stale) attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct AttackResult {
    pub hit: bool,
    /// The hit ship is now fully sunk.
    pub sunk: bool,
    /// Kind of the ship that was hit, if any.
    pub ship: Option<ShipKind>,
    /// Index of the segment that was hit, counted from the ship's origin.
    pub segment: Option<usize>,
}

impl AttackResult {
    pub const MISS: AttackResult = AttackResult {
        hit: false,
        sunk: false,
        ship: None,
        segment: None,
    };
}

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementIssue {
    /// Origin or extent falls outside the board.
    OffBoard,
    /// A footprint cell is already occupied.
    Overlaps,
    /// A footprint cell touches another ship, diagonals included.
    TouchesShip,
}

impl fmt::Display for PlacementIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementIssue::OffBoard => write!(f, "ship does not fit on the board"),
            PlacementIssue::Overlaps => write!(f, "ship overlaps another ship"),
            PlacementIssue::TouchesShip => write!(f, "ship touches another ship"),
        }
    }
}

/// Errors returned by engine operations. Every failing call leaves grids,
/// fleets and match state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Cell reference outside the N×N board.
    OutOfBounds { row: usize, col: usize },
    /// Manual placement violates the fit, overlap or adjacency rules.
    InvalidPlacement {
        kind: ShipKind,
        origin: Cell,
        orientation: Orientation,
        issue: PlacementIssue,
    },
    /// Random placement of a single ship ran out of attempts.
    PlacementExhausted { kind: ShipKind, attempts: usize },
    /// Random placement of the whole fleet ran out of full resets.
    FleetPlacementFailed { resets: usize },
    /// The fleet already holds a ship of this kind.
    ShipAlreadyPlaced(ShipKind),
    /// Setup finished before every ship was placed.
    FleetIncomplete { placed: usize },
    /// Every ship of the fleet is already placed.
    FleetAlreadyComplete,
    /// A grid's occupancy does not match the fleet deployed with it.
    LayoutMismatch { side: Side },
    /// Operation not allowed in the current phase.
    WrongPhase { expected: Phase, actual: Phase },
    /// Every cell of the target grid has already been shot.
    NoTargetsRemaining,
}

impl From<BitBoardError> for CoreError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::IndexOutOfBounds { row, col } => CoreError::OutOfBounds { row, col },
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the board", row, col)
            }
            CoreError::InvalidPlacement {
                kind,
                origin,
                orientation,
                issue,
            } => write!(
                f,
                "cannot place {} at {} {:?}: {}",
                kind, origin, orientation, issue
            ),
            CoreError::PlacementExhausted { kind, attempts } => {
                write!(f, "no room for {} after {} attempts", kind, attempts)
            }
            CoreError::FleetPlacementFailed { resets } => write!(
                f,
                "fleet placement failed after {} full resets; board and fleet sizes are inconsistent",
                resets
            ),
            CoreError::ShipAlreadyPlaced(kind) => write!(f, "{} is already placed", kind),
            CoreError::FleetIncomplete { placed } => {
                write!(f, "fleet incomplete: {} of {} ships placed", placed, NUM_SHIPS)
            }
            CoreError::FleetAlreadyComplete => write!(f, "every ship is already placed"),
            CoreError::LayoutMismatch { side } => {
                write!(f, "{} grid occupancy does not match its fleet", side)
            }
            CoreError::WrongPhase { expected, actual } => {
                write!(f, "expected phase {:?}, match is in {:?}", expected, actual)
            }
            CoreError::NoTargetsRemaining => write!(f, "every cell has already been shot"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}
