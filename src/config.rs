//! Fixed rules of the classic game and tunable bounds.

use core::time::Duration;

use crate::ship::ShipKind;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;

/// The classic fleet in placement order: largest footprint first.
pub const CLASSIC_FLEET: [ShipKind; NUM_SHIPS] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];

/// Total number of ship segments in the classic fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Random draws allowed for a single ship before giving up on it.
pub const MAX_SHIP_ATTEMPTS: usize = 500;

/// Full-board restarts allowed when a fleet cannot be completed.
pub const MAX_FLEET_RESETS: usize = 10;

/// Bounds for randomized fleet placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementLimits {
    pub ship_attempts: usize,
    pub fleet_resets: usize,
}

impl Default for PlacementLimits {
    fn default() -> Self {
        Self {
            ship_attempts: MAX_SHIP_ATTEMPTS,
            fleet_resets: MAX_FLEET_RESETS,
        }
    }
}

/// Cosmetic delays a presentation layer may apply after an event. The
/// match state has already advanced when a hint is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub coin_flip: Duration,
    pub after_attack: Duration,
    pub opponent_think: Duration,
}

impl Pacing {
    /// No delays at all.
    pub const fn instant() -> Self {
        Self {
            coin_flip: Duration::ZERO,
            after_attack: Duration::ZERO,
            opponent_think: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            coin_flip: Duration::from_millis(2000),
            after_attack: Duration::from_millis(3000),
            opponent_think: Duration::from_millis(1000),
        }
    }
}
