//! Ship placement: validation, manual commits and randomized fleet layout.
//!
//! Ships may not overlap and may not touch, diagonals included: every ship
//! is surrounded by a one-cell buffer of open water. Randomized placement is
//! bounded at two levels. A single ship gets a fixed number of random draws;
//! if any ship runs out, the whole fleet is discarded and laid out again on
//! a fresh grid, up to a fixed number of rounds.

use log::{debug, warn};
use rand::Rng;

use crate::common::{CoreError, PlacementIssue};
use crate::config::{PlacementLimits, BOARD_SIZE, CLASSIC_FLEET, MAX_SHIP_ATTEMPTS};
use crate::fleet::Fleet;
use crate::grid::{Cell, Grid};
use crate::ship::{footprint, Orientation, Ship, ShipKind};

/// Check a prospective placement, reporting the first rule it breaks.
pub fn check_placement(
    grid: &Grid,
    size: usize,
    origin: Cell,
    orientation: Orientation,
) -> Result<(), PlacementIssue> {
    let cells = footprint(size, origin, orientation).ok_or(PlacementIssue::OffBoard)?;
    let occupied = grid.occupancy();
    if !(cells & occupied).is_empty() {
        return Err(PlacementIssue::Overlaps);
    }
    if !(cells.dilate() & occupied).is_empty() {
        return Err(PlacementIssue::TouchesShip);
    }
    Ok(())
}

/// True iff a ship of `size` fits on the board at `origin` and neither its
/// footprint nor the ring of cells around it is occupied.
pub fn validate_placement(grid: &Grid, size: usize, origin: Cell, orientation: Orientation) -> bool {
    check_placement(grid, size, origin, orientation).is_ok()
}

/// Validate and commit a ship to `grid`. The grid is untouched on error.
pub fn place_manual(
    grid: &mut Grid,
    kind: ShipKind,
    origin: Cell,
    orientation: Orientation,
) -> Result<Ship, CoreError> {
    check_placement(grid, kind.size(), origin, orientation).map_err(|issue| {
        CoreError::InvalidPlacement {
            kind,
            origin,
            orientation,
            issue,
        }
    })?;
    let ship = Ship::new(kind, origin, orientation)?;
    grid.occupy(ship.footprint());
    debug!("placed {} at {} {:?}", kind, origin, orientation);
    Ok(ship)
}

/// Draw a uniformly random orientation and an origin from which a ship of
/// `size` stays on the board.
fn random_origin<R: Rng + ?Sized>(rng: &mut R, size: usize) -> (Cell, Orientation) {
    let orientation = if rng.random() {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    };
    let (max_row, max_col) = match orientation {
        Orientation::Vertical => (BOARD_SIZE - size, BOARD_SIZE - 1),
        Orientation::Horizontal => (BOARD_SIZE - 1, BOARD_SIZE - size),
    };
    let row = rng.random_range(0..=max_row);
    let col = rng.random_range(0..=max_col);
    (Cell::new(row, col), orientation)
}

/// Place `kind` at the first valid random position, trying at most
/// `attempts` draws.
pub fn place_random_within<R: Rng + ?Sized>(
    grid: &mut Grid,
    kind: ShipKind,
    rng: &mut R,
    attempts: usize,
) -> Result<Ship, CoreError> {
    let found = (0..attempts)
        .map(|_| random_origin(rng, kind.size()))
        .find(|&(origin, orientation)| validate_placement(grid, kind.size(), origin, orientation));
    match found {
        Some((origin, orientation)) => place_manual(grid, kind, origin, orientation),
        None => Err(CoreError::PlacementExhausted { kind, attempts }),
    }
}

/// Place `kind` at a random valid position using the default attempt bound.
pub fn place_random<R: Rng + ?Sized>(
    grid: &mut Grid,
    kind: ShipKind,
    rng: &mut R,
) -> Result<Ship, CoreError> {
    place_random_within(grid, kind, rng, MAX_SHIP_ATTEMPTS)
}

/// One full layout attempt on a fresh grid.
fn lay_out_fleet<R: Rng + ?Sized>(rng: &mut R, attempts: usize) -> Result<(Grid, Fleet), CoreError> {
    let mut grid = Grid::new();
    let mut fleet = Fleet::new();
    // CLASSIC_FLEET is ordered largest first.
    for kind in CLASSIC_FLEET {
        let ship = place_random_within(&mut grid, kind, rng, attempts)?;
        fleet.register(ship)?;
    }
    Ok((grid, fleet))
}

/// Lay out the whole classic fleet at random with explicit bounds. On
/// success `grid` is replaced by the new layout; on failure it is untouched.
pub fn place_fleet_random_with<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    limits: PlacementLimits,
) -> Result<Fleet, CoreError> {
    let layout = (0..limits.fleet_resets).find_map(|round| {
        lay_out_fleet(rng, limits.ship_attempts)
            .map_err(|err| warn!("fleet layout round {} failed ({}), resetting board", round + 1, err))
            .ok()
    });
    match layout {
        Some((placed, fleet)) => {
            *grid = placed;
            Ok(fleet)
        }
        None => Err(CoreError::FleetPlacementFailed {
            resets: limits.fleet_resets,
        }),
    }
}

/// Lay out the whole classic fleet at random with the default bounds.
pub fn place_fleet_random<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Result<Fleet, CoreError> {
    place_fleet_random_with(grid, rng, PlacementLimits::default())
}

/// Interactive placement of the classic fleet, one ship at a time in the
/// fixed order carrier, battleship, cruiser, submarine, destroyer.
#[derive(Debug, Clone)]
pub struct PlacementSession {
    grid: Grid,
    fleet: Fleet,
    orientation: Orientation,
}

impl Default for PlacementSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementSession {
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            fleet: Fleet::new(),
            orientation: Orientation::Horizontal,
        }
    }

    /// The ship to place next, or `None` once the fleet is complete.
    pub fn current(&self) -> Option<ShipKind> {
        CLASSIC_FLEET.get(self.fleet.len()).copied()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Flip between horizontal and vertical.
    pub fn rotate(&mut self) -> Orientation {
        self.orientation = self.orientation.rotated();
        self.orientation
    }

    /// Whether the current ship could go at `origin` with the current
    /// orientation.
    pub fn preview(&self, origin: Cell) -> bool {
        self.current()
            .map(|kind| validate_placement(&self.grid, kind.size(), origin, self.orientation))
            .unwrap_or(false)
    }

    /// Place the current ship at `origin` with the current orientation.
    pub fn place(&mut self, origin: Cell) -> Result<&Ship, CoreError> {
        let kind = self.current().ok_or(CoreError::FleetAlreadyComplete)?;
        let ship = place_manual(&mut self.grid, kind, origin, self.orientation)?;
        self.commit(ship)
    }

    /// Place the current ship at a random valid position.
    pub fn place_current_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Ship, CoreError> {
        let kind = self.current().ok_or(CoreError::FleetAlreadyComplete)?;
        let ship = place_random(&mut self.grid, kind, rng)?;
        self.commit(ship)
    }

    fn commit(&mut self, ship: Ship) -> Result<&Ship, CoreError> {
        let id = self.fleet.register(ship)?;
        Ok(&self.fleet.ships()[id])
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn is_complete(&self) -> bool {
        self.current().is_none()
    }

    /// Hand over the finished layout.
    pub fn finish(self) -> Result<(Grid, Fleet), CoreError> {
        if !self.is_complete() {
            return Err(CoreError::FleetIncomplete {
                placed: self.fleet.len(),
            });
        }
        Ok((self.grid, self.fleet))
    }
}
