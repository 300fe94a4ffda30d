//! Fleets: the ships owned by each side and their damage.

use alloc::vec::Vec;

use crate::common::{CoreError, PlacementIssue, Side};
use crate::config::{CLASSIC_FLEET, NUM_SHIPS};
use crate::grid::{Cell, BB};
use crate::ship::{Ship, ShipKind};

/// Index of a ship within its fleet.
pub type ShipId = usize;

/// A hit landed on a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitReport {
    pub kind: ShipKind,
    pub segment: usize,
    /// The ship is fully sunk after this hit.
    pub sunk: bool,
}

/// One side's ships. Ships are stored by value; the grid only carries
/// occupancy flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a ship. A fleet holds at most one ship of each kind, and no
    /// ship may overlap or touch another.
    pub fn register(&mut self, ship: Ship) -> Result<ShipId, CoreError> {
        if self.contains_kind(ship.kind()) {
            return Err(CoreError::ShipAlreadyPlaced(ship.kind()));
        }
        let footprint = ship.footprint();
        if let Some(other) = self
            .ships
            .iter()
            .find(|s| !(s.footprint().dilate() & footprint).is_empty())
        {
            let issue = if (other.footprint() & footprint).is_empty() {
                PlacementIssue::TouchesShip
            } else {
                PlacementIssue::Overlaps
            };
            return Err(CoreError::InvalidPlacement {
                kind: ship.kind(),
                origin: ship.origin(),
                orientation: ship.orientation(),
                issue,
            });
        }
        self.ships.push(ship);
        Ok(self.ships.len() - 1)
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Every kind of the classic fleet is present.
    pub fn is_complete(&self) -> bool {
        self.ships.len() == NUM_SHIPS && CLASSIC_FLEET.iter().all(|k| self.contains_kind(*k))
    }

    pub fn contains_kind(&self, kind: ShipKind) -> bool {
        self.ships.iter().any(|s| s.kind() == kind)
    }

    /// Record a shot at `cell`. `None` means no ship covers the cell.
    pub fn record_hit(&mut self, cell: Cell) -> Option<HitReport> {
        self.ships.iter_mut().find_map(|ship| {
            ship.register_hit(cell).map(|segment| HitReport {
                kind: ship.kind(),
                segment,
                sunk: ship.is_sunk(),
            })
        })
    }

    /// Whether every ship is sunk. An empty fleet is never defeated.
    pub fn is_defeated(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    pub fn ship_at(&self, cell: Cell) -> Option<&Ship> {
        self.ships.iter().find(|s| s.contains(cell))
    }

    /// Ships still afloat.
    pub fn afloat(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Union of every ship footprint.
    pub fn occupancy(&self) -> BB {
        self.ships
            .iter()
            .fold(BB::new(), |acc, ship| acc | ship.footprint())
    }
}

/// Both sides' fleets. No ship is shared between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetRegistry {
    player: Fleet,
    opponent: Fleet,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fleet(&self, side: Side) -> &Fleet {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn fleet_mut(&mut self, side: Side) -> &mut Fleet {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Replace a side's fleet wholesale.
    pub(crate) fn install(&mut self, side: Side, fleet: Fleet) {
        *self.fleet_mut(side) = fleet;
    }

    pub fn register_ship(&mut self, side: Side, ship: Ship) -> Result<ShipId, CoreError> {
        self.fleet_mut(side).register(ship)
    }

    pub fn record_hit(&mut self, side: Side, cell: Cell) -> Option<HitReport> {
        self.fleet_mut(side).record_hit(cell)
    }

    pub fn is_defeated(&self, side: Side) -> bool {
        self.fleet(side).is_defeated()
    }

    pub fn ship_at(&self, side: Side, cell: Cell) -> Option<&Ship> {
        self.fleet(side).ship_at(cell)
    }
}
