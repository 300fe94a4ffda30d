//! Attack resolution against the defending side's grid and fleet.

use log::debug;

use crate::common::{AttackResult, CoreError, Side};
use crate::fleet::{Fleet, FleetRegistry};
use crate::grid::{Cell, Grid};

/// Both sides' grids and fleets for one match.
#[derive(Debug, Clone, Default)]
pub struct Battlefield {
    player_grid: Grid,
    opponent_grid: Grid,
    fleets: FleetRegistry,
}

impl Battlefield {
    /// Empty grids, empty fleets.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self, side: Side) -> &Grid {
        match side {
            Side::Player => &self.player_grid,
            Side::Opponent => &self.opponent_grid,
        }
    }

    fn grid_mut(&mut self, side: Side) -> &mut Grid {
        match side {
            Side::Player => &mut self.player_grid,
            Side::Opponent => &mut self.opponent_grid,
        }
    }

    pub fn fleet(&self, side: Side) -> &Fleet {
        self.fleets.fleet(side)
    }

    pub fn fleets(&self) -> &FleetRegistry {
        &self.fleets
    }

    /// Install a finished layout for `side`, replacing whatever was there.
    /// The grid's occupancy must be exactly the fleet's footprint.
    pub fn deploy(&mut self, side: Side, grid: Grid, fleet: Fleet) -> Result<(), CoreError> {
        if grid.occupancy() != fleet.occupancy() {
            return Err(CoreError::LayoutMismatch { side });
        }
        *self.grid_mut(side) = grid;
        self.fleets.install(side, fleet);
        Ok(())
    }

    /// Fire at `target` on the side opposing `attacker`.
    ///
    /// Returns `Ok(None)` without touching anything if the cell was already
    /// shot. Whether the defender is now defeated is left to the caller.
    pub fn attack(&mut self, attacker: Side, target: Cell) -> Result<Option<AttackResult>, CoreError> {
        let defender = attacker.opponent();
        let grid = self.grid_mut(defender);
        if grid.is_shot(target)? {
            debug!("{} re-targeted {}, ignoring", attacker, target);
            return Ok(None);
        }
        grid.mark_shot(target)?;

        let result = match self.fleets.record_hit(defender, target) {
            Some(hit) => AttackResult {
                hit: true,
                sunk: hit.sunk,
                ship: Some(hit.kind),
                segment: Some(hit.segment),
            },
            None => AttackResult::MISS,
        };
        debug!("{} fired at {}: {:?}", attacker, target, result);
        Ok(Some(result))
    }

    /// Whether every ship of `side` is sunk.
    pub fn is_defeated(&self, side: Side) -> bool {
        self.fleets.is_defeated(side)
    }
}
