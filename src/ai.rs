// Target selection for automated players.

use rand::{Rng, RngCore};

use crate::common::AttackResult;
use crate::config::BOARD_SIZE;
use crate::grid::{Cell, Grid};

/// Policy that picks the next cell to fire at on the enemy grid.
pub trait Targeting: Send {
    /// Choose a cell on `enemy` that has not been shot yet, or `None` when
    /// no such cell is left.
    fn select_target(&mut self, rng: &mut dyn RngCore, enemy: &Grid) -> Option<Cell>;

    /// Inform the policy of the result of its last shot.
    fn observe(&mut self, _target: Cell, _result: &AttackResult) {}
}

/// Uniformly random choice among unshot cells: draw any cell, redraw while
/// it is already shot.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTargeting;

impl RandomTargeting {
    pub fn new() -> Self {
        Self
    }
}

impl Targeting for RandomTargeting {
    fn select_target(&mut self, rng: &mut dyn RngCore, enemy: &Grid) -> Option<Cell> {
        if enemy.unshot_count() == 0 {
            return None;
        }
        loop {
            let cell = Cell::new(
                rng.random_range(0..BOARD_SIZE),
                rng.random_range(0..BOARD_SIZE),
            );
            if !enemy.is_shot(cell).unwrap_or(true) {
                return Some(cell);
            }
        }
    }
}
