//! Turn coordination for a human versus automated-opponent match.
//!
//! ```text
//! AwaitingSetup -> CoinFlip -> PlayerTurn <-> OpponentTurn -> MatchOver
//!       ^                                                        |
//!       +------------------------- reset ------------------------+
//! ```
//!
//! Transitions are driven only by explicit calls from the host. The human
//! side advances through [`Match::submit_player_attack`], the automated side
//! through [`Match::run_opponent_turn`]. Every call either completes its
//! transition or fails without changing anything.

use alloc::boxed::Box;
use alloc::vec::Vec;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::ai::{RandomTargeting, Targeting};
use crate::attack::Battlefield;
use crate::common::{AttackResult, CoreError, Side};
use crate::config::{Pacing, PlacementLimits};
use crate::events::{EventQueue, MatchEvent, PacedEvent};
use crate::fleet::Fleet;
use crate::grid::{Cell, Grid};
use crate::placement::{place_fleet_random_with, PlacementSession};

/// Phase of the match state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Phase {
    AwaitingSetup,
    CoinFlip,
    PlayerTurn,
    OpponentTurn,
    /// Terminal until [`Match::reset`].
    MatchOver,
}

impl Phase {
    fn turn_of(side: Side) -> Self {
        match side {
            Side::Player => Phase::PlayerTurn,
            Side::Opponent => Phase::OpponentTurn,
        }
    }
}

/// Read-only snapshot for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct MatchState {
    pub phase: Phase,
    /// Side expected to move, while a match is in play.
    pub whose_turn: Option<Side>,
    pub winner: Option<Side>,
}

impl MatchState {
    pub fn is_over(&self) -> bool {
        self.phase == Phase::MatchOver
    }
}

/// How the human side's fleet is laid out.
#[derive(Debug, Clone)]
pub enum FleetSetup {
    /// Randomized, like the automated side.
    Random,
    /// A finished manual placement.
    Manual(PlacementSession),
}

/// Both fleets as deployed by [`Match::setup_match`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSetup {
    pub player: Fleet,
    pub opponent: Fleet,
}

/// What the automated opponent did on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentMove {
    pub target: Cell,
    pub result: AttackResult,
}

/// One match instance. Owns both grids and fleets exclusively.
pub struct Match<R: RngCore = SmallRng> {
    rng: R,
    phase: Phase,
    winner: Option<Side>,
    battlefield: Battlefield,
    targeting: Box<dyn Targeting>,
    limits: PlacementLimits,
    events: EventQueue,
}

impl Match<SmallRng> {
    /// A match with a deterministic random source.
    pub fn seeded(seed: u64) -> Self {
        Match::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Match<R> {
    /// A match awaiting setup, with random opponent targeting and default
    /// pacing and placement bounds.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            phase: Phase::AwaitingSetup,
            winner: None,
            battlefield: Battlefield::new(),
            targeting: Box::new(RandomTargeting::new()),
            limits: PlacementLimits::default(),
            events: EventQueue::new(Pacing::default()),
        }
    }

    /// Replace the opponent's targeting policy.
    pub fn with_targeting(mut self, targeting: Box<dyn Targeting>) -> Self {
        self.targeting = targeting;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.events.set_pacing(pacing);
        self
    }

    pub fn with_limits(mut self, limits: PlacementLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> MatchState {
        let whose_turn = match self.phase {
            Phase::PlayerTurn => Some(Side::Player),
            Phase::OpponentTurn => Some(Side::Opponent),
            _ => None,
        };
        MatchState {
            phase: self.phase,
            whose_turn,
            winner: self.winner,
        }
    }

    pub fn grid(&self, side: Side) -> &Grid {
        self.battlefield.grid(side)
    }

    pub fn fleet(&self, side: Side) -> &Fleet {
        self.battlefield.fleet(side)
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<PacedEvent> {
        self.events.drain()
    }

    fn require_phase(&self, expected: Phase) -> Result<(), CoreError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(CoreError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn random_layout(&mut self) -> Result<(Grid, Fleet), CoreError> {
        let mut grid = Grid::new();
        let fleet = place_fleet_random_with(&mut grid, &mut self.rng, self.limits)?;
        Ok((grid, fleet))
    }

    /// Deploy both fleets. The opponent's is always random. Nothing is
    /// deployed unless both layouts succeed.
    pub fn setup_match(&mut self, player: FleetSetup) -> Result<MatchSetup, CoreError> {
        self.require_phase(Phase::AwaitingSetup)?;
        let (player_grid, player_fleet) = match player {
            FleetSetup::Random => self.random_layout()?,
            FleetSetup::Manual(session) => session.finish()?,
        };
        let (opponent_grid, opponent_fleet) = self.random_layout()?;

        let setup = MatchSetup {
            player: player_fleet.clone(),
            opponent: opponent_fleet.clone(),
        };
        let mut battlefield = Battlefield::new();
        battlefield.deploy(Side::Player, player_grid, player_fleet)?;
        battlefield.deploy(Side::Opponent, opponent_grid, opponent_fleet)?;
        self.battlefield = battlefield;
        for side in [Side::Player, Side::Opponent] {
            self.events.push(MatchEvent::FleetDeployed {
                side,
                ships: self.battlefield.fleet(side).ships().to_vec(),
            });
        }
        self.phase = Phase::CoinFlip;
        info!("fleets deployed, awaiting coin flip");
        Ok(setup)
    }

    /// Pick the starting side uniformly at random.
    pub fn coin_flip(&mut self) -> Result<Side, CoreError> {
        self.require_phase(Phase::CoinFlip)?;
        let starter = if self.rng.random_bool(0.5) {
            Side::Player
        } else {
            Side::Opponent
        };
        self.phase = Phase::turn_of(starter);
        self.events.push(MatchEvent::CoinFlipped { starter });
        info!("{} won the coin flip", starter);
        Ok(starter)
    }

    /// Fire the human's shot. `Ok(None)` means the cell was already shot:
    /// nothing changes and it is still the player's turn.
    pub fn submit_player_attack(&mut self, target: Cell) -> Result<Option<AttackResult>, CoreError> {
        self.require_phase(Phase::PlayerTurn)?;
        self.resolve(Side::Player, target)
    }

    /// Let the automated opponent pick a cell and fire.
    pub fn run_opponent_turn(&mut self) -> Result<OpponentMove, CoreError> {
        self.require_phase(Phase::OpponentTurn)?;
        let enemy = self.battlefield.grid(Side::Player);
        let mut target = self
            .targeting
            .select_target(&mut self.rng, enemy)
            .ok_or(CoreError::NoTargetsRemaining)?;
        if enemy.is_shot(target)? {
            warn!("targeting picked shot cell {}, drawing at random instead", target);
            target = RandomTargeting
                .select_target(&mut self.rng, enemy)
                .ok_or(CoreError::NoTargetsRemaining)?;
        }
        let result = self
            .resolve(Side::Opponent, target)?
            .ok_or(CoreError::NoTargetsRemaining)?;
        self.targeting.observe(target, &result);
        Ok(OpponentMove { target, result })
    }

    fn resolve(&mut self, attacker: Side, target: Cell) -> Result<Option<AttackResult>, CoreError> {
        let result = match self.battlefield.attack(attacker, target)? {
            Some(result) => result,
            None => return Ok(None),
        };
        let defender = attacker.opponent();
        self.events.push(MatchEvent::ShotFired {
            attacker,
            target,
            result,
        });
        if result.sunk {
            if let Some(ship) = self.battlefield.fleets().ship_at(defender, target) {
                info!("{} sank the {}'s {}", attacker, defender, ship.kind());
                self.events.push(MatchEvent::ShipSunk {
                    owner: defender,
                    ship: ship.clone(),
                });
            }
        }

        if self.battlefield.is_defeated(defender) {
            self.phase = Phase::MatchOver;
            self.winner = Some(attacker);
            self.events.push(MatchEvent::MatchOver { winner: attacker });
            info!("match over, {} wins", attacker);
        } else {
            self.phase = Phase::turn_of(defender);
            self.events.push(MatchEvent::TurnPassed { to: defender });
        }
        Ok(Some(result))
    }

    /// Discard both boards and return to [`Phase::AwaitingSetup`]. Allowed
    /// in every phase. Pending events are dropped.
    pub fn reset(&mut self) {
        self.battlefield = Battlefield::new();
        self.phase = Phase::AwaitingSetup;
        self.winner = None;
        self.events.clear();
        self.events.push(MatchEvent::Reset);
        info!("match reset");
    }
}
