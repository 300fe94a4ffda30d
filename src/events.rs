//! Events queued by the match for a presentation layer.

use alloc::vec::Vec;
use core::time::Duration;

use crate::common::{AttackResult, Side};
use crate::config::Pacing;
use crate::grid::Cell;
use crate::ship::Ship;

/// Something a presentation layer may want to show.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
#[cfg_attr(feature = "std", serde(tag = "event", rename_all = "snake_case"))]
pub enum MatchEvent {
    /// A side's fleet is on the board.
    FleetDeployed { side: Side, ships: Vec<Ship> },
    /// The coin flip picked the side that moves first.
    CoinFlipped { starter: Side },
    /// An attack was resolved.
    ShotFired {
        attacker: Side,
        target: Cell,
        result: AttackResult,
    },
    /// The last shot sank `ship`, owned by `owner`.
    ShipSunk { owner: Side, ship: Ship },
    /// Control moved to `to`.
    TurnPassed { to: Side },
    MatchOver { winner: Side },
    Reset,
}

impl MatchEvent {
    /// Cosmetic delay a host may apply after presenting this event.
    pub fn pacing(&self, pacing: &Pacing) -> Duration {
        match self {
            MatchEvent::CoinFlipped { .. } => pacing.coin_flip,
            MatchEvent::ShotFired { .. } => pacing.after_attack,
            MatchEvent::TurnPassed { to: Side::Opponent } => pacing.opponent_think,
            _ => Duration::ZERO,
        }
    }
}

/// An event together with its pacing hint. The match has already moved on
/// by the time the hint is handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct PacedEvent {
    pub event: MatchEvent,
    pub delay: Duration,
}

/// FIFO of events waiting to be drained by the host.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventQueue {
    pacing: Pacing,
    pending: Vec<PacedEvent>,
}

impl EventQueue {
    pub(crate) fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            pending: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, event: MatchEvent) {
        let delay = event.pacing(&self.pacing);
        self.pending.push(PacedEvent { event, delay });
    }

    pub(crate) fn drain(&mut self) -> Vec<PacedEvent> {
        core::mem::take(&mut self.pending)
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }

    pub(crate) fn set_pacing(&mut self, pacing: Pacing) {
        self.pacing = pacing;
    }
}
