#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod attack;
mod bitboard;
#[cfg(feature = "std")]
pub mod cli;
mod common;
mod config;
mod events;
mod fleet;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod placement;
mod ship;

pub use ai::*;
pub use attack::*;
pub use bitboard::{BitBoard, BitBoardError, Cells};
pub use common::*;
pub use config::*;
pub use events::{MatchEvent, PacedEvent};
pub use fleet::*;
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use placement::*;
pub use ship::*;
