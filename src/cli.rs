//! Terminal presentation: coordinate parsing and board rendering.
//!
//! Columns are lettered `A`-`J`, rows numbered `1`-`10`, so `B7` is row 6,
//! column 1.

use std::fmt::Write as _;
use std::string::String;

use crate::{
    AttackResult, Cell, Fleet, Grid, MatchEvent, Orientation, Side, BOARD_SIZE,
};

/// Render a cell as `B7`.
pub fn format_cell(cell: Cell) -> String {
    let col = (b'A' + cell.col as u8) as char;
    format!("{}{}", col, cell.row + 1)
}

/// Parse `B7` (case-insensitive) into a board cell.
pub fn parse_cell(input: &str) -> Result<Cell, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("No column letter")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    if row_str.is_empty() {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(Cell::new(row - 1, col))
}

/// Parse a placement command such as `A5 H` or `c3 v`. The orientation is
/// optional; `None` keeps whatever is currently selected.
pub fn parse_placement(input: &str) -> Result<(Cell, Option<Orientation>), String> {
    let mut parts = input.split_whitespace();
    let cell = parse_cell(parts.next().unwrap_or(""))?;
    let orientation = match parts.next() {
        None => None,
        Some(o) if o.eq_ignore_ascii_case("h") => Some(Orientation::Horizontal),
        Some(o) if o.eq_ignore_ascii_case("v") => Some(Orientation::Vertical),
        Some(o) => return Err(format!("Invalid orientation '{}' - use H or V", o)),
    };
    if parts.next().is_some() {
        return Err("Too many arguments - expected e.g. A5 H".to_string());
    }
    Ok((cell, orientation))
}

/// Draw a grid. With `reveal` set, unhit ship segments are shown as `S`.
pub fn render_board(grid: &Grid, reveal: bool) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for c in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for r in 0..BOARD_SIZE {
        let _ = write!(out, "    {:2}", r + 1);
        for c in 0..BOARD_SIZE {
            let cell = Cell::new(r, c);
            let shot = grid.is_shot(cell).unwrap_or(false);
            let ship = grid.is_occupied(cell).unwrap_or(false);
            let ch = match (shot, ship) {
                (true, true) => 'X',
                (true, false) => 'o',
                (false, true) if reveal => 'S',
                _ => '.',
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    if reveal {
        out.push_str("    Legend: S=Ship  X=Hit  o=Miss  .=Water\n");
    } else {
        out.push_str("    Legend: X=Hit  o=Miss  .=Unknown\n");
    }
    out
}

/// One line per ship with its damage.
pub fn render_fleet_status(fleet: &Fleet) -> String {
    let mut out = String::new();
    for ship in fleet.ships() {
        let hits = ship.hit_mask().iter().filter(|&&h| h).count();
        let status = if ship.is_sunk() { "SUNK" } else { "Active" };
        let _ = writeln!(
            out,
            "      {} ({}): {} [{}/{}]",
            ship.kind(),
            ship.size(),
            status,
            hits,
            ship.size()
        );
    }
    out
}

fn describe_result(result: &AttackResult) -> String {
    match (result.hit, result.sunk, result.ship) {
        (true, true, Some(kind)) => format!("HIT! {} sunk!", kind),
        (true, _, Some(kind)) => format!("HIT on the {}", kind),
        (true, _, None) => "HIT".to_string(),
        (false, _, _) => "miss".to_string(),
    }
}

fn who(side: Side) -> &'static str {
    match side {
        Side::Player => "You",
        Side::Opponent => "Opponent",
    }
}

/// Human-readable line for a match event, or `None` for events the
/// terminal view does not announce.
pub fn describe_event(event: &MatchEvent) -> Option<String> {
    match event {
        MatchEvent::FleetDeployed { .. } | MatchEvent::Reset => None,
        MatchEvent::CoinFlipped { starter } => Some(match starter {
            Side::Player => "You won the coin flip! Your turn first!".to_string(),
            Side::Opponent => "Opponent won the coin flip! Opponent goes first!".to_string(),
        }),
        MatchEvent::ShotFired {
            attacker,
            target,
            result,
        } => Some(format!(
            "{} fired at {}: {}",
            who(*attacker),
            format_cell(*target),
            describe_result(result)
        )),
        MatchEvent::ShipSunk { owner, ship } => Some(match owner {
            Side::Opponent => format!("The enemy {} has been destroyed!", ship.kind()),
            Side::Player => format!("Your {} has been destroyed!", ship.kind()),
        }),
        MatchEvent::TurnPassed { to } => Some(match to {
            Side::Player => "Your turn.".to_string(),
            Side::Opponent => "Opponent is aiming...".to_string(),
        }),
        MatchEvent::MatchOver { winner } => Some(match winner {
            Side::Player => "VICTORY! You have sunk all enemy ships!".to_string(),
            Side::Opponent => "DEFEAT! All your ships have been sunk!".to_string(),
        }),
    }
}
