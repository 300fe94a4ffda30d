use std::time::Duration;

use broadside::{
    AttackResult, Cell, CoreError, FleetSetup, Grid, Match, MatchEvent, Pacing, Phase,
    PlacementLimits, PlacementSession, Side, Targeting, BOARD_SIZE,
};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Set up, flip, and hand the turn to the player.
fn match_at_player_turn(seed: u64) -> Match {
    let mut game = Match::seeded(seed).with_pacing(Pacing::instant());
    game.setup_match(FleetSetup::Random).unwrap();
    if game.coin_flip().unwrap() == Side::Opponent {
        game.run_opponent_turn().unwrap();
    }
    assert_eq!(game.phase(), Phase::PlayerTurn);
    game.drain_events();
    game
}

/// A cell with no opponent ship on it.
fn open_water(game: &Match) -> Cell {
    let fleet = game.fleet(Side::Opponent);
    (0..BOARD_SIZE * BOARD_SIZE)
        .map(|i| Cell::new(i / BOARD_SIZE, i % BOARD_SIZE))
        .find(|&c| fleet.ship_at(c).is_none() && !game.grid(Side::Opponent).is_shot(c).unwrap())
        .unwrap()
}

#[test]
fn test_operations_reject_wrong_phase() {
    let mut game = Match::seeded(1);
    assert_eq!(game.phase(), Phase::AwaitingSetup);
    assert_eq!(
        game.coin_flip().unwrap_err(),
        CoreError::WrongPhase {
            expected: Phase::CoinFlip,
            actual: Phase::AwaitingSetup,
        }
    );
    assert_eq!(
        game.submit_player_attack(Cell::new(0, 0)).unwrap_err(),
        CoreError::WrongPhase {
            expected: Phase::PlayerTurn,
            actual: Phase::AwaitingSetup,
        }
    );
    assert!(matches!(
        game.run_opponent_turn(),
        Err(CoreError::WrongPhase {
            expected: Phase::OpponentTurn,
            ..
        })
    ));

    game.setup_match(FleetSetup::Random).unwrap();
    assert_eq!(game.phase(), Phase::CoinFlip);
    assert_eq!(
        game.setup_match(FleetSetup::Random).unwrap_err(),
        CoreError::WrongPhase {
            expected: Phase::AwaitingSetup,
            actual: Phase::CoinFlip,
        }
    );
}

#[test]
fn test_setup_deploys_both_fleets() {
    let mut game = Match::seeded(2);
    let setup = game.setup_match(FleetSetup::Random).unwrap();
    assert!(setup.player.is_complete());
    assert!(setup.opponent.is_complete());
    assert_eq!(game.fleet(Side::Player), &setup.player);
    assert_eq!(game.fleet(Side::Opponent), &setup.opponent);
    assert_eq!(game.grid(Side::Player).occupancy(), setup.player.occupancy());
    assert_eq!(game.grid(Side::Opponent).occupancy(), setup.opponent.occupancy());

    let state = game.state();
    assert_eq!(state.whose_turn, None);
    assert_eq!(state.winner, None);

    let events = game.drain_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[0].event,
        MatchEvent::FleetDeployed {
            side: Side::Player,
            ..
        }
    ));
}

#[test]
fn test_coin_flip_picks_either_side() {
    let mut seen = Vec::new();
    for seed in 0..64 {
        let mut game = Match::seeded(seed);
        game.setup_match(FleetSetup::Random).unwrap();
        let starter = game.coin_flip().unwrap();
        assert_eq!(game.state().whose_turn, Some(starter));
        if !seen.contains(&starter) {
            seen.push(starter);
        }
    }
    assert_eq!(seen.len(), 2);
}

#[test]
fn test_turns_alternate_and_stale_attacks_keep_the_turn() {
    let mut game = match_at_player_turn(3);
    let target = open_water(&game);

    let result = game.submit_player_attack(target).unwrap();
    assert_eq!(result, Some(AttackResult::MISS));
    assert_eq!(game.phase(), Phase::OpponentTurn);

    let reply = game.run_opponent_turn().unwrap();
    assert!(game.grid(Side::Player).is_shot(reply.target).unwrap());
    assert_eq!(game.phase(), Phase::PlayerTurn);
    game.drain_events();

    assert_eq!(game.submit_player_attack(target).unwrap(), None);
    assert_eq!(game.phase(), Phase::PlayerTurn);
    assert!(game.drain_events().is_empty());
}

#[test]
fn test_out_of_bounds_attack_changes_nothing() {
    let mut game = match_at_player_turn(4);
    let shots = game.grid(Side::Opponent).shots();
    assert_eq!(
        game.submit_player_attack(Cell::new(3, BOARD_SIZE)).unwrap_err(),
        CoreError::OutOfBounds {
            row: 3,
            col: BOARD_SIZE,
        }
    );
    assert_eq!(game.phase(), Phase::PlayerTurn);
    assert_eq!(game.grid(Side::Opponent).shots(), shots);
    assert!(game.drain_events().is_empty());
}

#[test]
fn test_sinking_every_ship_ends_the_match() {
    let mut game = match_at_player_turn(5);
    let targets: Vec<Cell> = game.fleet(Side::Opponent).occupancy().cells().collect();
    assert_eq!(targets.len(), 17);

    let mut sunk = 0;
    for (i, &cell) in targets.iter().enumerate() {
        let result = game.submit_player_attack(cell).unwrap().unwrap();
        assert!(result.hit);
        assert!(result.ship.is_some());
        if result.sunk {
            sunk += 1;
        }
        let events = game.drain_events();
        if result.sunk {
            assert!(events
                .iter()
                .any(|e| matches!(e.event, MatchEvent::ShipSunk { owner: Side::Opponent, .. })));
        }
        if i + 1 < targets.len() {
            assert_eq!(game.phase(), Phase::OpponentTurn);
            game.run_opponent_turn().unwrap();
        }
    }
    assert_eq!(sunk, 5);

    let state = game.state();
    assert_eq!(state.phase, Phase::MatchOver);
    assert!(state.is_over());
    assert_eq!(state.winner, Some(Side::Player));
    assert_eq!(state.whose_turn, None);

    // terminal until reset
    assert!(game.submit_player_attack(Cell::new(9, 9)).is_err());
    assert!(game.run_opponent_turn().is_err());
}

#[test]
fn test_reset_returns_to_setup_from_any_phase() {
    let mut game = match_at_player_turn(6);
    game.submit_player_attack(Cell::new(0, 0)).unwrap();
    game.reset();

    assert_eq!(game.phase(), Phase::AwaitingSetup);
    assert_eq!(game.state().winner, None);
    assert!(game.fleet(Side::Player).is_empty());
    assert_eq!(game.grid(Side::Opponent), &Grid::new());
    let events = game.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, MatchEvent::Reset);

    game.reset();
    game.setup_match(FleetSetup::Random).unwrap();
    assert_eq!(game.phase(), Phase::CoinFlip);
}

#[test]
fn test_manual_setup_uses_the_session_layout() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut session = PlacementSession::new();
    while !session.is_complete() {
        session.place_current_random(&mut rng).unwrap();
    }
    let expected = session.fleet().clone();

    let mut game = Match::seeded(7);
    let setup = game.setup_match(FleetSetup::Manual(session)).unwrap();
    assert_eq!(setup.player, expected);
    assert_eq!(game.grid(Side::Player).occupancy(), expected.occupancy());
}

#[test]
fn test_failed_setup_deploys_nothing() {
    let mut game = Match::seeded(8);
    let mut session = PlacementSession::new();
    session.place(Cell::new(0, 0)).unwrap();
    assert_eq!(
        game.setup_match(FleetSetup::Manual(session)).unwrap_err(),
        CoreError::FleetIncomplete { placed: 1 }
    );
    assert_eq!(game.phase(), Phase::AwaitingSetup);
    assert!(game.fleet(Side::Player).is_empty());

    let mut game = Match::seeded(8).with_limits(PlacementLimits {
        ship_attempts: 0,
        fleet_resets: 3,
    });
    assert_eq!(
        game.setup_match(FleetSetup::Random).unwrap_err(),
        CoreError::FleetPlacementFailed { resets: 3 }
    );
    assert_eq!(game.phase(), Phase::AwaitingSetup);
    assert!(game.drain_events().is_empty());
}

#[test]
fn test_events_carry_pacing_hints() {
    let mut game = Match::seeded(9);
    game.setup_match(FleetSetup::Random).unwrap();
    let starter = game.coin_flip().unwrap();
    let events = game.drain_events();
    let flip = events.last().unwrap();
    assert_eq!(flip.event, MatchEvent::CoinFlipped { starter });
    assert_eq!(flip.delay, Duration::from_millis(2000));
    assert!(events[..2].iter().all(|e| e.delay.is_zero()));

    if starter == Side::Opponent {
        game.run_opponent_turn().unwrap();
        game.drain_events();
    }
    let target = open_water(&game);
    game.submit_player_attack(target).unwrap();
    let events = game.drain_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].delay, Duration::from_millis(3000));
    assert_eq!(events[1].event, MatchEvent::TurnPassed { to: Side::Opponent });
    assert_eq!(events[1].delay, Duration::from_millis(1000));

    game.run_opponent_turn().unwrap();
    let events = game.drain_events();
    let handover = events.last().unwrap();
    assert_eq!(handover.event, MatchEvent::TurnPassed { to: Side::Player });
    assert!(handover.delay.is_zero());
}

/// Always aims at the same corner.
struct Fixated;

impl Targeting for Fixated {
    fn select_target(&mut self, _rng: &mut dyn RngCore, _enemy: &Grid) -> Option<Cell> {
        Some(Cell::new(0, 0))
    }
}

#[test]
fn test_opponent_never_fires_twice_at_a_cell() {
    let mut game = Match::seeded(10)
        .with_pacing(Pacing::instant())
        .with_targeting(Box::new(Fixated));
    game.setup_match(FleetSetup::Random).unwrap();
    if game.coin_flip().unwrap() == Side::Player {
        let target = open_water(&game);
        game.submit_player_attack(target).unwrap();
    }

    let first = game.run_opponent_turn().unwrap();
    assert_eq!(first.target, Cell::new(0, 0));

    let target = open_water(&game);
    game.submit_player_attack(target).unwrap();
    let second = game.run_opponent_turn().unwrap();
    assert_ne!(second.target, Cell::new(0, 0));
    assert_eq!(game.grid(Side::Player).shots().count_ones(), 2);
}
