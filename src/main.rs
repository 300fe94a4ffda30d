#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    cli::{describe_event, format_cell, parse_cell, parse_placement, render_board, render_fleet_status},
    init_logging, FleetSetup, Match, Pacing, Phase, PlacementSession, RandomTargeting, Side,
    Targeting, NUM_SHIPS,
};

#[cfg(feature = "std")]
use anyhow::{anyhow, bail};
#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::{RngCore, SeedableRng};
#[cfg(feature = "std")]
use serde::Serialize;
#[cfg(feature = "std")]
use std::io::{self, Write};

#[cfg(feature = "std")]
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "std")]
#[derive(Subcommand)]
enum Commands {
    /// Play against the automated opponent in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Place your ships by hand instead of at random")]
        manual: bool,
        #[arg(long, help = "Skip the pauses between turns")]
        fast: bool,
    },
    /// Let both sides fire at random and print a JSON summary.
    Auto {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        games: usize,
        #[arg(long, help = "Print every event and apply turn pacing")]
        watch: bool,
    },
}

#[cfg(feature = "std")]
#[derive(Serialize)]
struct AutoSummary {
    seed: Option<u64>,
    games: usize,
    player_wins: usize,
    opponent_wins: usize,
    average_shots: f64,
}

#[cfg(feature = "std")]
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn prompt(text: &str) -> anyhow::Result<String> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        bail!("input closed");
    }
    Ok(line.trim().to_string())
}

/// Announce queued events, pausing for each pacing hint. The match has
/// already advanced, so skipping the pause changes nothing but timing.
#[cfg(feature = "std")]
async fn present<R: RngCore>(game: &mut Match<R>, verbose: bool) {
    for paced in game.drain_events() {
        if verbose {
            if let Some(line) = describe_event(&paced.event) {
                println!("{}", line);
            }
        }
        if !paced.delay.is_zero() {
            tokio::time::sleep(paced.delay).await;
        }
    }
}

#[cfg(feature = "std")]
fn print_view<R: RngCore>(game: &Match<R>) {
    println!("\nOpponent board:");
    print!("{}", render_board(game.grid(Side::Opponent), false));
    println!("\nYour board:");
    print!("{}", render_board(game.grid(Side::Player), true));
    print!("{}", render_fleet_status(game.fleet(Side::Player)));
}

#[cfg(feature = "std")]
fn manual_placement(rng: &mut SmallRng) -> anyhow::Result<PlacementSession> {
    println!("\nSHIP PLACEMENT");
    println!("  • Enter coordinates and orientation (e.g., A5 H or A5 V)");
    println!("  • 'r' rotates the current ship");
    println!("  • Press ENTER for random placement");

    let mut session = PlacementSession::new();
    while let Some(kind) = session.current() {
        print!("\n{}", render_board(session.grid(), true));
        let line = prompt(&format!(
            "Ship {}/{}: {} (length {}, {:?}) > ",
            session.fleet().len() + 1,
            NUM_SHIPS,
            kind,
            kind.size(),
            session.orientation()
        ))?;

        if line.is_empty() {
            let ship = session.place_current_random(rng)?;
            println!("✓ {} randomly placed at {}", ship.kind(), format_cell(ship.origin()));
            continue;
        }
        if line.eq_ignore_ascii_case("r") {
            println!("Orientation: {:?}", session.rotate());
            continue;
        }
        match parse_placement(&line) {
            Ok((cell, orientation)) => {
                if let Some(o) = orientation {
                    session.set_orientation(o);
                }
                match session.place(cell) {
                    Ok(ship) => println!("✓ {} placed at {}", ship.kind(), format_cell(cell)),
                    Err(e) => println!("✗ {}", e),
                }
            }
            Err(msg) => println!("✗ {}", msg),
        }
    }
    Ok(session)
}

#[cfg(feature = "std")]
async fn play(seed: Option<u64>, manual: bool, fast: bool) -> anyhow::Result<()> {
    let mut rng = seeded_rng(seed);
    let pacing = if fast { Pacing::instant() } else { Pacing::default() };
    let mut game = Match::new(SmallRng::from_rng(&mut rng)).with_pacing(pacing);

    loop {
        let setup = if manual {
            FleetSetup::Manual(manual_placement(&mut rng)?)
        } else {
            FleetSetup::Random
        };
        game.setup_match(setup)?;
        game.coin_flip()?;
        present(&mut game, true).await;

        while !game.state().is_over() {
            match game.phase() {
                Phase::PlayerTurn => {
                    print_view(&game);
                    let line = prompt("\nTarget (e.g. B7, 'q' to quit): ")?;
                    if line.eq_ignore_ascii_case("q") {
                        return Ok(());
                    }
                    let cell = match parse_cell(&line) {
                        Ok(cell) => cell,
                        Err(msg) => {
                            println!("✗ {}", msg);
                            continue;
                        }
                    };
                    if game.submit_player_attack(cell)?.is_none() {
                        println!("Already fired at {} - pick another cell", format_cell(cell));
                    }
                }
                Phase::OpponentTurn => {
                    game.run_opponent_turn()?;
                }
                other => bail!("unexpected phase {:?} during play", other),
            }
            present(&mut game, true).await;
        }

        print_view(&game);
        let again = prompt("\nPlay again? [y/N] ")?;
        if !again.eq_ignore_ascii_case("y") {
            return Ok(());
        }
        game.reset();
        game.drain_events();
    }
}

#[cfg(feature = "std")]
async fn auto(seed: Option<u64>, games: usize, watch: bool) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let pacing = if watch { Pacing::default() } else { Pacing::instant() };
    let mut game = Match::new(SmallRng::from_rng(&mut rng)).with_pacing(pacing);
    let mut pilot = RandomTargeting::new();

    let (mut player_wins, mut opponent_wins, mut total_shots) = (0usize, 0usize, 0usize);
    for _ in 0..games {
        game.setup_match(FleetSetup::Random)?;
        game.coin_flip()?;
        while !game.state().is_over() {
            match game.phase() {
                Phase::PlayerTurn => {
                    let target = pilot
                        .select_target(&mut rng, game.grid(Side::Opponent))
                        .ok_or_else(|| anyhow!("no cells left to fire at"))?;
                    game.submit_player_attack(target)?;
                }
                Phase::OpponentTurn => {
                    game.run_opponent_turn()?;
                }
                other => bail!("unexpected phase {:?} during play", other),
            }
            total_shots += 1;
            present(&mut game, watch).await;
        }
        match game.state().winner {
            Some(Side::Player) => player_wins += 1,
            Some(Side::Opponent) => opponent_wins += 1,
            None => bail!("match ended without a winner"),
        }
        game.reset();
        game.drain_events();
    }

    let summary = AutoSummary {
        seed,
        games,
        player_wins,
        opponent_wins,
        average_shots: if games == 0 {
            0.0
        } else {
            total_shots as f64 / games as f64
        },
    };
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { seed, manual, fast } => play(seed, manual, fast).await,
        Commands::Auto { seed, games, watch } => auto(seed, games, watch).await,
    }
}
