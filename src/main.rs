//! Sejm - terminal entry point
//!
//! Sets up logging, builds the player roster from flags or an interactive
//! menu, plays a full game on stdin/stdout and offers another.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sejm::core::config::MAX_PLAYERS;
use sejm::core::types::normalize;
use sejm::game::{InputSource, OutputSink, StdioInput, StdoutSink};
use sejm::{GameConfig, GameSession, Result};

const DEFAULT_PLAYERS: usize = 2;

#[derive(Parser, Debug)]
#[command(name = "sejm")]
#[command(about = "Play Sejm, a board game of nobles, laws and invaders")]
struct Args {
    /// Number of players (asked interactively when missing)
    #[arg(long)]
    players: Option<usize>,

    /// Comma separated player names
    #[arg(long, value_delimiter = ',')]
    names: Vec<String>,

    /// Rounds before final scoring
    #[arg(long)]
    rounds: Option<u32>,

    /// Seed for dice and random events
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final score report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so the game text on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sejm=info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;

    let mut input = StdioInput;
    let mut output = StdoutSink;
    output.emit_line("=== SEJM ===");

    let mut games: u64 = 0;
    loop {
        let names = setup_roster(&args, &config, &mut input, &mut output);
        let game_config = GameConfig {
            seed: config.seed.wrapping_add(games),
            ..config.clone()
        };
        tracing::info!(game = games + 1, players = names.len(), "starting game");

        let mut session = GameSession::new(&names, game_config)?;
        let scores = session.play_to_end(&mut input, &mut output)?;
        if args.json {
            output.emit_line(&scores.to_json()?);
        }

        games += 1;
        let again = input.request_line("Play again? [y/N]");
        if !matches!(normalize(&again).as_str(), "y" | "yes" | "t" | "tak") {
            break;
        }
    }

    Ok(())
}

/// Names from the command line, or asked one by one
fn setup_roster(
    args: &Args,
    config: &GameConfig,
    input: &mut impl InputSource,
    output: &mut impl OutputSink,
) -> Vec<String> {
    if !args.names.is_empty() {
        let names: Vec<String> = args.names.iter().map(|n| n.trim().to_string()).collect();
        match config.validate_players(&names) {
            Ok(()) => return names,
            Err(e) => output.emit_line(&e.to_string()),
        }
    }

    let count = match args.players.filter(|n| (1..=MAX_PLAYERS).contains(n)) {
        Some(n) => n,
        None => ask_player_count(input, output),
    };

    (1..=count)
        .map(|i| {
            let answer = input.request_line(&format!("Name of player {}", i));
            match answer.trim() {
                "" => format!("Player {}", i),
                name => name.to_string(),
            }
        })
        .collect()
}

fn ask_player_count(input: &mut impl InputSource, output: &mut impl OutputSink) -> usize {
    loop {
        let answer = input.request_line(&format!("Number of players (1-{}, default {})", MAX_PLAYERS, DEFAULT_PLAYERS));
        let answer = answer.trim();
        if answer.is_empty() {
            return DEFAULT_PLAYERS;
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=MAX_PLAYERS).contains(&n) => return n,
            _ => output.emit_line(&format!("Enter a number from 1 to {}.", MAX_PLAYERS)),
        }
    }
}
