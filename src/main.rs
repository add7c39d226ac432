//! Othello-AI: an Othello engine with an alpha-beta opponent.
//!
//! ## Usage
//!
//! - `othello-ai` - Show a demo
//! - `othello-ai shell` - Start the text command protocol on stdin/stdout
//! - `othello-ai selfplay` - Play automated games between agents
//! - `othello-ai demo` - Play a short engine-vs-engine game
//!
//! Set `RUST_LOG=debug` to see per-depth search statistics on stderr.

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use othello_ai::board::{BoardState, Player};
use othello_ai::constants::DEFAULT_TIME_LIMIT;
use othello_ai::search::SearchEngine;
use othello_ai::selfplay::{Agent, play_game};
use othello_ai::shell::Shell;

/// Othello-AI: an Othello engine with an alpha-beta opponent
#[derive(Parser)]
#[command(name = "othello-ai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text command protocol for use with a front end
    Shell {
        /// Search time budget in seconds
        #[arg(long, default_value_t = DEFAULT_TIME_LIMIT.as_secs_f64())]
        time: f64,
    },
    /// Play automated games between two agents
    Selfplay {
        /// Agent playing Black
        #[arg(long, value_enum, default_value_t = AgentKind::Search)]
        black: AgentKind,
        /// Agent playing White
        #[arg(long, value_enum, default_value_t = AgentKind::Random)]
        white: AgentKind,
        /// Number of games
        #[arg(long, default_value_t = 1)]
        games: u32,
        /// Search time budget in seconds
        #[arg(long, default_value_t = 0.5)]
        time: f64,
        /// Seed for the random agent
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
    /// Run a simple demo of the engine
    Demo,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    /// Time-limited iterative deepening
    Search,
    /// Fixed-depth search
    Fixed,
    /// Random legal moves
    Random,
}

impl AgentKind {
    fn agent(self, time_limit: Duration) -> Agent {
        match self {
            AgentKind::Search => Agent::Search { time_limit },
            AgentKind::Fixed => Agent::Fixed,
            AgentKind::Random => Agent::Random,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Shell { time }) => {
            let mut shell = Shell::with_time_limit(seconds(time)?);
            shell.run()
        }
        Some(Commands::Selfplay {
            black,
            white,
            games,
            time,
            seed,
        }) => run_selfplay(black, white, games, seconds(time)?, seed),
        Some(Commands::Demo) | None => {
            run_demo();
            Ok(())
        }
    }
}

fn seconds(secs: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(secs).with_context(|| format!("invalid time budget: {secs}"))
}

fn run_selfplay(
    black: AgentKind,
    white: AgentKind,
    games: u32,
    time_limit: Duration,
    seed: u64,
) -> anyhow::Result<()> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let (mut black_wins, mut white_wins, mut draws) = (0, 0, 0);

    for game in 1..=games {
        let record = play_game(black.agent(time_limit), white.agent(time_limit), &mut rng)
            .with_context(|| format!("game {game} aborted"))?;
        match record.winner() {
            Some(Player::Black) => black_wins += 1,
            Some(Player::White) => white_wins += 1,
            None => draws += 1,
        }
        println!(
            "game {game}: black {} white {} | {}",
            record.board.score(Player::Black),
            record.board.score(Player::White),
            record.transcript()
        );
    }

    println!("black wins {black_wins}, white wins {white_wins}, draws {draws}");
    Ok(())
}

fn run_demo() {
    println!("Othello-AI: alpha-beta Othello engine\n");

    let mut board = BoardState::new();
    println!("{board}\n");

    // A few plies of engine against itself
    for _ in 0..6 {
        let Some(player) = board.current_player() else {
            break;
        };
        let engine = SearchEngine::new(&board, player, Duration::from_millis(200));
        let result = engine.iterative_deepening();
        let Some(mv) = result.best_move else {
            break;
        };
        if let Err(e) = board.apply_move(mv) {
            eprintln!("{e}");
            break;
        }
        println!(
            "{player} plays {mv} (depth {}, value {:.1}, {} nodes)",
            result.depth, result.value, result.nodes
        );
        println!("{board}\n");
    }
}
