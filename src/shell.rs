//! Text command protocol for driving a game.
//!
//! A line-oriented protocol modelled on GTP: each command is a single line,
//! optionally prefixed with a numeric id, and each response is `=` (success)
//! or `?` (failure) followed by the id and the response text, then a blank
//! line. Lines starting with `#` are comments.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return protocol version (2)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `clear_board` - Reset to the opening position
//! - `showboard` - Print the board
//! - `play <vertex>` - Play a move for the side to move
//! - `genmove` - Search, play and return a move for the side to move
//! - `legal_moves` - List legal moves for the side to move
//! - `score` - Disc counts and turn owner
//! - `time_limit <seconds>` - Set the search time budget
//!
//! ## Example
//!
//! ```ignore
//! use othello_ai::shell::Shell;
//! let mut shell = Shell::new();
//! shell.run()?;
//! ```

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use crate::board::{BoardState, Player};
use crate::constants::DEFAULT_TIME_LIMIT;
use crate::coord::Coord;
use crate::search::SearchEngine;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "genmove",
    "known_command",
    "legal_moves",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "score",
    "showboard",
    "time_limit",
    "version",
];

/// Response text when the game is over.
const GAME_OVER: &str = "gameover";

/// Shell state.
pub struct Shell {
    /// Current game position
    board: BoardState,
    /// Budget for `genmove`
    time_limit: Duration,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    /// Create a shell with the default time budget.
    pub fn new() -> Self {
        Self::with_time_limit(DEFAULT_TIME_LIMIT)
    }

    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            board: BoardState::new(),
            time_limit,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n").context("failed to write response")?;
            output.flush().context("failed to flush response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "othello-ai".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "clear_board" => {
                self.board.reset();
                (true, String::new())
            }

            "showboard" => (true, format!("\n{}", self.board)),

            "score" => {
                let turn = match self.board.current_player() {
                    Some(p) => format!("{p} to move"),
                    None => GAME_OVER.to_string(),
                };
                (
                    true,
                    format!(
                        "black {} white {} {turn}",
                        self.board.score(Player::Black),
                        self.board.score(Player::White)
                    ),
                )
            }

            "legal_moves" => {
                let Some(player) = self.board.current_player() else {
                    return (true, GAME_OVER.to_string());
                };
                let moves: Vec<String> = self
                    .board
                    .legal_moves(player)
                    .keys()
                    .map(|m| m.to_string())
                    .collect();
                (true, moves.join(" "))
            }

            "time_limit" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<f64>().map(Duration::try_from_secs_f64) {
                    Ok(Ok(limit)) => {
                        self.time_limit = limit;
                        (true, String::new())
                    }
                    _ => (false, "invalid time limit".to_string()),
                }
            }

            "play" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let coord: Coord = match arg.parse() {
                    Ok(c) => c,
                    Err(e) => return (false, e.to_string()),
                };
                match self.board.apply_move(coord) {
                    Ok(_) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(player) = self.board.current_player() else {
                    return (true, GAME_OVER.to_string());
                };
                let engine = SearchEngine::new(&self.board, player, self.time_limit);
                let Some(mv) = engine.time_limited_move() else {
                    return (true, GAME_OVER.to_string());
                };
                if let Err(e) = self.board.apply_move(mv) {
                    return (false, e.to_string());
                }
                info!(%player, %mv, "engine move");
                (true, mv.to_string())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
