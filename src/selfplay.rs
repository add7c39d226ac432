//! Automated games between engines.
//!
//! Plays a full game from the opening position to the end, with each side
//! controlled by an [`Agent`]. Used by the `selfplay` command and for
//! sanity-checking the engine against a random mover.

use std::time::Duration;

use tracing::{debug, info};

use crate::board::{BoardState, MoveError, Player};
use crate::coord::Coord;
use crate::search::SearchEngine;

/// Who picks the moves for one side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Agent {
    /// Iterative deepening within the given budget
    Search { time_limit: Duration },
    /// Fixed-depth search
    Fixed,
    /// Uniformly random legal move
    Random,
}

impl Agent {
    /// Choose a move for the side to move. `None` only on a finished game.
    pub fn choose(&self, board: &BoardState, rng: &mut fastrand::Rng) -> Option<Coord> {
        let player = board.current_player()?;
        match *self {
            Agent::Search { time_limit } => {
                SearchEngine::new(board, player, time_limit).time_limited_move()
            }
            Agent::Fixed => SearchEngine::new(board, player, Duration::ZERO).best_move(),
            Agent::Random => {
                let moves = board.legal_moves(player);
                if moves.is_empty() {
                    return None;
                }
                moves.keys().nth(rng.usize(..moves.len())).copied()
            }
        }
    }
}

/// A finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Moves in the order they were played, with the side that played each
    pub moves: Vec<(Player, Coord)>,
    /// Final position
    pub board: BoardState,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    /// Moves as space-separated coordinates.
    pub fn transcript(&self) -> String {
        self.moves
            .iter()
            .map(|(_, c)| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Play one game from the opening position until neither side can move.
///
/// # Errors
/// Returns an error if an agent proposes an illegal move.
pub fn play_game(
    black: Agent,
    white: Agent,
    rng: &mut fastrand::Rng,
) -> Result<GameRecord, MoveError> {
    let mut board = BoardState::new();
    let mut moves = Vec::new();

    while let Some(player) = board.current_player() {
        let agent = match player {
            Player::Black => black,
            Player::White => white,
        };
        let Some(mv) = agent.choose(&board, rng) else {
            break;
        };
        board.apply_move(mv)?;
        debug!(
            %player,
            %mv,
            black = board.score(Player::Black),
            white = board.score(Player::White),
            "move played"
        );
        moves.push((player, mv));
    }

    info!(
        plies = moves.len(),
        black = board.score(Player::Black),
        white = board.score(Player::White),
        "game over"
    );
    Ok(GameRecord { moves, board })
}
