//! Othello-AI: an Othello rules engine and alpha-beta opponent.
//!
//! This crate tracks Othello positions (legal moves, disc flipping, turn
//! passing) and chooses moves for an automated player with minimax search
//! and a phase-dependent static evaluator.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, search parameters, and weight tables
//! - [`coord`] - Cell coordinates and their text form
//! - [`board`] - Rules engine (board state, legal moves, move application)
//! - [`eval`] - Static position evaluation
//! - [`search`] - Minimax with alpha-beta pruning and iterative deepening
//! - [`selfplay`] - Automated games between agents
//! - [`shell`] - Line-oriented command protocol
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use othello_ai::board::{BoardState, Player};
//! use othello_ai::search::SearchEngine;
//!
//! // Create a new game and play a move for Black
//! let mut board = BoardState::new();
//! board.apply_move("D3".parse().unwrap()).unwrap();
//!
//! // Ask the engine for White's reply
//! let engine = SearchEngine::new(&board, Player::White, Duration::from_millis(100));
//! let reply = engine.time_limited_move().unwrap();
//! board.apply_move(reply).unwrap();
//! println!("{board}");
//! ```

pub mod board;
pub mod constants;
pub mod coord;
pub mod eval;
pub mod search;
pub mod selfplay;
pub mod shell;
