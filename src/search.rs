//! Minimax search with alpha-beta pruning.
//!
//! This module implements the move selection for the automated player:
//! - Fixed-depth minimax with alpha-beta pruning
//! - Iterative deepening bounded by a time budget
//! - Static move ordering to tighten pruning
//!
//! Nodes are classified by comparing the side to move with the root player
//! rather than by depth parity, since a side with no legal move is skipped
//! and plies do not strictly alternate. Minimizing nodes enumerate the moves
//! of the root player's opponent.
//!
//! Every branch is searched on its own clone of the board, so sibling
//! branches never observe each other's moves.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::board::{BoardState, MoveMap, Player};
use crate::constants::{FIXED_DEPTH, ID_START_DEPTH, ORDERING_WEIGHTS};
use crate::coord::Coord;
use crate::eval::static_evaluation;

/// Outcome of one complete search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best move found, `None` if the root is terminal
    pub best_move: Option<Coord>,
    /// Minimax value from the engine player's point of view
    pub value: f64,
    /// Depth searched
    pub depth: u32,
    /// Nodes visited
    pub nodes: u64,
}

/// Move selection for one side of one position.
///
/// An engine is built for a single decision and keeps its own snapshot of
/// the board; the caller's board is never touched.
pub struct SearchEngine {
    board: BoardState,
    player: Player,
    time_limit: Duration,
}

impl SearchEngine {
    /// Create an engine choosing moves for `player` in `board`.
    pub fn new(board: &BoardState, player: Player, time_limit: Duration) -> Self {
        Self {
            board: board.clone(),
            player,
            time_limit,
        }
    }

    /// Best move at the fixed search depth.
    pub fn best_move(&self) -> Option<Coord> {
        self.search_depth(FIXED_DEPTH).best_move
    }

    /// Best move by iterative deepening.
    ///
    /// Searches depth 3 first, then keeps adding a ply while less than half
    /// the time budget has been used. A depth is never interrupted once
    /// started, so the budget can be overrun by one full iteration.
    pub fn time_limited_move(&self) -> Option<Coord> {
        self.iterative_deepening().best_move
    }

    /// Run iterative deepening and return the last completed result.
    pub fn iterative_deepening(&self) -> SearchResult {
        let start = Instant::now();
        let mut depth = ID_START_DEPTH;
        let mut result = self.search_depth(depth);

        // Every ply fills a cell, so searching deeper than the number of
        // empty cells cannot change the result.
        let max_depth = self.board.empty_count().max(ID_START_DEPTH);

        while !self.board.is_terminal()
            && depth < max_depth
            && start.elapsed() < self.time_limit / 2
        {
            depth += 1;
            result = self.search_depth(depth);
        }

        debug!(
            depth,
            elapsed_ms = start.elapsed().as_millis() as u64,
            budget_ms = self.time_limit.as_millis() as u64,
            "iterative deepening finished"
        );
        result
    }

    /// One complete alpha-beta search to `depth`.
    pub fn search_depth(&self, depth: u32) -> SearchResult {
        let start = Instant::now();
        let mut nodes = 0u64;
        let (value, best_move) = alphabeta(
            &self.board,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            self.player,
            &mut nodes,
        );

        let shown = best_move.map_or_else(|| "none".to_string(), |m| m.to_string());
        debug!(
            player = %self.player,
            depth,
            value,
            best_move = %shown,
            nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search depth completed"
        );

        SearchResult {
            best_move,
            value,
            depth,
            nodes,
        }
    }
}

/// Minimax with alpha-beta pruning from `root`'s point of view.
///
/// Returns the value of `state` and the move achieving it. At depth 0 or on
/// a terminal position, returns the static evaluation and no move.
pub fn minimax(
    state: &BoardState,
    depth: u32,
    alpha: f64,
    beta: f64,
    root: Player,
) -> (f64, Option<Coord>) {
    let mut nodes = 0;
    alphabeta(state, depth, alpha, beta, root, &mut nodes)
}

fn alphabeta(
    state: &BoardState,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    root: Player,
    nodes: &mut u64,
) -> (f64, Option<Coord>) {
    *nodes += 1;

    if depth == 0 || state.is_terminal() {
        return (static_evaluation(state, root), None);
    }

    if state.current_player() == Some(root) {
        let mut best = (f64::NEG_INFINITY, None);
        for mv in order_moves(state.legal_moves(root)) {
            let child = play(state, mv);
            let (score, _) = alphabeta(&child, depth - 1, alpha, beta, root, nodes);
            if score > best.0 {
                best = (score, Some(mv));
            }
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = (f64::INFINITY, None);
        for mv in order_moves(state.legal_moves(root.opponent())) {
            let child = play(state, mv);
            let (score, _) = alphabeta(&child, depth - 1, alpha, beta, root, nodes);
            if score < best.0 {
                best = (score, Some(mv));
            }
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Clone `state` and play `mv` on the clone.
///
/// # Panics
/// If the board rejects a move taken from its own legal-move map. That can
/// only happen if move generation and move application disagree.
fn play(state: &BoardState, mv: Coord) -> BoardState {
    let mut child = state.clone();
    if let Err(e) = child.apply_move(mv) {
        panic!("search enumerated a move the board rejected ({e})\n{state}");
    }
    child
}

/// Moves sorted by descending ordering weight. Ties keep map order.
pub fn order_moves(moves: &MoveMap) -> Vec<Coord> {
    let mut ordered: Vec<Coord> = moves.keys().copied().collect();
    ordered.sort_by_key(|m| std::cmp::Reverse(ORDERING_WEIGHTS[m.index()]));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::constants::NUM_CELLS;

    fn c(s: &str) -> Coord {
        s.parse().unwrap()
    }

    fn setpos(black: &[&str], white: &[&str], to_move: Player) -> BoardState {
        let mut cells = [Cell::Empty; NUM_CELLS];
        for s in black {
            cells[c(s).index()] = Cell::Disc(Player::Black);
        }
        for s in white {
            cells[c(s).index()] = Cell::Disc(Player::White);
        }
        BoardState::from_cells(cells, to_move)
    }

    #[test]
    fn test_order_moves_by_weight() {
        let mut moves = MoveMap::new();
        for s in ["B2", "D3", "A1", "C1", "B1"] {
            moves.insert(c(s), vec![]);
        }
        let ordered: Vec<String> = order_moves(&moves).iter().map(|m| m.to_string()).collect();
        assert_eq!(ordered, ["A1", "C1", "D3", "B1", "B2"]);
    }

    #[test]
    fn test_order_moves_ties_keep_map_order() {
        let b = BoardState::new();
        // All four opening moves weigh 0.
        let ordered = order_moves(b.legal_moves(Player::Black));
        assert_eq!(ordered, [c("C4"), c("D3"), c("E6"), c("F5")]);
    }

    #[test]
    fn test_depth_zero_is_static_evaluation() {
        let b = BoardState::new();
        let (value, mv) = minimax(&b, 0, -5.0, 5.0, Player::White);
        assert_eq!(value, static_evaluation(&b, Player::White));
        assert_eq!(mv, None);
    }

    #[test]
    fn test_best_move_is_legal() {
        let b = BoardState::new();
        let engine = SearchEngine::new(&b, Player::Black, Duration::from_millis(10));
        let mv = engine.best_move().expect("opening has moves");
        assert!(b.legal_moves(Player::Black).contains_key(&mv));
    }

    #[test]
    fn test_engine_takes_corner() {
        // Black C3 brackets White B2 from A1.
        let b = setpos(&["C3", "D5", "E4"], &["B2", "D4", "E5"], Player::Black);
        assert!(b.legal_moves(Player::Black).contains_key(&c("A1")));
        let (_, mv) = minimax(&b, 1, f64::NEG_INFINITY, f64::INFINITY, Player::Black);
        assert_eq!(mv, Some(c("A1")));
        let engine = SearchEngine::new(&b, Player::Black, Duration::ZERO);
        let mv = engine.time_limited_move().expect("black has moves");
        assert!(b.legal_moves(Player::Black).contains_key(&mv));
    }

    #[test]
    fn test_terminal_root_has_no_move() {
        let b = setpos(&["A1", "B1"], &[], Player::Black);
        assert!(b.is_terminal());
        let engine = SearchEngine::new(&b, Player::Black, Duration::from_secs(1));
        assert_eq!(engine.best_move(), None);
        assert_eq!(engine.time_limited_move(), None);
    }

    #[test]
    fn test_zero_budget_stops_after_first_depth() {
        let b = BoardState::new();
        let engine = SearchEngine::new(&b, Player::White, Duration::ZERO);
        let result = engine.iterative_deepening();
        assert_eq!(result.depth, ID_START_DEPTH);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_deepening_goes_past_first_depth() {
        let b = BoardState::new();
        let engine = SearchEngine::new(&b, Player::Black, Duration::from_millis(400));
        let result = engine.iterative_deepening();
        assert!(result.depth > ID_START_DEPTH, "stopped at depth {}", result.depth);
        assert!(b.legal_moves(Player::Black).contains_key(&result.best_move.unwrap()));
    }

    #[test]
    fn test_deepening_stops_at_empty_cell_count() {
        // Everything black except A1-E1 empty and White on F1, A2, B2.
        let mut cells = [Cell::Disc(Player::Black); NUM_CELLS];
        for s in ["A1", "B1", "C1", "D1", "E1"] {
            cells[c(s).index()] = Cell::Empty;
        }
        for s in ["F1", "A2", "B2"] {
            cells[c(s).index()] = Cell::Disc(Player::White);
        }
        let b = BoardState::from_cells(cells, Player::Black);
        assert!(!b.is_terminal());
        assert_eq!(b.empty_count(), 5);

        let engine = SearchEngine::new(&b, Player::Black, Duration::from_secs(10));
        let result = engine.iterative_deepening();
        assert_eq!(result.depth, b.empty_count());

        let depth = b.empty_count();
        let (value, mv) = minimax(&b, depth, f64::NEG_INFINITY, f64::INFINITY, Player::Black);
        assert_eq!(result.best_move, mv);
        assert_eq!(result.value, value);
    }

    #[test]
    fn test_search_leaves_caller_board_untouched() {
        let b = BoardState::new();
        let before = b.clone();
        let engine = SearchEngine::new(&b, Player::Black, Duration::ZERO);
        engine.best_move();
        assert_eq!(b, before);
    }
}
