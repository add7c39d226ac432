//! Othello rules engine.
//!
//! This module provides the core game logic, including:
//! - Board state (cells, disc counts, turn owner)
//! - Legal move generation with capture lists
//! - Move application with disc flipping
//! - Turn passing and game-over detection
//!
//! Move generation only looks at the frontier: empty cells next to at least
//! one disc. The frontier is kept up to date incrementally, and both players'
//! legal-move maps are rebuilt from it after every move.

use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

use crate::constants::{DIRECTIONS, N, NUM_CELLS};
use crate::coord::Coord;

/// A side in the game. Black moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    #[inline]
    fn idx(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}

/// Contents of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Disc(Player),
}

/// Legal moves for one player: move -> discs it would flip, in scan order.
pub type MoveMap = BTreeMap<Coord, Vec<Coord>>;

/// Result of attempting to apply a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The cell is not in the current player's legal-move map
    /// (this includes every move on a finished game).
    Illegal(Coord),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Illegal(c) => write!(f, "illegal move: {c}"),
        }
    }
}

impl std::error::Error for MoveError {}

/// An Othello position.
///
/// Cloning produces a fully independent copy; nothing is shared between
/// the clone and the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    /// Cell contents, indexed by packed coordinate
    cells: [Cell; NUM_CELLS],
    /// Disc counts, indexed by player
    score: [u32; 2],
    /// Side to move, `None` once neither side can move
    current: Option<Player>,
    /// Bitmask of empty cells adjacent to at least one disc
    frontier: u64,
    /// Cached legal-move maps, indexed by player
    moves: [MoveMap; 2],
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Create the standard opening: White on D4 and E5, Black on D5 and E4,
    /// Black to move.
    pub fn new() -> Self {
        let mut cells = [Cell::Empty; NUM_CELLS];
        for (file, rank, player) in [
            (3, 3, Player::White),
            (4, 4, Player::White),
            (3, 4, Player::Black),
            (4, 3, Player::Black),
        ] {
            cells[file * N + rank] = Cell::Disc(player);
        }
        Self::from_cells(cells, Player::Black)
    }

    /// Build an arbitrary position.
    ///
    /// Scores, frontier and legal moves are derived from `cells`. The turn
    /// goes to `to_move` if it has a legal move, otherwise to its opponent,
    /// otherwise the position is terminal.
    pub fn from_cells(cells: [Cell; NUM_CELLS], to_move: Player) -> Self {
        let mut state = BoardState {
            cells,
            score: [0; 2],
            current: None,
            frontier: 0,
            moves: [MoveMap::new(), MoveMap::new()],
        };

        for c in Coord::all() {
            match state.cells[c.index()] {
                Cell::Disc(p) => state.score[p.idx()] += 1,
                Cell::Empty => {
                    let touches_disc = DIRECTIONS.iter().any(|&(df, dr)| {
                        c.offset(df, dr)
                            .is_some_and(|n| state.cells[n.index()] != Cell::Empty)
                    });
                    if touches_disc {
                        state.frontier |= c.bit();
                    }
                }
            }
        }

        state.update_moves();
        state.current = state.next_turn(to_move.opponent());
        state
    }

    /// Reset to the opening position.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Contents of a cell.
    #[inline]
    pub fn disc_at(&self, c: Coord) -> Cell {
        self.cells[c.index()]
    }

    #[inline]
    pub fn is_occupied(&self, c: Coord) -> bool {
        self.cells[c.index()] != Cell::Empty
    }

    /// Side to move, or `None` if the game is over.
    #[inline]
    pub fn current_player(&self) -> Option<Player> {
        self.current
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.current.is_none()
    }

    /// Number of discs owned by `player`.
    #[inline]
    pub fn score(&self, player: Player) -> u32 {
        self.score[player.idx()]
    }

    /// Total discs on the board.
    #[inline]
    pub fn disc_count(&self) -> u32 {
        self.score[0] + self.score[1]
    }

    pub fn empty_count(&self) -> u32 {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count() as u32
    }

    /// Cached legal moves for `player`, with the discs each would flip.
    #[inline]
    pub fn legal_moves(&self, player: Player) -> &MoveMap {
        &self.moves[player.idx()]
    }

    /// Empty cells adjacent to a disc.
    pub fn frontier(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(|c| self.frontier & c.bit() != 0)
    }

    /// Winner of a finished game. `None` for a draw or a game in progress.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_terminal() {
            return None;
        }
        let black = self.score(Player::Black);
        let white = self.score(Player::White);
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Play `c` for the side to move.
    ///
    /// Places the disc, flips its captures, updates scores, frontier and
    /// legal moves, then hands the turn over (or not, see [`Self::next_turn`]).
    /// Returns the number of discs flipped.
    ///
    /// # Errors
    /// [`MoveError::Illegal`] if `c` is not a legal move for the side to move.
    /// The position is left untouched in that case.
    pub fn apply_move(&mut self, c: Coord) -> Result<usize, MoveError> {
        let Some(mover) = self.current else {
            trace!(%c, "move rejected: game is over");
            return Err(MoveError::Illegal(c));
        };
        let Some(captures) = self.moves[mover.idx()].remove(&c) else {
            trace!(%c, %mover, "move rejected: not in legal-move map");
            return Err(MoveError::Illegal(c));
        };

        self.cells[c.index()] = Cell::Disc(mover);
        self.add_to_frontier(c);
        for &f in &captures {
            self.cells[f.index()] = Cell::Disc(mover);
        }

        let flips = captures.len() as u32;
        self.score[mover.idx()] += 1 + flips;
        self.score[mover.opponent().idx()] -= flips;

        self.update_moves();
        self.current = self.next_turn(mover);
        Ok(captures.len())
    }

    /// Turn owner after `mover` has played: the opponent if it can move,
    /// else `mover` again if it can move, else nobody.
    fn next_turn(&self, mover: Player) -> Option<Player> {
        let opp = mover.opponent();
        if !self.moves[opp.idx()].is_empty() {
            Some(opp)
        } else if !self.moves[mover.idx()].is_empty() {
            Some(mover)
        } else {
            None
        }
    }

    /// Remove a newly occupied cell from the frontier and add its empty neighbours.
    fn add_to_frontier(&mut self, c: Coord) {
        self.frontier &= !c.bit();
        for &(df, dr) in &DIRECTIONS {
            if let Some(n) = c.offset(df, dr) {
                if self.cells[n.index()] == Cell::Empty {
                    self.frontier |= n.bit();
                }
            }
        }
    }

    /// Rebuild both legal-move maps from the frontier.
    fn update_moves(&mut self) {
        let mut black = MoveMap::new();
        let mut white = MoveMap::new();
        for c in self.frontier() {
            let caps = self.captures(c, Player::Black);
            if !caps.is_empty() {
                black.insert(c, caps);
            }
            let caps = self.captures(c, Player::White);
            if !caps.is_empty() {
                white.insert(c, caps);
            }
        }
        self.moves = [black, white];
    }

    /// Discs `player` would flip by playing at `c`.
    ///
    /// Scans each of the 8 directions: a run of opponent discs ending on one
    /// of `player`'s discs is captured; a run ending at the edge or an empty
    /// cell captures nothing.
    pub fn captures(&self, c: Coord, player: Player) -> Vec<Coord> {
        let mut flips = Vec::new();
        if self.is_occupied(c) {
            return flips;
        }

        let opp = Cell::Disc(player.opponent());
        let own = Cell::Disc(player);
        for &(df, dr) in &DIRECTIONS {
            let mut run = Vec::new();
            let mut next = c.offset(df, dr);
            while let Some(n) = next {
                let cell = self.cells[n.index()];
                if cell == opp {
                    run.push(n);
                    next = n.offset(df, dr);
                } else {
                    if cell == own {
                        flips.extend_from_slice(&run);
                    }
                    break;
                }
            }
        }
        flips
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  A B C D E F G H")?;
        for rank in (0..N).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..N {
                let ch = match self.cells[file * N + rank] {
                    Cell::Disc(Player::Black) => 'X',
                    Cell::Disc(Player::White) => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "X {} - O {}",
            self.score(Player::Black),
            self.score(Player::White)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_opening_position() {
        let b = BoardState::new();
        assert_eq!(b.disc_at(c("D4")), Cell::Disc(Player::White));
        assert_eq!(b.disc_at(c("E5")), Cell::Disc(Player::White));
        assert_eq!(b.disc_at(c("D5")), Cell::Disc(Player::Black));
        assert_eq!(b.disc_at(c("E4")), Cell::Disc(Player::Black));
        assert_eq!(b.current_player(), Some(Player::Black));
        assert_eq!(b.score(Player::Black), 2);
        assert_eq!(b.score(Player::White), 2);
        assert_eq!(b.frontier().count(), 12);
    }

    #[test]
    fn test_opening_moves() {
        let b = BoardState::new();
        let black: Vec<String> = b
            .legal_moves(Player::Black)
            .keys()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(black, ["C4", "D3", "E6", "F5"]);
        assert_eq!(b.legal_moves(Player::Black)[&c("D3")], vec![c("D4")]);
        assert_eq!(b.legal_moves(Player::White).len(), 4);
    }

    #[test]
    fn test_apply_move_flips() {
        let mut b = BoardState::new();
        let flipped = b.apply_move(c("D3")).unwrap();
        assert_eq!(flipped, 1);
        assert_eq!(b.disc_at(c("D3")), Cell::Disc(Player::Black));
        assert_eq!(b.disc_at(c("D4")), Cell::Disc(Player::Black));
        assert_eq!(b.score(Player::Black), 4);
        assert_eq!(b.score(Player::White), 1);
        assert_eq!(b.current_player(), Some(Player::White));
    }

    #[test]
    fn test_frontier_tracks_occupancy() {
        let mut b = BoardState::new();
        b.apply_move(c("D3")).unwrap();
        let frontier: Vec<Coord> = b.frontier().collect();
        assert!(!frontier.contains(&c("D3")));
        assert!(frontier.contains(&c("D2")));
        assert!(frontier.contains(&c("C2")));
        for f in frontier {
            assert!(!b.is_occupied(f));
        }
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut b = BoardState::new();
        let before = b.clone();
        assert_eq!(b.apply_move(c("A1")), Err(MoveError::Illegal(c("A1"))));
        assert_eq!(b.apply_move(c("D4")), Err(MoveError::Illegal(c("D4"))));
        assert_eq!(b, before);
    }

    #[test]
    fn test_captures_multiple_directions() {
        // Black A1 brackets B1 against C1 and B2 against C3.
        let mut cells = [Cell::Empty; NUM_CELLS];
        for s in ["C1", "C3", "A3"] {
            cells[c(s).index()] = Cell::Disc(Player::Black);
        }
        for s in ["B1", "B2"] {
            cells[c(s).index()] = Cell::Disc(Player::White);
        }
        let b = BoardState::from_cells(cells, Player::Black);
        let caps = b.captures(c("A1"), Player::Black);
        assert_eq!(caps.len(), 2);
        assert!(caps.contains(&c("B1")));
        assert!(caps.contains(&c("B2")));
        // White at A2 has nothing to bracket.
        assert!(b.captures(c("A2"), Player::White).is_empty());
    }

    #[test]
    fn test_display() {
        let b = BoardState::new();
        let text = b.to_string();
        assert!(text.starts_with("  A B C D E F G H"));
        assert!(text.contains("4 . . . O X . . . "));
        assert!(text.ends_with("X 2 - O 2"));
    }

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent(), Player::Black);
    }
}
