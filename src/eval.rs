//! Static position evaluation.
//!
//! Scores a position from one player's point of view by blending several
//! heuristics. Which heuristics apply, and how strongly, depends on the game
//! phase, measured by the number of discs on the board:
//!
//! - Terminal: final disc difference, scaled so it dominates everything else
//! - Opening (< 19 discs): mobility, positional weights, corners, stability
//! - Midgame (< 57 discs): adds disc difference and parity
//! - Endgame: disc difference, parity, corners, stability

use crate::board::{BoardState, Cell, Player};
use crate::constants::*;
use crate::coord::{CORNER_CELLS, Coord};

/// Game phase used to pick the evaluation formula.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Terminal,
    Opening,
    Midgame,
    Endgame,
}

pub fn phase(state: &BoardState) -> Phase {
    let discs = state.disc_count();
    if state.is_terminal() {
        Phase::Terminal
    } else if discs < OPENING_END {
        Phase::Opening
    } else if discs < ENDGAME_START {
        Phase::Midgame
    } else {
        Phase::Endgame
    }
}

/// Score `state` for `player`. Higher is better for `player`.
pub fn static_evaluation(state: &BoardState, player: Player) -> f64 {
    let corner_terms =
        || CORNER_WEIGHT * corners(state, player) + CORNER_WEIGHT * stability(state, player);

    match phase(state) {
        Phase::Terminal => TERMINAL_WEIGHT * final_difference(state, player),
        Phase::Opening => {
            OPENING_MOBILITY * mobility(state, player)
                + OPENING_POSITIONAL * positional(state, player)
                + corner_terms()
        }
        Phase::Midgame => {
            MIDGAME_DISCS * disc_difference(state, player)
                + MIDGAME_MOBILITY * mobility(state, player)
                + MIDGAME_POSITIONAL * positional(state, player)
                + MIDGAME_PARITY * parity(state)
                + corner_terms()
        }
        Phase::Endgame => {
            ENDGAME_DISCS * disc_difference(state, player)
                + ENDGAME_PARITY * parity(state)
                + corner_terms()
        }
    }
}

/// Raw disc difference.
fn final_difference(state: &BoardState, player: Player) -> f64 {
    state.score(player) as f64 - state.score(player.opponent()) as f64
}

/// Disc difference as a percentage of discs on the board.
pub fn disc_difference(state: &BoardState, player: Player) -> f64 {
    let own = state.score(player) as f64;
    let opp = state.score(player.opponent()) as f64;
    100.0 * (own - opp) / (own + opp)
}

/// Relative number of legal moves.
pub fn mobility(state: &BoardState, player: Player) -> f64 {
    let own = state.legal_moves(player).len() as f64;
    let opp = state.legal_moves(player.opponent()).len() as f64;
    100.0 * (own - opp) / (own + opp + 1.0)
}

/// Per-cell weight, with the quadrant around each occupied corner zeroed.
pub fn cell_weights(state: &BoardState) -> [i32; NUM_CELLS] {
    let mut weights = POSITION_WEIGHTS;
    for (&corner, &zone) in CORNER_CELLS.iter().zip(CORNER_ZONES.iter()) {
        if !state.is_occupied(corner) {
            continue;
        }
        for (i, w) in weights.iter_mut().enumerate() {
            if zone & (1u64 << i) != 0 {
                *w = 0;
            }
        }
    }
    weights
}

/// Sum of cell weights over the cells `player` owns.
pub fn positional(state: &BoardState, player: Player) -> f64 {
    let weights = cell_weights(state);
    Coord::all()
        .filter(|&c| state.disc_at(c) == Cell::Disc(player))
        .map(|c| weights[c.index()] as f64)
        .sum()
}

/// Relative corner ownership.
pub fn corners(state: &BoardState, player: Player) -> f64 {
    let mut own = 0.0;
    let mut opp = 0.0;
    for &corner in &CORNER_CELLS {
        match state.disc_at(corner) {
            Cell::Disc(p) if p == player => own += 1.0,
            Cell::Disc(_) => opp += 1.0,
            Cell::Empty => {}
        }
    }
    100.0 * (own - opp) / (own + opp + 1.0)
}

/// `+1` if an even number of cells is left, `-1` if odd.
pub fn parity(state: &BoardState) -> f64 {
    if state.empty_count() % 2 == 1 { -1.0 } else { 1.0 }
}

/// Own stable edge discs minus the opponent's.
pub fn stability(state: &BoardState, player: Player) -> f64 {
    stable_discs(state, player) as f64 - stable_discs(state, player.opponent()) as f64
}

/// Discs in unbroken runs anchored at a corner `player` owns.
///
/// For each owned corner, counts the corner plus the contiguous `player`
/// discs along both edges leaving it. A run stops at the first cell not
/// owned by `player`.
pub fn stable_discs(state: &BoardState, player: Player) -> u32 {
    let own = Cell::Disc(player);
    let mut count = 0;
    for &corner in &CORNER_CELLS {
        if state.disc_at(corner) != own {
            continue;
        }
        count += 1;

        let df = if corner.file() == 0 { 1 } else { -1 };
        let dr = if corner.rank() == 0 { 1 } else { -1 };
        for (sf, sr) in [(df, 0), (0, dr)] {
            let mut next = corner.offset(sf, sr);
            while let Some(c) = next {
                if state.disc_at(c) != own {
                    break;
                }
                count += 1;
                next = c.offset(sf, sr);
            }
        }
    }
    count
}
