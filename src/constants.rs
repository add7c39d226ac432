//! Constants for board geometry, search parameters, and evaluation weights.
//!
//! This module contains all the configuration constants for the Othello engine.
//! Cells are addressed by a packed index `file * 8 + rank`, so file A is
//! indices 0..8, file B is 8..16, and so on. Every table in this module uses
//! that layout.

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Othello is always played on 8x8.
pub const N: usize = 8;

/// Total number of cells.
pub const NUM_CELLS: usize = N * N;

/// Offsets to the 8 neighbouring cells as `(file, rank)` steps.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Packed indices of A1, H1, A8 and H8.
pub const CORNERS: [usize; 4] = [0, 7 * N, N - 1, 7 * N + N - 1];

// =============================================================================
// Search Parameters
// =============================================================================

/// Depth used by the fixed-depth search.
pub const FIXED_DEPTH: u32 = 5;

/// First depth tried by iterative deepening.
pub const ID_START_DEPTH: u32 = 3;

/// Time budget handed to the automated opponent by the turn driver.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(4);

// =============================================================================
// Evaluation Phases and Coefficients
// =============================================================================

/// Positions with fewer discs than this are scored as the opening.
pub const OPENING_END: u32 = 19;

/// Positions with at least this many discs are scored as the endgame.
pub const ENDGAME_START: u32 = 57;

/// Multiplier for the final disc difference of a finished game.
pub const TERMINAL_WEIGHT: f64 = 100_000.0;

/// Weight shared by the corner and corner-stability terms in every phase.
pub const CORNER_WEIGHT: f64 = 10_000.0;

pub const OPENING_MOBILITY: f64 = 5.0;
pub const OPENING_POSITIONAL: f64 = 20.0;

pub const MIDGAME_DISCS: f64 = 10.0;
pub const MIDGAME_MOBILITY: f64 = 2.0;
pub const MIDGAME_POSITIONAL: f64 = 10.0;
pub const MIDGAME_PARITY: f64 = 100.0;

pub const ENDGAME_DISCS: f64 = 500.0;
pub const ENDGAME_PARITY: f64 = 500.0;

// =============================================================================
// Weight Tables
// =============================================================================

/// Positional value of each cell for the evaluator.
///
/// The table is symmetric under swapping file and rank, so it reads the same
/// whether rows are taken as files or ranks.
pub const POSITION_WEIGHTS: [i32; NUM_CELLS] = [
    500, -100, 100, 50, 50, 100, -100, 500, //
    -100, -200, -50, -50, -50, -50, -200, -100, //
    100, -50, 100, 0, 0, 100, -50, 100, //
    50, -50, 0, 0, 0, 0, -50, 50, //
    50, -50, 0, 0, 0, 0, -50, 50, //
    100, -50, 100, 0, 0, 100, -50, 100, //
    -100, -200, -50, -50, -50, -50, -200, -100, //
    500, -100, 100, 50, 50, 100, -100, 500, //
];

/// Move-ordering weights. Same shape as [`POSITION_WEIGHTS`] with milder corners.
pub const ORDERING_WEIGHTS: [i32; NUM_CELLS] = [
    200, -100, 100, 50, 50, 100, -100, 200, //
    -100, -200, -50, -50, -50, -50, -200, -100, //
    100, -50, 100, 0, 0, 100, -50, 100, //
    50, -50, 0, 0, 0, 0, -50, 50, //
    50, -50, 0, 0, 0, 0, -50, 50, //
    100, -50, 100, 0, 0, 100, -50, 100, //
    -100, -200, -50, -50, -50, -50, -200, -100, //
    200, -100, 100, 50, 50, 100, -100, 200, //
];

/// Cells of the A1 quadrant whose weight is zeroed once A1 is occupied,
/// as `(file, rank)` offsets from the corner.
const CORNER_ZONE: [(usize, usize); 12] = [
    (1, 0),
    (2, 0),
    (3, 0),
    (0, 1),
    (1, 1),
    (2, 1),
    (3, 1),
    (0, 2),
    (1, 2),
    (2, 2),
    (0, 3),
    (1, 3),
];

/// Mirror [`CORNER_ZONE`] onto the given corner and pack it into a bitmask.
const fn zone_mask(corner: usize) -> u64 {
    let flip_file = corner / N != 0;
    let flip_rank = corner % N != 0;
    let mut mask = 0u64;
    let mut i = 0;
    while i < CORNER_ZONE.len() {
        let (df, dr) = CORNER_ZONE[i];
        let file = if flip_file { N - 1 - df } else { df };
        let rank = if flip_rank { N - 1 - dr } else { dr };
        mask |= 1u64 << (file * N + rank);
        i += 1;
    }
    mask
}

/// Per-corner zones, in the same order as [`CORNERS`].
pub const CORNER_ZONES: [u64; 4] = [
    zone_mask(CORNERS[0]),
    zone_mask(CORNERS[1]),
    zone_mask(CORNERS[2]),
    zone_mask(CORNERS[3]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_tables_symmetric() {
        for file in 0..N {
            for rank in 0..N {
                assert_eq!(
                    POSITION_WEIGHTS[file * N + rank],
                    POSITION_WEIGHTS[rank * N + file]
                );
                assert_eq!(
                    ORDERING_WEIGHTS[file * N + rank],
                    ORDERING_WEIGHTS[rank * N + file]
                );
            }
        }
    }

    #[test]
    fn test_tables_differ_only_at_corners() {
        for i in 0..NUM_CELLS {
            if CORNERS.contains(&i) {
                assert_eq!(POSITION_WEIGHTS[i], 500);
                assert_eq!(ORDERING_WEIGHTS[i], 200);
            } else {
                assert_eq!(POSITION_WEIGHTS[i], ORDERING_WEIGHTS[i]);
            }
        }
    }

    #[test]
    fn test_corner_zones() {
        for (zone, &corner) in CORNER_ZONES.iter().zip(CORNERS.iter()) {
            assert_eq!(zone.count_ones(), 12);
            assert_eq!(zone & (1u64 << corner), 0, "zone must not include its corner");
        }
        // H8's zone contains G7 (the X-square) and E8.
        let g7 = 6 * N + 6;
        let e8 = 4 * N + 7;
        assert_ne!(CORNER_ZONES[3] & (1u64 << g7), 0);
        assert_ne!(CORNER_ZONES[3] & (1u64 << e8), 0);
        // Zones are disjoint.
        let total: u64 = CORNER_ZONES.iter().fold(0, |acc, z| acc | z);
        assert_eq!(total.count_ones(), 48);
    }
}
