//! Cell coordinates.
//!
//! A [`Coord`] is a packed index `file * 8 + rank` in `0..64`. Its text form
//! is a file letter A-H followed by a rank digit 1-8, e.g. `"D4"`. The letter
//! is parsed case-insensitively.

use std::fmt;
use std::str::FromStr;

use crate::constants::{CORNERS, N, NUM_CELLS};

/// A cell on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(u8);

/// A1, H1, A8 and H8, in the order of [`CORNERS`].
pub const CORNER_CELLS: [Coord; 4] = [
    Coord(CORNERS[0] as u8),
    Coord(CORNERS[1] as u8),
    Coord(CORNERS[2] as u8),
    Coord(CORNERS[3] as u8),
];

impl Coord {
    /// Build a coordinate from a 0-based file and rank. Returns `None` off the board.
    pub fn new(file: usize, rank: usize) -> Option<Self> {
        if file < N && rank < N {
            Some(Coord((file * N + rank) as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// 0-based file (A = 0).
    #[inline]
    pub fn file(self) -> usize {
        self.index() / N
    }

    /// 0-based rank (1 = 0).
    #[inline]
    pub fn rank(self) -> usize {
        self.index() % N
    }

    /// The cell `(df, dr)` steps away, or `None` when that leaves the board.
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file() as isize + df as isize;
        let rank = self.rank() as isize + dr as isize;
        if (0..N as isize).contains(&file) && (0..N as isize).contains(&rank) {
            Some(Coord((file as usize * N + rank as usize) as u8))
        } else {
            None
        }
    }

    /// Bit for this cell in a 64-bit cell set.
    #[inline]
    pub fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// All 64 cells in index order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..NUM_CELLS as u8).map(Coord)
    }
}

/// Error returned when text is not a valid coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCoordError(String);

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid coordinate '{}': expected A-H followed by 1-8", self.0)
    }
}

impl std::error::Error for ParseCoordError {}

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError(s.to_string());
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(err());
        }

        let file = bytes[0].to_ascii_uppercase();
        let rank = bytes[1];
        if !(b'A'..=b'H').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(err());
        }

        Coord::new((file - b'A') as usize, (rank - b'1') as usize).ok_or_else(err)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'A' + self.file() as u8) as char;
        write!(f, "{file}{}", self.rank() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord_packing() {
        let a1: Coord = "A1".parse().unwrap();
        let h8: Coord = "H8".parse().unwrap();
        let d4: Coord = "d4".parse().unwrap();
        assert_eq!(a1.index(), 0);
        assert_eq!(h8.index(), 63);
        assert_eq!(d4.file(), 3);
        assert_eq!(d4.rank(), 3);
        assert_eq!(d4.index(), 3 * 8 + 3);
    }

    #[test]
    fn test_parse_str_coord_roundtrip() {
        for c in Coord::all() {
            let s = c.to_string();
            let parsed: Coord = s.parse().unwrap();
            assert_eq!(c, parsed, "Failed roundtrip for {}", s);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "A", "A0", "A9", "I1", "11", "AA", "A10", "pass"] {
            assert!(bad.parse::<Coord>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_offset_edges() {
        let a1 = Coord::new(0, 0).unwrap();
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(a1.offset(1, 1), Coord::new(1, 1));
        let h8 = Coord::new(7, 7).unwrap();
        assert_eq!(h8.offset(1, 0), None);
        assert_eq!(CORNER_CELLS[0], a1);
        assert_eq!(CORNER_CELLS[3], h8);
        assert_eq!(CORNER_CELLS[1].to_string(), "H1");
        assert_eq!(CORNER_CELLS[2].to_string(), "A8");
        assert_eq!(h8.offset(-7, -7), Some(a1));
    }
}
