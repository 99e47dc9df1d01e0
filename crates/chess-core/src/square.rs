//! Board square representation.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when reading a square from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid coordinate '{0}': expected a file a-h followed by a rank 1-8")]
    InvalidCoordinate(String),
}

/// A square on the chess board.
///
/// Squares are addressed by `(row, col)`, both in `0..8`. Row 0 is Black's
/// back rank (rank 8) and row 7 is White's (rank 1); column 0 is file a.
/// Internally the square is stored as `row * 8 + col`, so `a8 = 0` and
/// `h1 = 63`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from row and column, or `None` if either is outside `0..8`.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    /// Returns true if `(row, col)` lies on the board.
    #[inline]
    pub const fn in_bounds(row: i8, col: i8) -> bool {
        row >= 0 && row < 8 && col >= 0 && col < 8
    }

    /// Parses a square from algebraic notation (e.g., "e4", "E4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Square::new(b'8' - rank, file - b'a')
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square `dr` rows and `dc` columns away, if it is on the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if !Square::in_bounds(row, col) {
            return None;
        }
        Square::new(row as u8, col as u8)
    }

    /// Iterates over all 64 squares, row by row starting at a8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.col()) as char, (b'8' - self.row()) as char)
    }

    // Corner and king squares
    pub const A8: Square = Square(0);
    pub const E8: Square = Square(4);
    pub const H8: Square = Square(7);
    pub const A1: Square = Square(56);
    pub const E1: Square = Square(60);
    pub const H1: Square = Square(63);
}

/// Parses a two-character algebraic coordinate such as `"a1"`.
pub fn parse_square(text: &str) -> Result<Square, SquareError> {
    Square::from_algebraic(text).ok_or_else(|| SquareError::InvalidCoordinate(text.to_string()))
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_square(s)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
