//! Chess piece representation.

use crate::{Color, Square};

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const COMBINED: [(i8, i8); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Returns the display letter for this kind, uppercase for White.
    pub const fn symbol(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Step vectors as `(row, col)` offsets.
    ///
    /// Pawns have no fixed step set; their single forward vector depends on
    /// color and is handled by the move generator.
    pub const fn directions(self) -> &'static [(i8, i8)] {
        match self {
            PieceKind::Pawn => &[],
            PieceKind::Knight => &KNIGHT,
            PieceKind::Bishop => &DIAGONAL,
            PieceKind::Rook => &ORTHOGONAL,
            PieceKind::Queen | PieceKind::King => &COMBINED,
        }
    }

    /// How many steps the piece may take along one direction.
    ///
    /// For pawns this is the forward distance of an unmoved pawn.
    pub const fn max_distance(self) -> u8 {
        match self {
            PieceKind::Pawn => 2,
            PieceKind::Knight | PieceKind::King => 1,
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => 8,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// Stable identifier of a piece record inside a board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u16);

impl PieceId {
    #[inline]
    pub const fn new(index: u16) -> Self {
        PieceId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single piece on (or captured from) the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    /// Current square, or the square it was captured on.
    pub square: Square,
    /// Set once the piece has made a committed move.
    pub moved: bool,
}

impl Piece {
    /// Creates an unmoved piece.
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square,
            moved: false,
        }
    }

    /// Row step of a pawn of this color.
    #[inline]
    pub const fn forward(&self) -> i8 {
        self.color.pawn_direction()
    }

    /// Row on which a pawn of this color promotes.
    #[inline]
    pub const fn promotion_row(&self) -> u8 {
        self.color.promotion_row()
    }

    /// Display letter, uppercase for White.
    #[inline]
    pub const fn symbol(&self) -> char {
        self.kind.symbol(self.color)
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
