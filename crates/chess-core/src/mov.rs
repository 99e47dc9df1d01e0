//! Move representation.

use crate::{Color, PieceId, PieceKind, Square};
use std::fmt;

/// What kind of state transition a move performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Move to an empty square.
    Quiet,
    /// Capture of the piece standing on the destination.
    Capture,
    /// Pawn advancing two rows from its starting square.
    DoubleStep,
    /// Pawn capture of a pawn that just double-stepped past it.
    EnPassant,
    /// King moves two columns towards the h-file rook, which jumps over it.
    CastleKingside,
    /// King moves two columns towards the a-file rook, which jumps over it.
    CastleQueenside,
    /// Pawn reaching its last row, replaced by the given kind.
    Promotion(PieceKind),
}

impl MoveKind {
    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveKind::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self, MoveKind::Promotion(_))
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }
}

/// A piece taken by a move, and where it stood when taken.
///
/// The square differs from the move's destination for en passant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capture {
    pub piece: PieceId,
    pub square: Square,
}

/// A chess move.
///
/// Carries everything needed to undo it exactly: the moving piece, the
/// captured piece and its square, and the promotion kind. Castling is a
/// single move; the rook's relocation is implied by the kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    kind: MoveKind,
    actor: PieceId,
    captured: Option<Capture>,
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a non-capturing move of the given kind.
    #[inline]
    pub const fn new(kind: MoveKind, actor: PieceId, from: Square, to: Square) -> Self {
        Move {
            kind,
            actor,
            captured: None,
            from,
            to,
        }
    }

    /// Creates a quiet move.
    #[inline]
    pub const fn quiet(actor: PieceId, from: Square, to: Square) -> Self {
        Self::new(MoveKind::Quiet, actor, from, to)
    }

    /// Creates a capture of `victim`, which stands on `to`.
    #[inline]
    pub const fn capture(actor: PieceId, from: Square, to: Square, victim: PieceId) -> Self {
        Move {
            kind: MoveKind::Capture,
            actor,
            captured: Some(Capture {
                piece: victim,
                square: to,
            }),
            from,
            to,
        }
    }

    /// Creates an en passant capture of the pawn standing on `victim_square`.
    #[inline]
    pub const fn en_passant(
        actor: PieceId,
        from: Square,
        to: Square,
        victim: PieceId,
        victim_square: Square,
    ) -> Self {
        Move {
            kind: MoveKind::EnPassant,
            actor,
            captured: Some(Capture {
                piece: victim,
                square: victim_square,
            }),
            from,
            to,
        }
    }

    /// Creates a promotion, optionally capturing on the destination.
    #[inline]
    pub const fn promotion(
        actor: PieceId,
        from: Square,
        to: Square,
        promote_to: PieceKind,
        captured: Option<Capture>,
    ) -> Self {
        Move {
            kind: MoveKind::Promotion(promote_to),
            actor,
            captured,
            from,
            to,
        }
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// The piece making the move.
    #[inline]
    pub const fn actor(self) -> PieceId {
        self.actor
    }

    #[inline]
    pub const fn captured(self) -> Option<Capture> {
        self.captured
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// For castling, the rook's origin and destination squares.
    ///
    /// The rook starts in the corner on the king's row and lands on the
    /// square the king passed over.
    pub const fn rook_squares(self) -> Option<(Square, Square)> {
        let row = self.from.row();
        let (rook_col, rook_to_col) = match self.kind {
            MoveKind::CastleKingside => (7, self.to.col() - 1),
            MoveKind::CastleQueenside => (0, self.to.col() + 1),
            _ => return None,
        };
        match (Square::new(row, rook_col), Square::new(row, rook_to_col)) {
            (Some(rook_from), Some(rook_to)) => Some((rook_from, rook_to)),
            _ => None,
        }
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_coordinates(self) -> String {
        match self.kind.promotion_piece() {
            Some(kind) => format!(
                "{}{}{}",
                self.from,
                self.to,
                kind.symbol(Color::Black)
            ),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// A placeholder move, never produced by move generation.
    pub const NULL: Move = Move::new(MoveKind::Quiet, PieceId::new(0), Square::A8, Square::A8);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {:?})", self.to_coordinates(), self.kind)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).unwrap()
    }

    #[test]
    fn quiet_move_accessors() {
        let m = Move::quiet(PieceId::new(3), sq("g1"), sq("f3"));
        assert_eq!(m.kind(), MoveKind::Quiet);
        assert_eq!(m.actor(), PieceId::new(3));
        assert_eq!(m.from(), sq("g1"));
        assert_eq!(m.to(), sq("f3"));
        assert!(!m.is_capture());
        assert_eq!(m.rook_squares(), None);
    }

    #[test]
    fn en_passant_captures_off_the_destination() {
        let m = Move::en_passant(PieceId::new(1), sq("e5"), sq("d6"), PieceId::new(9), sq("d5"));
        let captured = m.captured().unwrap();
        assert_eq!(captured.piece, PieceId::new(9));
        assert_eq!(captured.square, sq("d5"));
        assert_ne!(captured.square, m.to());
    }

    #[test]
    fn capture_records_destination() {
        let m = Move::capture(PieceId::new(1), sq("d1"), sq("d8"), PieceId::new(20));
        assert_eq!(m.kind(), MoveKind::Capture);
        assert_eq!(m.captured().map(|c| c.square), Some(sq("d8")));
    }

    #[test]
    fn castling_rook_squares() {
        let king = PieceId::new(0);
        let short = Move::new(MoveKind::CastleKingside, king, Square::E1, sq("g1"));
        let long = Move::new(MoveKind::CastleQueenside, king, Square::E8, sq("c8"));
        assert_eq!(short.rook_squares(), Some((Square::H1, sq("f1"))));
        assert_eq!(long.rook_squares(), Some((Square::A8, sq("d8"))));
        assert!(short.kind().is_castling());
    }

    #[test]
    fn promotion_kind() {
        let m = Move::promotion(PieceId::new(2), sq("e7"), sq("e8"), PieceKind::Queen, None);
        assert_eq!(m.kind().promotion_piece(), Some(PieceKind::Queen));
        assert!(m.kind().is_promotion());
        assert_eq!(MoveKind::Quiet.promotion_piece(), None);
        assert_eq!(m.to_coordinates(), "e7e8q");
    }

    #[test]
    fn move_debug_display() {
        let m = Move::new(MoveKind::DoubleStep, PieceId::new(0), sq("e2"), sq("e4"));
        assert_eq!(format!("{}", m), "e2e4");
        assert_eq!(format!("{:?}", m), "Move(e2e4, DoubleStep)");
    }
}
