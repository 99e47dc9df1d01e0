//! Board state: an arena of piece records and the 64 cells that point into it.
//!
//! The board knows nothing about chess rules. It keeps every [`Piece`] ever
//! placed on it in an arena addressed by [`PieceId`], and each cell holds the
//! id of the piece standing there. Captured pieces stay in the arena so a
//! move can put them back on undo.

use chess_core::{Color, Piece, PieceId, PieceKind, Square};
use thiserror::Error;

/// Internal consistency failures.
///
/// These never come from a bad player move: they mean the board was driven
/// into a state the rules can never produce.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("{0} is already occupied")]
    Occupied(Square),

    #[error("unknown piece id {0:?}")]
    UnknownPiece(PieceId),

    #[error("{0} has no king on the board")]
    MissingKing(Color),

    #[error("{0} has more than one king on the board")]
    DuplicateKing(Color),
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 board holding at most one piece per square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Every piece record, indexed by [`PieceId`].
    pieces: Vec<Piece>,
    /// Occupant of each square, indexed by [`Square::index`].
    cells: [Option<PieceId>; 64],
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            pieces: Vec::new(),
            cells: [None; 64],
        }
    }

    /// Creates the standard 32-piece starting layout.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let home = color.home_row();
            let pawn_row = (home as i8 + color.pawn_direction()) as u8;
            for col in 0..8u8 {
                if let Some(sq) = Square::new(home, col) {
                    board.push(BACK_RANK[col as usize], color, sq);
                }
                if let Some(sq) = Square::new(pawn_row, col) {
                    board.push(PieceKind::Pawn, color, sq);
                }
            }
        }
        board
    }

    /// Adds a new, unmoved piece to an empty square.
    pub fn add(
        &mut self,
        kind: PieceKind,
        color: Color,
        square: Square,
    ) -> Result<PieceId, BoardError> {
        if self.cells[square.index()].is_some() {
            return Err(BoardError::Occupied(square));
        }
        Ok(self.push(kind, color, square))
    }

    fn push(&mut self, kind: PieceKind, color: Color, square: Square) -> PieceId {
        let id = PieceId::new(self.pieces.len() as u16);
        self.pieces.push(Piece::new(kind, color, square));
        self.cells[square.index()] = Some(id);
        id
    }

    /// Returns the id of the piece on `square`, if any.
    #[inline]
    pub fn id_at(&self, square: Square) -> Option<PieceId> {
        self.cells[square.index()]
    }

    /// Returns the piece record for `id`, whether on the board or captured.
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    /// Returns the piece standing on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.id_at(square).and_then(|id| self.piece(id)).copied()
    }

    /// Squares holding pieces of `color`, optionally restricted to one kind.
    ///
    /// Squares are listed row by row from a8.
    pub fn pieces_of(&self, color: Color, kind: Option<PieceKind>) -> Vec<Square> {
        self.occupied()
            .filter(|(_, piece)| {
                piece.color == color && kind.map_or(true, |k| piece.kind == k)
            })
            .map(|(sq, _)| sq)
            .collect()
    }

    /// Iterates over occupied squares and the pieces on them.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        Square::all().filter_map(move |sq| {
            self.id_at(sq)
                .and_then(|id| self.piece(id))
                .map(|piece| (sq, piece))
        })
    }

    /// Returns the square of `color`'s king.
    ///
    /// Fails if that color has no king or more than one.
    pub fn king_square(&self, color: Color) -> Result<Square, BoardError> {
        match self.pieces_of(color, Some(PieceKind::King)).as_slice() {
            [king] => Ok(*king),
            [] => Err(BoardError::MissingKing(color)),
            _ => Err(BoardError::DuplicateKing(color)),
        }
    }

    /// Checks that each color has exactly one king.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            self.king_square(color)?;
        }
        Ok(())
    }

    /// Puts a piece from the arena back onto an empty square.
    pub fn place(&mut self, id: PieceId, square: Square) -> Result<(), BoardError> {
        if self.cells[square.index()].is_some() {
            return Err(BoardError::Occupied(square));
        }
        let piece = self
            .pieces
            .get_mut(id.index())
            .ok_or(BoardError::UnknownPiece(id))?;
        piece.square = square;
        self.cells[square.index()] = Some(id);
        Ok(())
    }

    /// Takes the piece off `square`. Its record stays in the arena.
    pub fn remove(&mut self, square: Square) -> Option<PieceId> {
        self.cells[square.index()].take()
    }

    /// Moves the piece on `from` to the empty square `to`.
    pub fn relocate(&mut self, from: Square, to: Square) -> Result<(), BoardError> {
        let id = self.id_at(from).ok_or(BoardError::EmptySquare(from))?;
        if self.cells[to.index()].is_some() {
            return Err(BoardError::Occupied(to));
        }
        self.cells[from.index()] = None;
        self.place(id, to)
    }

    /// Changes the kind of a piece; used for promotion and its undo.
    pub fn set_kind(&mut self, id: PieceId, kind: PieceKind) -> Result<(), BoardError> {
        let piece = self
            .pieces
            .get_mut(id.index())
            .ok_or(BoardError::UnknownPiece(id))?;
        piece.kind = kind;
        Ok(())
    }

    /// Records that a piece has made a committed move.
    pub fn mark_moved(&mut self, id: PieceId) -> Result<(), BoardError> {
        let piece = self
            .pieces
            .get_mut(id.index())
            .ok_or(BoardError::UnknownPiece(id))?;
        piece.moved = true;
        Ok(())
    }

    /// Kind and color on every square, indexed by [`Square::index`].
    ///
    /// Two boards with equal layouts look the same to a player, even if
    /// their arenas or moved flags differ.
    pub fn layout(&self) -> [Option<(PieceKind, Color)>; 64] {
        let mut layout = [None; 64];
        for (sq, piece) in self.occupied() {
            layout[sq.index()] = Some((piece.kind, piece.color));
        }
        layout
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).unwrap()
    }

    #[test]
    fn standard_layout() {
        let board = Board::standard();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(
            board.piece_at(Square::E1).map(|p| (p.kind, p.color)),
            Some((PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(sq("d8")).map(|p| (p.kind, p.color)),
            Some((PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            board.piece_at(sq("a2")).map(|p| (p.kind, p.color)),
            Some((PieceKind::Pawn, Color::White))
        );
        assert_eq!(board.piece_at(sq("e4")), None);
    }

    #[test]
    fn pieces_of_filters_by_color_and_kind() {
        let board = Board::standard();
        assert_eq!(board.pieces_of(Color::White, None).len(), 16);
        assert_eq!(
            board.pieces_of(Color::Black, Some(PieceKind::Pawn)).len(),
            8
        );
        assert_eq!(
            board.pieces_of(Color::White, Some(PieceKind::Rook)),
            vec![Square::A1, Square::H1]
        );
    }

    #[test]
    fn king_square_requires_exactly_one_king() {
        let mut board = Board::empty();
        assert_eq!(
            board.king_square(Color::White),
            Err(BoardError::MissingKing(Color::White))
        );

        board.add(PieceKind::King, Color::White, Square::E1).unwrap();
        assert_eq!(board.king_square(Color::White), Ok(Square::E1));
        assert!(board.validate().is_err());

        board.add(PieceKind::King, Color::White, sq("e2")).unwrap();
        assert_eq!(
            board.king_square(Color::White),
            Err(BoardError::DuplicateKing(Color::White))
        );
    }

    #[test]
    fn relocate_updates_cell_and_record() {
        let mut board = Board::standard();
        let id = board.id_at(sq("g1")).unwrap();
        board.relocate(sq("g1"), sq("f3")).unwrap();

        assert_eq!(board.id_at(sq("g1")), None);
        assert_eq!(board.id_at(sq("f3")), Some(id));
        assert_eq!(board.piece(id).unwrap().square, sq("f3"));
    }

    #[test]
    fn relocate_errors() {
        let mut board = Board::standard();
        assert_eq!(
            board.relocate(sq("e4"), sq("e5")),
            Err(BoardError::EmptySquare(sq("e4")))
        );
        assert_eq!(
            board.relocate(sq("a1"), sq("a2")),
            Err(BoardError::Occupied(sq("a2")))
        );
    }

    #[test]
    fn remove_then_place_restores_piece() {
        let mut board = Board::standard();
        let before = board.layout();

        let id = board.remove(sq("d7")).unwrap();
        assert_eq!(board.piece_at(sq("d7")), None);
        assert_eq!(board.piece(id).unwrap().kind, PieceKind::Pawn);
        assert_eq!(board.remove(sq("d7")), None);

        board.place(id, sq("d7")).unwrap();
        assert_eq!(board.layout(), before);
    }

    #[test]
    fn add_rejects_occupied_square() {
        let mut board = Board::standard();
        assert_eq!(
            board.add(PieceKind::Queen, Color::White, Square::E1),
            Err(BoardError::Occupied(Square::E1))
        );
    }

    #[test]
    fn set_kind_and_mark_moved() {
        let mut board = Board::standard();
        let id = board.id_at(sq("a7")).unwrap();
        board.set_kind(id, PieceKind::Queen).unwrap();
        board.mark_moved(id).unwrap();
        let piece = board.piece_at(sq("a7")).unwrap();
        assert_eq!(piece.kind, PieceKind::Queen);
        assert!(piece.moved);
        assert_eq!(
            board.mark_moved(PieceId::new(99)),
            Err(BoardError::UnknownPiece(PieceId::new(99)))
        );
    }
}
