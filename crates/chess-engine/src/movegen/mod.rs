//! Move generation.
//!
//! Moves are generated one piece at a time. [`pseudo_legal_moves`] follows
//! each kind's movement pattern and board occupancy only; [`legal_moves`]
//! additionally applies every candidate to the board, asks whether the
//! mover's king is attacked, and reverts it again.
//!
//! Check detection ([`is_king_attacked`]) runs on the unfiltered generator
//! only, so it never recurses into legality filtering.

use crate::board::{Board, BoardError};
use chess_core::{Capture, Color, Move, MoveKind, Piece, PieceId, PieceKind, Square};

/// A list of moves with a fixed maximum capacity.
///
/// A single piece has at most 27 destinations (a centralised queen), so
/// we use a fixed-size array to avoid heap allocations during move
/// generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves one piece can have.
    pub const MAX_MOVES: usize = 32;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Finds the move landing on `to`, if any.
    pub fn find_to(&self, to: Square) -> Option<Move> {
        self.as_slice().iter().copied().find(|m| m.to() == to)
    }

    /// Destination squares in generation order.
    pub fn destinations(&self) -> Vec<Square> {
        self.as_slice().iter().map(|m| m.to()).collect()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates pseudo-legal moves for the piece on `from`.
///
/// `last` is the most recent committed move, which decides whether an en
/// passant capture is available. An empty square yields no moves.
pub fn pseudo_legal_moves(board: &Board, from: Square, last: Option<&Move>) -> MoveList {
    let mut moves = MoveList::new();
    let Some(id) = board.id_at(from) else {
        return moves;
    };
    let Some(piece) = board.piece(id).copied() else {
        return moves;
    };

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, id, &piece, last, &mut moves),
        PieceKind::King => {
            generate_stepping_moves(board, id, &piece, &mut moves);
            generate_castling_moves(board, id, &piece, &mut moves);
        }
        PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            generate_stepping_moves(board, id, &piece, &mut moves)
        }
    }

    moves
}

/// Generates the moves of the piece on `from` that do not leave its own king
/// in check.
///
/// Each candidate is applied to `board` and reverted before the next one is
/// tried, so the board is unchanged on return.
pub fn legal_moves(
    board: &mut Board,
    from: Square,
    last: Option<&Move>,
) -> Result<MoveList, BoardError> {
    let candidates = pseudo_legal_moves(board, from, last);
    let mut legal = MoveList::new();
    let Some(color) = board.piece_at(from).map(|p| p.color) else {
        return Ok(legal);
    };

    for m in &candidates {
        if leaves_king_safe(board, m, color)? {
            legal.push(*m);
        } else {
            tracing::trace!(mv = %m, "discarding move that leaves the king in check");
        }
    }

    Ok(legal)
}

/// Legal moves for every piece of `color`.
pub fn all_legal_moves(
    board: &mut Board,
    color: Color,
    last: Option<&Move>,
) -> Result<Vec<Move>, BoardError> {
    let mut moves = Vec::new();
    for from in board.pieces_of(color, None) {
        moves.extend_from_slice(legal_moves(board, from, last)?.as_slice());
    }
    Ok(moves)
}

/// Returns true if any piece of `color` has a legal move.
pub fn has_legal_move(
    board: &mut Board,
    color: Color,
    last: Option<&Move>,
) -> Result<bool, BoardError> {
    for from in board.pieces_of(color, None) {
        if !legal_moves(board, from, last)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn leaves_king_safe(board: &mut Board, m: &Move, color: Color) -> Result<bool, BoardError> {
    make_move(board, m)?;
    let attacked = is_king_attacked(board, color);
    unmake_move(board, m)?;
    Ok(!attacked?)
}

/// Walks each direction of the piece's step set up to its max distance.
///
/// Covers sliders as well as knights and kings, whose max distance is one.
fn generate_stepping_moves(board: &Board, id: PieceId, piece: &Piece, moves: &mut MoveList) {
    let from = piece.square;
    for &(dr, dc) in piece.kind.directions() {
        let mut current = from;
        for _ in 0..piece.kind.max_distance() {
            let Some(to) = current.offset(dr, dc) else {
                break;
            };
            match board.id_at(to) {
                None => {
                    moves.push(Move::quiet(id, from, to));
                    current = to;
                }
                Some(other) => {
                    if is_opponent(board, other, piece.color) {
                        moves.push(Move::capture(id, from, to, other));
                    }
                    break;
                }
            }
        }
    }
}

/// Generates pseudo-legal pawn moves.
fn generate_pawn_moves(
    board: &Board,
    id: PieceId,
    pawn: &Piece,
    last: Option<&Move>,
    moves: &mut MoveList,
) {
    let from = pawn.square;
    let dir = pawn.forward();
    let promotes = |to: Square| to.row() == pawn.promotion_row();

    // Forward moves never capture
    let max = if pawn.moved {
        1
    } else {
        PieceKind::Pawn.max_distance()
    };
    let mut current = from;
    for dist in 1..=max {
        let Some(to) = current.offset(dir, 0) else {
            break;
        };
        if board.id_at(to).is_some() {
            break;
        }
        let m = if promotes(to) {
            Move::promotion(id, from, to, PieceKind::Queen, None)
        } else if dist == 2 {
            Move::new(MoveKind::DoubleStep, id, from, to)
        } else {
            Move::quiet(id, from, to)
        };
        moves.push(m);
        current = to;
    }

    // Diagonal captures
    for dc in [1, -1] {
        let Some(to) = from.offset(dir, dc) else {
            continue;
        };
        let Some(victim) = board.id_at(to) else {
            continue;
        };
        if !is_opponent(board, victim, pawn.color) {
            continue;
        }
        if promotes(to) {
            let captured = Capture {
                piece: victim,
                square: to,
            };
            moves.push(Move::promotion(
                id,
                from,
                to,
                PieceKind::Queen,
                Some(captured),
            ));
        } else {
            moves.push(Move::capture(id, from, to, victim));
        }
    }

    // En passant
    if let Some(m) = last.and_then(|last| en_passant_move(board, id, pawn, last)) {
        moves.push(m);
    }
}

/// The en passant capture available to `pawn` right after `last`, if any.
fn en_passant_move(board: &Board, id: PieceId, pawn: &Piece, last: &Move) -> Option<Move> {
    if last.kind() != MoveKind::DoubleStep {
        return None;
    }
    let victim_square = last.to();
    let from = pawn.square;
    if victim_square.row() != from.row() || victim_square.col().abs_diff(from.col()) != 1 {
        return None;
    }
    let victim = board.id_at(victim_square)?;
    if victim != last.actor() || !is_opponent(board, victim, pawn.color) {
        return None;
    }
    let to = victim_square.offset(pawn.forward(), 0)?;
    if board.id_at(to).is_some() {
        return None;
    }
    Some(Move::en_passant(id, from, to, victim, victim_square))
}

/// Generates castling candidates for an unmoved king.
///
/// Only occupancy and moved flags are checked here. Whether the king passes
/// through an attacked square is not examined; the king-in-check filter in
/// [`legal_moves`] only looks at the landing square.
fn generate_castling_moves(board: &Board, id: PieceId, king: &Piece, moves: &mut MoveList) {
    if king.moved {
        return;
    }
    let from = king.square;
    let row = from.row();

    for (rook_col, kind) in [(7u8, MoveKind::CastleKingside), (0u8, MoveKind::CastleQueenside)] {
        // the king needs two free squares to land on
        if rook_col.abs_diff(from.col()) < 3 {
            continue;
        }
        let Some(rook) = Square::new(row, rook_col).and_then(|sq| board.piece_at(sq)) else {
            continue;
        };
        if rook.kind != PieceKind::Rook || rook.color != king.color || rook.moved {
            continue;
        }

        let (low, high) = (from.col().min(rook_col), from.col().max(rook_col));
        let path_clear = (low + 1..high)
            .filter_map(|col| Square::new(row, col))
            .all(|sq| board.id_at(sq).is_none());
        if !path_clear {
            continue;
        }

        let step: i8 = if rook_col > from.col() { 2 } else { -2 };
        if let Some(to) = from.offset(0, step) {
            moves.push(Move::new(kind, id, from, to));
        }
    }
}

fn is_opponent(board: &Board, other: PieceId, color: Color) -> bool {
    board.piece(other).is_some_and(|p| p.color != color)
}

/// Returns true if `king_color`'s king is among the destinations of the
/// opponent's pseudo-legal moves.
pub fn is_king_attacked(board: &Board, king_color: Color) -> Result<bool, BoardError> {
    let king = board.king_square(king_color)?;
    // En passant never lands on an occupied square, so the previous move
    // cannot matter here.
    let attacked = board
        .pieces_of(king_color.opposite(), None)
        .into_iter()
        .any(|from| {
            pseudo_legal_moves(board, from, None)
                .as_slice()
                .iter()
                .any(|m| m.to() == king)
        });
    Ok(attacked)
}

/// Applies `m` to the board.
///
/// Moved flags are left alone; committing a move is the caller's business.
pub fn make_move(board: &mut Board, m: &Move) -> Result<(), BoardError> {
    if let Some(captured) = m.captured() {
        board
            .remove(captured.square)
            .ok_or(BoardError::EmptySquare(captured.square))?;
    }
    board.relocate(m.from(), m.to())?;

    if let Some(kind) = m.kind().promotion_piece() {
        board.set_kind(m.actor(), kind)?;
    }
    if let Some((rook_from, rook_to)) = m.rook_squares() {
        board.relocate(rook_from, rook_to)?;
    }
    Ok(())
}

/// Reverts `m`, which must be the last move applied to the board.
pub fn unmake_move(board: &mut Board, m: &Move) -> Result<(), BoardError> {
    board.relocate(m.to(), m.from())?;

    if m.kind().is_promotion() {
        board.set_kind(m.actor(), PieceKind::Pawn)?;
    }
    if let Some((rook_from, rook_to)) = m.rook_squares() {
        board.relocate(rook_to, rook_from)?;
    }
    if let Some(captured) = m.captured() {
        board.place(captured.piece, captured.square)?;
    }
    Ok(())
}
