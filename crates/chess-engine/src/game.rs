//! Turn management, legality checks, checkmate detection and undo.
//!
//! The [`Game`] struct owns the board and the committed move history. It is
//! the only place where moves become permanent: move generation and check
//! detection apply candidates to a board speculatively, but always revert
//! them before [`Game`] commits anything.

use crate::board::{Board, BoardError};
use crate::movegen::{self, MoveList};
use chess_core::{parse_square, Color, Move, PieceKind, Square, SquareError};
use thiserror::Error;

/// Overall status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    InProgress,
    /// The given color checkmated its opponent.
    Win(Color),
}

/// Why a submitted move was rejected.
///
/// Every variant except [`MoveError::Corrupted`] is a player-facing
/// rejection that leaves the game untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,

    #[error(transparent)]
    BadCoordinate(#[from] SquareError),

    #[error("there is no piece on {0}")]
    EmptyOrigin(Square),

    #[error("the piece on {0} does not belong to the player to move")]
    NotYourPiece(Square),

    #[error("the piece on {from} cannot move to {to}")]
    IllegalDestination { from: Square, to: Square },

    /// The board invariants were broken by an earlier bug.
    #[error("board consistency violated: {0}")]
    Corrupted(#[from] BoardError),
}

/// A move that was committed to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub mv: Move,
    /// Whether the opponent's king is now in check.
    pub check: bool,
    /// The game state after the move.
    pub state: GameState,
}

/// What a presentation layer needs to draw a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceView {
    pub kind: PieceKind,
    pub color: Color,
}

impl PieceView {
    /// Display letter, uppercase for White.
    pub const fn symbol(self) -> char {
        self.kind.symbol(self.color)
    }
}

/// A two-player game of chess.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Color,
    state: GameState,
    /// Committed moves, oldest first.
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position, White to move.
    pub fn new() -> Self {
        Game {
            board: Board::standard(),
            active: Color::White,
            state: GameState::InProgress,
            history: Vec::new(),
        }
    }

    /// Creates a game from a custom board.
    ///
    /// Fails unless each color has exactly one king.
    pub fn from_board(board: Board, active: Color) -> Result<Self, BoardError> {
        board.validate()?;
        Ok(Game {
            board,
            active,
            state: GameState::InProgress,
            history: Vec::new(),
        })
    }

    /// Returns a reference to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The color whose turn it is.
    pub fn active_player(&self) -> Color {
        self.active
    }

    pub fn game_state(&self) -> GameState {
        self.state
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.state != GameState::InProgress
    }

    /// Committed moves, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The most recent committed move.
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// Kind and color of the piece on `square`, for rendering.
    pub fn piece_at(&self, square: Square) -> Option<PieceView> {
        self.board.piece_at(square).map(|piece| PieceView {
            kind: piece.kind,
            color: piece.color,
        })
    }

    /// Legal destinations for the piece on `square`, whichever side owns it.
    ///
    /// An empty square has no destinations.
    pub fn legal_moves_for(&self, square: Square) -> Result<Vec<Square>, BoardError> {
        let mut scratch = self.board.clone();
        let moves = movegen::legal_moves(&mut scratch, square, self.last_move())?;
        Ok(moves.destinations())
    }

    /// All legal moves for the player to move.
    pub fn legal_moves(&self) -> Result<Vec<Move>, BoardError> {
        let mut scratch = self.board.clone();
        movegen::all_legal_moves(&mut scratch, self.active, self.last_move())
    }

    /// Returns true if `color`'s king is attacked.
    pub fn king_in_check(&self, color: Color) -> Result<bool, BoardError> {
        movegen::is_king_attacked(&self.board, color)
    }

    /// Returns true if the player to move is in check.
    pub fn is_check(&self) -> Result<bool, BoardError> {
        self.king_in_check(self.active)
    }

    /// Returns true if `color` is in check and has no legal move.
    ///
    /// A side with no legal move that is not in check is not mated; this
    /// engine does not treat stalemate as the end of the game.
    pub fn is_mated(&self, color: Color) -> Result<bool, BoardError> {
        let mut scratch = self.board.clone();
        is_mated_on(&mut scratch, color, self.last_move())
    }

    /// Submits a move given as two algebraic coordinates, e.g. `("e2", "e4")`.
    pub fn submit_move(&mut self, from: &str, to: &str) -> Result<Applied, MoveError> {
        if self.is_game_over() {
            return reject(MoveError::GameOver);
        }
        let (from, to) = match (parse_square(from), parse_square(to)) {
            (Ok(from), Ok(to)) => (from, to),
            (Err(e), _) | (_, Err(e)) => return reject(e.into()),
        };
        self.submit(from, to)
    }

    /// Submits a move between two squares.
    ///
    /// On rejection nothing about the game changes.
    pub fn submit(&mut self, from: Square, to: Square) -> Result<Applied, MoveError> {
        if self.is_game_over() {
            return reject(MoveError::GameOver);
        }
        let Some(piece) = self.board.piece_at(from) else {
            return reject(MoveError::EmptyOrigin(from));
        };
        if piece.color != self.active {
            return reject(MoveError::NotYourPiece(from));
        }

        let last = self.history.last();
        let legal: MoveList = movegen::legal_moves(&mut self.board, from, last)?;
        let Some(mv) = legal.find_to(to) else {
            return reject(MoveError::IllegalDestination { from, to });
        };

        Ok(self.commit(mv)?)
    }

    /// Applies a legal move, records it and updates turn and state.
    pub(crate) fn commit(&mut self, mv: Move) -> Result<Applied, BoardError> {
        movegen::make_move(&mut self.board, &mv)?;
        self.board.mark_moved(mv.actor())?;
        if mv.kind().is_castling() {
            if let Some(rook) = mv.rook_squares().and_then(|(_, to)| self.board.id_at(to)) {
                self.board.mark_moved(rook)?;
            }
        }
        self.history.push(mv);
        tracing::debug!(
            player = %self.active,
            mv = %mv,
            capture = mv.is_capture(),
            "move committed"
        );

        let opponent = self.active.opposite();
        let check = movegen::is_king_attacked(&self.board, opponent)?;
        if check && !movegen::has_legal_move(&mut self.board, opponent, self.history.last())? {
            self.state = GameState::Win(self.active);
            tracing::info!(winner = %self.active, plies = self.history.len(), "checkmate");
        } else {
            self.active = opponent;
        }

        Ok(Applied {
            mv,
            check,
            state: self.state,
        })
    }

    /// Takes back the most recent committed move.
    ///
    /// Returns `Ok(None)` when there is nothing to undo. A finished game
    /// cannot be taken back. Moved flags set by the undone move stay set, so
    /// a king or rook that moved and was taken back has still lost its
    /// castling right, and a pawn loses its double step.
    pub fn undo_last(&mut self) -> Result<Option<Move>, MoveError> {
        if self.is_game_over() {
            return reject(MoveError::GameOver);
        }
        let Some(mv) = self.history.pop() else {
            return Ok(None);
        };
        movegen::unmake_move(&mut self.board, &mv)?;
        self.active = self.active.opposite();
        tracing::debug!(mv = %mv, "move taken back");
        Ok(Some(mv))
    }
}

fn is_mated_on(board: &mut Board, color: Color, last: Option<&Move>) -> Result<bool, BoardError> {
    if !movegen::is_king_attacked(board, color)? {
        return Ok(false);
    }
    Ok(!movegen::has_legal_move(board, color, last)?)
}

fn reject<T>(error: MoveError) -> Result<T, MoveError> {
    tracing::debug!(%error, "move rejected");
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::MoveKind;

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).unwrap()
    }

    fn play(game: &mut Game, moves: &[(&str, &str)]) {
        for (from, to) in moves {
            game.submit_move(from, to)
                .unwrap_or_else(|e| panic!("{from}{to} rejected: {e}"));
        }
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.active_player(), Color::White);
        assert_eq!(game.game_state(), GameState::InProgress);
        assert!(game.history().is_empty());
        assert_eq!(game.is_check(), Ok(false));
        assert_eq!(game.legal_moves().unwrap().len(), 20);
    }

    #[test]
    fn submit_flips_turn_and_records_history() {
        let mut game = Game::new();
        let applied = game.submit_move("e2", "e4").unwrap();
        assert_eq!(applied.mv.kind(), MoveKind::DoubleStep);
        assert_eq!(applied.state, GameState::InProgress);
        assert!(!applied.check);
        assert_eq!(game.active_player(), Color::Black);
        assert_eq!(game.history().len(), 1);
        assert_eq!(
            game.piece_at(sq("e4")),
            Some(PieceView {
                kind: PieceKind::Pawn,
                color: Color::White
            })
        );
        assert!(game.board().piece_at(sq("e4")).unwrap().moved);
    }

    #[test]
    fn rejections_leave_game_untouched() {
        let mut game = Game::new();
        let before = game.board().clone();

        assert!(matches!(
            game.submit_move("z2", "e4"),
            Err(MoveError::BadCoordinate(_))
        ));
        assert!(matches!(
            game.submit_move("e2", "e9"),
            Err(MoveError::BadCoordinate(_))
        ));
        assert_eq!(
            game.submit_move("e4", "e5"),
            Err(MoveError::EmptyOrigin(sq("e4")))
        );
        assert_eq!(
            game.submit_move("e7", "e5"),
            Err(MoveError::NotYourPiece(sq("e7")))
        );
        assert_eq!(
            game.submit_move("e2", "e5"),
            Err(MoveError::IllegalDestination {
                from: sq("e2"),
                to: sq("e5")
            })
        );

        assert_eq!(game.board(), &before);
        assert_eq!(game.active_player(), Color::White);
        assert!(game.history().is_empty());
    }

    #[test]
    fn coordinates_are_case_insensitive() {
        let mut game = Game::new();
        game.submit_move("G1", "F3").unwrap();
        assert_eq!(game.piece_at(sq("f3")).map(|p| p.kind), Some(PieceKind::Knight));
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")]);
        let applied = game.submit_move("d8", "h4").unwrap();

        assert!(applied.check);
        assert_eq!(applied.state, GameState::Win(Color::Black));
        assert_eq!(game.game_state(), GameState::Win(Color::Black));
        // The turn does not pass to the mated side
        assert_eq!(game.active_player(), Color::Black);
        assert_eq!(game.is_mated(Color::White), Ok(true));
        assert_eq!(game.submit_move("a2", "a3"), Err(MoveError::GameOver));
        assert_eq!(game.undo_last(), Err(MoveError::GameOver));
    }

    #[test]
    fn check_is_reported_without_mate() {
        let mut game = Game::new();
        play(&mut game, &[("e2", "e4"), ("f7", "f6")]);
        let applied = game.submit_move("d1", "h5").unwrap();
        assert!(applied.check);
        assert_eq!(applied.state, GameState::InProgress);
        assert_eq!(game.is_check(), Ok(true));
        assert_eq!(game.is_mated(Color::Black), Ok(false));
        // Only g6 answers the check
        let answers = game.legal_moves().unwrap();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].to(), sq("g6"));
    }

    #[test]
    fn legal_moves_for_is_read_only() {
        let game = Game::new();
        let mut targets = game.legal_moves_for(sq("b1")).unwrap();
        targets.sort();
        assert_eq!(targets, vec![sq("a3"), sq("c3")]);
        assert!(game.legal_moves_for(sq("e4")).unwrap().is_empty());
        assert_eq!(game.board(), &Board::standard());
    }

    #[test]
    fn undo_restores_position_and_turn() {
        let mut game = Game::new();
        play(&mut game, &[("e2", "e4"), ("d7", "d5"), ("e4", "d5")]);
        let layout = game.board().layout();

        let undone = game.undo_last().unwrap().unwrap();
        assert_eq!(undone.kind(), MoveKind::Capture);
        assert_eq!(game.active_player(), Color::White);
        assert_eq!(game.piece_at(sq("d5")).map(|p| p.color), Some(Color::Black));
        assert_eq!(game.piece_at(sq("e4")).map(|p| p.color), Some(Color::White));

        game.submit_move("e4", "d5").unwrap();
        assert_eq!(game.board().layout(), layout);
    }

    #[test]
    fn undo_on_fresh_game_is_a_no_op() {
        let mut game = Game::new();
        assert_eq!(game.undo_last(), Ok(None));
    }

    #[test]
    fn undo_keeps_moved_flags() {
        let mut game = Game::new();
        game.submit_move("e2", "e3").unwrap();
        game.undo_last().unwrap();

        assert!(game.board().piece_at(sq("e2")).unwrap().moved);
        assert_eq!(game.legal_moves_for(sq("e2")).unwrap(), vec![sq("e3")]);
    }

    #[test]
    fn from_board_requires_both_kings() {
        let mut board = Board::empty();
        board.add(PieceKind::King, Color::White, Square::E1).unwrap();
        assert_eq!(
            Game::from_board(board, Color::White).unwrap_err(),
            BoardError::MissingKing(Color::Black)
        );
    }

    #[test]
    fn stalemate_does_not_end_the_game() {
        let mut board = Board::empty();
        board.add(PieceKind::King, Color::Black, Square::H8).unwrap();
        board.add(PieceKind::King, Color::White, sq("g6")).unwrap();
        board.add(PieceKind::Queen, Color::White, sq("e7")).unwrap();
        let mut game = Game::from_board(board, Color::White).unwrap();

        let applied = game.submit_move("e7", "f7").unwrap();
        assert!(!applied.check);
        assert_eq!(applied.state, GameState::InProgress);
        assert_eq!(game.active_player(), Color::Black);
        assert!(game.legal_moves().unwrap().is_empty());
        assert_eq!(game.is_mated(Color::Black), Ok(false));
    }
}
