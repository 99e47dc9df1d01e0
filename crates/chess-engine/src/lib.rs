//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - an arena of piece records and the 64 cells pointing into it
//! - [`movegen`] - per-piece move generation, apply/revert and check detection
//! - [`Game`] - turns, move validation, checkmate detection and undo
//! - [`perft`] - leaf-node counting to validate move generation
//!
//! # Architecture
//!
//! Pieces live in an arena owned by the board and are addressed by stable
//! [`PieceId`](chess_core::PieceId)s; each square holds the id of its
//! occupant. Legality is decided by applying a candidate move to the board,
//! asking whether the mover's king is attacked, and reverting it. Check
//! detection itself only uses unfiltered (pseudo-legal) generation.
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, GameState};
//! use chess_core::parse_square;
//!
//! let mut game = Game::new();
//! game.submit_move("e2", "e4").unwrap();
//! game.submit_move("e7", "e5").unwrap();
//!
//! let targets = game.legal_moves_for(parse_square("g1").unwrap()).unwrap();
//! println!("The g1 knight can go to {} squares", targets.len());
//! assert_eq!(game.game_state(), GameState::InProgress);
//! ```

mod board;
mod game;
pub mod movegen;
pub mod perft;

pub use board::{Board, BoardError};
pub use game::{Applied, Game, GameState, MoveError, PieceView};
pub use movegen::{
    all_legal_moves, is_king_attacked, legal_moves, make_move, pseudo_legal_moves, unmake_move,
    MoveList,
};
pub use perft::{perft, perft_divide};
