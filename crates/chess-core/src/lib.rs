//! Core types for chess.
//!
//! This crate provides the fundamental types used across the chess engine:
//! - [`PieceKind`] and [`Color`] for piece representation
//! - [`Piece`] records addressed by a stable [`PieceId`]
//! - [`Square`] for board coordinates, with algebraic parsing
//! - [`Move`] for move representation

mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::{Capture, Move, MoveKind};
pub use piece::{Piece, PieceId, PieceKind};
pub use square::{parse_square, Square, SquareError};
