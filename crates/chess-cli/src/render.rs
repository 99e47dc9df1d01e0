//! Text rendering of the board.

use chess_core::{Color, PieceKind, Square};
use chess_engine::{Game, PieceView};

const FILES: &str = "  a b c d e f g h";

/// Draws the board from White's side, rank 8 at the top.
pub fn render(game: &Game, unicode: bool) -> String {
    let mut out = String::new();
    for row in 0..8u8 {
        out.push(char::from(b'8' - row));
        for col in 0..8u8 {
            out.push(' ');
            let piece = Square::new(row, col).and_then(|sq| game.piece_at(sq));
            out.push(match piece {
                Some(view) if unicode => glyph(view),
                Some(view) => view.symbol(),
                None => '.',
            });
        }
        out.push('\n');
    }
    out.push_str(FILES);
    out.push('\n');
    out
}

fn glyph(view: PieceView) -> char {
    match (view.color, view.kind) {
        (Color::White, PieceKind::King) => '♔',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::Black, PieceKind::King) => '♚',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Pawn) => '♟',
    }
}
