//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Each child is searched on a copy of the game, so moved flags and the
//! en passant window evolve exactly as they would in play.

use crate::board::BoardError;
use crate::Game;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(game: &Game, depth: u32) -> Result<u64, BoardError> {
    if depth == 0 {
        return Ok(1);
    }
    // A mated side has no moves, and the winner does not move again
    if game.is_game_over() {
        return Ok(0);
    }

    let moves = game.legal_moves()?;

    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for m in moves {
        let mut child = game.clone();
        child.commit(m)?;
        nodes += perft(&child, depth - 1)?;
    }
    Ok(nodes)
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(game: &Game, depth: u32) -> Result<Vec<(String, u64)>, BoardError> {
    let moves = game.legal_moves()?;
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        let mut child = game.clone();
        child.commit(m)?;
        let nodes = if depth > 1 {
            perft(&child, depth - 1)?
        } else {
            1
        };
        results.push((m.to_coordinates(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}
