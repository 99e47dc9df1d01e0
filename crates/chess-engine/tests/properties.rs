//! Properties that hold for any sequence of legal moves from the start.

use chess_engine::{make_move, unmake_move, Game};
use proptest::prelude::*;
use proptest::sample::Index;

/// Plays one legal move per index until the picks run out or the game ends.
fn random_game(picks: &[Index]) -> Game {
    let mut game = Game::new();
    for pick in picks {
        if game.is_game_over() {
            break;
        }
        let moves = game.legal_moves().unwrap();
        if moves.is_empty() {
            break;
        }
        let mv = moves[pick.index(moves.len())];
        game.submit(mv.from(), mv.to()).unwrap();
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn undoing_everything_restores_the_start(picks in prop::collection::vec(any::<Index>(), 0..40)) {
        let mut game = Game::new();
        let mut layouts = Vec::new();
        for pick in &picks {
            let moves = game.legal_moves().unwrap();
            if moves.is_empty() {
                break;
            }
            let mv = moves[pick.index(moves.len())];
            let before = game.board().layout();

            // A mating move cannot be taken back through the game, so revert it here
            let mut board = game.board().clone();
            make_move(&mut board, &mv).unwrap();
            unmake_move(&mut board, &mv).unwrap();
            prop_assert_eq!(&board, game.board());

            game.submit(mv.from(), mv.to()).unwrap();
            if game.is_game_over() {
                break;
            }
            layouts.push(before);
        }
        // A decisive last move cannot be taken back, so it was never recorded
        prop_assume!(!game.is_game_over());

        while let Some(expected) = layouts.pop() {
            prop_assert!(game.undo_last().unwrap().is_some());
            prop_assert_eq!(game.board().layout(), expected);
        }
        prop_assert_eq!(game.board().layout(), Game::new().board().layout());
        prop_assert_eq!(game.undo_last(), Ok(None));
    }

    #[test]
    fn legal_moves_never_leave_the_mover_in_check(picks in prop::collection::vec(any::<Index>(), 0..30)) {
        let game = random_game(&picks);
        prop_assume!(!game.is_game_over());

        let mover = game.active_player();
        for mv in game.legal_moves().unwrap() {
            let mut next = game.clone();
            next.submit(mv.from(), mv.to()).unwrap();
            prop_assert!(!next.king_in_check(mover).unwrap(), "{:?} leaves {} in check", mv, mover);
        }
    }

    #[test]
    fn make_then_unmake_is_identity(picks in prop::collection::vec(any::<Index>(), 0..30)) {
        let game = random_game(&picks);
        let before = game.board().clone();

        for mv in game.legal_moves().unwrap() {
            let mut board = before.clone();
            make_move(&mut board, &mv).unwrap();
            unmake_move(&mut board, &mv).unwrap();
            prop_assert_eq!(&board, &before);
        }
    }

    #[test]
    fn turns_alternate_while_the_game_runs(picks in prop::collection::vec(any::<Index>(), 0..30)) {
        let game = random_game(&picks);
        let plies = game.history().len();
        let expected = if plies % 2 == 0 { chess_core::Color::White } else { chess_core::Color::Black };
        if game.is_game_over() {
            // The winner keeps the turn
            prop_assert_eq!(game.active_player(), expected.opposite());
        } else {
            prop_assert_eq!(game.active_player(), expected);
        }
    }
}
