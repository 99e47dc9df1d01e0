//! One game played at the terminal: turns typed commands into replies.

use crate::command::Command;
use crate::config::Config;
use crate::render::render;
use chess_core::parse_square;
use chess_engine::{Game, GameState, MoveError};

const HELP: &str = "\
Commands:
  e2e4 or e2 e4   move a piece
  e2              list where the piece on e2 can go
  undo            take back the last move
  quit            leave the game";

/// What the front-end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

pub struct Session {
    game: Game,
    config: Config,
}

impl Session {
    pub fn new(game: Game, config: Config) -> Self {
        Session { game, config }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn board(&self) -> String {
        render(&self.game, self.config.unicode)
    }

    /// Line shown before reading the next command.
    pub fn prompt(&self) -> String {
        match self.game.game_state() {
            GameState::InProgress => format!("{} to move> ", self.game.active_player()),
            GameState::Win(color) => format!("{color} has won> "),
        }
    }

    /// Handles one line of input.
    ///
    /// Player mistakes come back as a printed reply; only a corrupted board
    /// is an error.
    pub fn handle(&mut self, line: &str) -> anyhow::Result<Reply> {
        let reply = match Command::parse(line) {
            Command::Move { from, to } => self.play(&from, &to)?,
            Command::Hints(square) => self.hints(&square)?,
            Command::Undo => self.undo()?,
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
            Command::Unknown(text) if text.is_empty() => String::new(),
            Command::Unknown(text) => format!("Unknown command '{text}'. Type 'help'."),
        };
        Ok(Reply::Print(reply))
    }

    fn play(&mut self, from: &str, to: &str) -> anyhow::Result<String> {
        let applied = match self.game.submit_move(from, to) {
            Ok(applied) => applied,
            Err(MoveError::Corrupted(e)) => return Err(e.into()),
            Err(e) => return Ok(format!("Illegal move: {e}.")),
        };
        let mut out = self.board();
        match applied.state {
            GameState::Win(color) => out.push_str(&format!("Checkmate. {color} wins.")),
            GameState::InProgress if applied.check => {
                out.push_str(&format!("{} is in check.", self.game.active_player()))
            }
            GameState::InProgress => out.truncate(out.trim_end().len()),
        }
        Ok(out)
    }

    fn hints(&self, text: &str) -> anyhow::Result<String> {
        if !self.config.hints {
            return Ok("Hints are disabled.".to_string());
        }
        let square = match parse_square(text) {
            Ok(square) => square,
            Err(e) => return Ok(format!("{e}.")),
        };
        let targets = self.game.legal_moves_for(square)?;
        if targets.is_empty() {
            return Ok(format!("No legal moves from {square}."));
        }
        let mut names: Vec<String> = targets.iter().map(|sq| sq.to_algebraic()).collect();
        names.sort();
        Ok(format!("{square}: {}", names.join(" ")))
    }

    fn undo(&mut self) -> anyhow::Result<String> {
        if !self.config.allow_undo {
            return Ok("Undo is disabled.".to_string());
        }
        match self.game.undo_last() {
            Ok(Some(mv)) => Ok(format!("{}Took back {mv}.", self.board())),
            Ok(None) => Ok("Nothing to undo.".to_string()),
            Err(MoveError::GameOver) => Ok("The game is over and cannot be taken back.".to_string()),
            Err(e) => Err(e.into()),
        }
    }
}
