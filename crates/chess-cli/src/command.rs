//! Parsing of the lines typed at the prompt.

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move from one square to another, coordinates still unchecked.
    Move { from: String, to: String },
    /// List the destinations of the piece on a square.
    Hints(String),
    Undo,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parses `e2e4`, `e2 e4`, `e2`, `undo`, `help` or `quit`.
    ///
    /// Square tokens are passed through untouched so the game can report
    /// bad coordinates itself.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts.as_slice() {
            [] => Command::Unknown(String::new()),
            [word] => match word.to_ascii_lowercase().as_str() {
                "undo" => Command::Undo,
                "help" | "?" => Command::Help,
                "quit" | "exit" => Command::Quit,
                _ => Self::parse_token(word),
            },
            [from, to] => Command::Move {
                from: from.to_string(),
                to: to.to_string(),
            },
            _ => Command::Unknown(input.to_string()),
        }
    }

    fn parse_token(token: &str) -> Self {
        match token.len() {
            2 => Command::Hints(token.to_string()),
            4 => match (token.get(..2), token.get(2..)) {
                (Some(from), Some(to)) => Command::Move {
                    from: from.to_string(),
                    to: to.to_string(),
                },
                _ => Command::Unknown(token.to_string()),
            },
            _ => Command::Unknown(token.to_string()),
        }
    }
}
