//! Two-player chess at the terminal.
//!
//! Reads moves like `e2e4` from stdin and prints the board after each one.

mod command;
mod config;
mod render;
mod session;

use clap::Parser;
use config::Config;
use session::{Reply, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Two players, one keyboard.
#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Play chess against another person at the terminal")]
struct Args {
    /// Path to the configuration file
    #[arg(long, default_value = "chess.toml")]
    config: PathBuf,

    /// Draw pieces as Unicode glyphs, overriding the config file
    #[arg(long)]
    unicode: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::load(&args.config)?;
    config.unicode |= args.unicode;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    tracing::debug!(path = ?args.config, ?config, "configuration loaded");

    let mut session = Session::new(chess_engine::Game::new(), config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", session.board());
    print!("{}", session.prompt());
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        match session.handle(&line)? {
            Reply::Quit => break,
            Reply::Print(text) if text.is_empty() => {}
            Reply::Print(text) => println!("{text}"),
        }
        print!("{}", session.prompt());
        stdout.flush()?;
    }
    println!();
    tracing::info!(
        plies = session.game().history().len(),
        state = ?session.game().game_state(),
        "session ended"
    );
    Ok(())
}
