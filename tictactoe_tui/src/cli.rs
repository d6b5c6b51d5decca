//! Command-line interface for the tic-tac-toe terminal game.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-Tac-Toe - two players, one terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Two-player tic-tac-toe that remembers unfinished games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// File holding the saved game (overrides config)
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Slot name inside the state file (overrides config)
    #[arg(long)]
    pub key: Option<String>,

    /// Log file for the terminal UI (overrides config)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play,

    /// Print the saved game and whether it would be resumed
    Show,

    /// Delete the saved game
    Reset,
}
