//! Terminal front end for the tic-tac-toe game-state machine.
//!
//! The [`App`] owns a [`tictactoe_model::GameMachine`] and redraws only from
//! its notifications. Saved games live in a [`JsonFileStore`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod config;
mod file_store;
mod input;
mod logging;
mod text;
mod ui;

pub use app::{App, View};
pub use cli::{Cli, Command};
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, TuiConfig};
pub use file_store::JsonFileStore;
pub use input::{Intent, intent_for, move_cursor};
pub use logging::{init_file_logging, init_stderr_logging};
pub use text::{describe, describe_slot, render_board, status_line};
pub use ui::draw;
