//! Tic-tac-toe game-state machine.
//!
//! The machine holds the mode (start, game, results), the player to move
//! and the ordered turns. It validates intents, detects wins and draws,
//! persists itself to a single key-value slot and announces every change.
//!
//! # Architecture
//!
//! - **Machine**: [`GameMachine`] accepts intents and owns the state
//! - **Rules**: pure win and draw checks over the turn list
//! - **Storage**: [`KeyValueStore`] contract plus an in-memory store
//! - **Events**: [`GameEvent`] notifications on per-subscriber channels
//!
//! # Example
//!
//! ```
//! use tictactoe_model::{GameEvent, GameMachine, MemoryStore, Mode, Player, TurnOutcome};
//!
//! let mut machine = GameMachine::new(MemoryStore::new());
//! let mut events = machine.subscribe();
//! machine.resume();
//!
//! machine.select_player_and_start(Player::X);
//! assert_eq!(machine.submit_turn(4), TurnOutcome::Switched(Player::O));
//! assert_eq!(machine.mode(), Mode::Game);
//!
//! while let Ok(event) = events.try_recv() {
//!     if let GameEvent::TurnTaken(turn) = event {
//!         assert_eq!(turn.cell.index(), 4);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod error;
mod events;
mod machine;
pub mod rules;
mod state;
mod storage;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{StoreError, StoreErrorKind};
pub use events::{EventReceiver, GameEvent};
pub use machine::{FreshReason, GameMachine, IgnoreReason, Resume, TurnOutcome};
pub use rules::{CellSet, WinLine};
pub use state::{GameState, Rejection, validate_state};
pub use storage::{KeyValueStore, MemoryStore, STORAGE_KEY, decode, encode};
pub use types::{CELL_COUNT, Cell, CellOutOfRange, Mode, Outcome, Player, Turn};
