//! Game rules for tic-tac-toe.
//!
//! Pure functions over the turn list. The machine decides when to ask;
//! these only answer.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{CellSet, WinLine, occupied, winning_line};
