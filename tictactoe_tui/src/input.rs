//! Keyboard handling: keys to intents, arrow keys to cursor moves.

use crossterm::event::KeyCode;
use tictactoe_model::{Cell, Player};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Pick a player and start.
    Select(Player),
    /// Play the given board index.
    Play(usize),
    /// Move the cursor to a cell.
    Cursor(Cell),
    /// Start over.
    Restart,
    /// Leave the program.
    Quit,
}

/// Maps a key press to an intent, given where the cursor is.
pub fn intent_for(key: KeyCode, cursor: Cell) -> Option<Intent> {
    match key {
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Intent::Select(Player::X)),
        KeyCode::Char('o') | KeyCode::Char('O') => Some(Intent::Select(Player::O)),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|digit| Intent::Play(digit as usize - 1)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::Play(cursor.index())),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Intent::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Intent::Cursor(move_cursor(cursor, key)))
        }
        _ => None,
    }
}

/// Moves cursor based on arrow keys. Stops at the board edges.
pub fn move_cursor(cursor: Cell, key: KeyCode) -> Cell {
    let (row, column) = (cursor.row(), cursor.column());
    let (row, column) = match key {
        KeyCode::Up => (row.saturating_sub(1), column),
        KeyCode::Down => ((row + 1).min(2), column),
        KeyCode::Left => (row, column.saturating_sub(1)),
        KeyCode::Right => (row, (column + 1).min(2)),
        _ => (row, column),
    };
    Cell::new(row * 3 + column).unwrap_or(cursor)
}
