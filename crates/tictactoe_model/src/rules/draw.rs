//! Draw detection logic for tic-tac-toe.

use crate::types::{CELL_COUNT, Turn};
use tracing::instrument;

/// Checks if every cell has been played.
///
/// This does not look for remaining winning chances. A full board only
/// counts as a draw when no line was completed first.
#[instrument(skip(turns), fields(turns = turns.len()))]
pub fn is_full(turns: &[Turn]) -> bool {
    turns.len() == CELL_COUNT
}
