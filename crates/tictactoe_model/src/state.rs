//! The game-state aggregate and the resume predicate.

use crate::rules::CellSet;
use crate::types::{CELL_COUNT, Cell, Mode, Outcome, Player, Turn};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Complete game state.
///
/// Serializes to the persisted blob:
/// `{"mode": "game", "currentPlayer": "x", "turns": [{"cell": 4, "player": "x", "time": 0}]}`.
/// An unpicked player is stored as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    mode: Mode,
    #[serde(default, with = "player_slot")]
    current_player: Option<Player>,
    turns: Vec<Turn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    outcome: Option<Outcome>,
}

impl GameState {
    /// Creates the fresh start state: no player, no turns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a state from its parts without checking it.
    ///
    /// Use [`validate_state`] before adopting such a state.
    pub fn from_parts(
        mode: Mode,
        current_player: Option<Player>,
        turns: Vec<Turn>,
        outcome: Option<Outcome>,
    ) -> Self {
        Self {
            mode,
            current_player,
            turns,
            outcome,
        }
    }

    /// Returns the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the player to move, if one has been picked.
    pub fn current_player(&self) -> Option<Player> {
        self.current_player
    }

    /// Returns the turns in the order they were played.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns how the game ended, once it has.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Checks whether `cell` has already been played.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.turns.iter().any(|turn| turn.cell == cell)
    }

    /// Projects the turns onto a 3x3 board in row-major order.
    pub fn board(&self) -> [Option<Player>; CELL_COUNT] {
        let mut board = [None; CELL_COUNT];
        for turn in &self.turns {
            board[turn.cell.index()] = Some(turn.player);
        }
        board
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub(crate) fn set_current_player(&mut self, player: Player) {
        self.current_player = Some(player);
    }

    pub(crate) fn set_outcome(&mut self, outcome: Option<Outcome>) {
        self.outcome = outcome;
    }

    pub(crate) fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }
}

/// Why a saved state was not resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Rejection {
    /// No player had been picked.
    #[display("no current player")]
    NoPlayer,
    /// The game had already ended.
    #[display("game already finished")]
    Finished,
    /// A result was recorded for a game still in progress.
    #[display("outcome recorded outside results")]
    StaleOutcome,
    /// Every cell had been played.
    #[display("board is full")]
    BoardFull,
    /// Two turns claim the same cell.
    #[display("cell {} played twice", _0)]
    DuplicateCell(Cell),
}

impl std::error::Error for Rejection {}

/// Decides whether a loaded state may replace the fresh start state.
///
/// Only in-progress games resume. Finished games, full boards and states
/// without a player start over, as do states carrying a result before the
/// game ended and states whose turns contradict each other.
#[instrument(skip(candidate), fields(mode = %candidate.mode(), turns = candidate.turns().len()))]
pub fn validate_state(candidate: &GameState) -> Result<(), Rejection> {
    if candidate.current_player.is_none() {
        return Err(Rejection::NoPlayer);
    }
    if candidate.mode == Mode::Results {
        return Err(Rejection::Finished);
    }
    if candidate.outcome.is_some() {
        return Err(Rejection::StaleOutcome);
    }
    if candidate.turns.len() >= CELL_COUNT {
        return Err(Rejection::BoardFull);
    }

    let mut seen = CellSet::new();
    for turn in &candidate.turns {
        if seen.contains(turn.cell) {
            return Err(Rejection::DuplicateCell(turn.cell));
        }
        seen.insert(turn.cell);
    }

    debug!("Saved state accepted");
    Ok(())
}

/// Serde adapter storing `Option<Player>` as `"x"`, `"o"` or `""`.
mod player_slot {
    use super::Player;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        player: &Option<Player>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match player {
            Some(player) => player.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Player>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        match raw.as_str() {
            "" => Ok(None),
            "x" => Ok(Some(Player::X)),
            "o" => Ok(Some(Player::O)),
            other => Err(D::Error::custom(format!("unknown player {:?}", other))),
        }
    }
}
