//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::rules::WinLine;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Player {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// Coarse phase of the game. Decides which intents are accepted.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Waiting for a player to be picked.
    #[default]
    Start,
    /// Turns are being played.
    Game,
    /// The game ended in a win or a draw.
    Results,
}

/// Cell index was outside the 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Cell index {} is outside the board (0-8)", _0)]
pub struct CellOutOfRange(pub usize);

impl std::error::Error for CellOutOfRange {}

/// A board position, row-major from the top-left corner (0-8).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
#[display("{}", _0)]
pub struct Cell(pub(crate) u8);

impl Cell {
    /// The middle of the board.
    pub const CENTER: Cell = Cell(4);

    /// Creates a cell from a board index, or `None` when out of range.
    pub fn new(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Returns the board index (0-8).
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Row on the board (0-2).
    pub fn row(self) -> usize {
        self.index() / 3
    }

    /// Column on the board (0-2).
    pub fn column(self) -> usize {
        self.index() % 3
    }

    /// Iterates all nine cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT as u8).map(Cell)
    }
}

impl TryFrom<u8> for Cell {
    type Error = CellOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Cell::new(usize::from(value)).ok_or(CellOutOfRange(usize::from(value)))
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.0
    }
}

/// One recorded move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turn {
    /// Where the mark was placed.
    pub cell: Cell,
    /// Who placed it.
    pub player: Player,
    /// Milliseconds since the Unix epoch. Informational only.
    pub time: i64,
}

impl Turn {
    /// Creates a new turn.
    #[instrument]
    pub fn new(cell: Cell, player: Player, time: i64) -> Self {
        Self { cell, player, time }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.cell)
    }
}

/// How a finished game ended, decided when the last turn was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Outcome {
    /// A player completed a line.
    Winner {
        /// The winning player.
        player: Player,
        /// The line they completed.
        line: WinLine,
    },
    /// The board filled with no line completed.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner { player, .. } => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner { player, .. } => write!(f, "Player {} won!", player),
            Outcome::Draw => write!(f, "Tie!"),
        }
    }
}
