//! Win detection logic for tic-tac-toe.

use crate::types::{Cell, Player, Turn};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// One of the eight lines that wins the game.
///
/// Declaration order is the search order: columns, then rows, then
/// diagonals. When a move completes two lines at once the first one in
/// this order is reported.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WinLine {
    /// Cells 0, 3, 6.
    LeftColumn,
    /// Cells 1, 4, 7.
    CenterColumn,
    /// Cells 2, 5, 8.
    RightColumn,
    /// Cells 0, 1, 2.
    TopRow,
    /// Cells 3, 4, 5.
    MiddleRow,
    /// Cells 6, 7, 8.
    BottomRow,
    /// Cells 0, 4, 8.
    Diagonal,
    /// Cells 2, 4, 6.
    AntiDiagonal,
}

impl WinLine {
    /// The cells making up this line.
    pub fn cells(self) -> [Cell; 3] {
        let [a, b, c] = match self {
            WinLine::LeftColumn => [0, 3, 6],
            WinLine::CenterColumn => [1, 4, 7],
            WinLine::RightColumn => [2, 5, 8],
            WinLine::TopRow => [0, 1, 2],
            WinLine::MiddleRow => [3, 4, 5],
            WinLine::BottomRow => [6, 7, 8],
            WinLine::Diagonal => [0, 4, 8],
            WinLine::AntiDiagonal => [2, 4, 6],
        };
        [Cell(a), Cell(b), Cell(c)]
    }

    /// The cells of this line as a set.
    pub fn cell_set(self) -> CellSet {
        self.cells().into_iter().collect()
    }

    /// Returns true if the line passes through `cell`.
    pub fn contains(self, cell: Cell) -> bool {
        self.cells().contains(&cell)
    }
}

/// A set of board cells, one bit per cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellSet(u16);

impl CellSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self(0)
    }

    /// Adds a cell.
    pub fn insert(&mut self, cell: Cell) {
        self.0 |= 1 << cell.index();
    }

    /// Checks membership.
    pub fn contains(&self, cell: Cell) -> bool {
        (self.0 & (1 << cell.index())) != 0
    }

    /// Returns true if every cell of `other` is also in `self`.
    pub fn is_superset(&self, other: &CellSet) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Number of cells in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if the set holds no cells.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = CellSet::new();
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

/// Cells occupied by `player`.
#[instrument(skip(turns), fields(turns = turns.len()))]
pub fn occupied(turns: &[Turn], player: Player) -> CellSet {
    turns
        .iter()
        .filter(|turn| turn.player == player)
        .map(|turn| turn.cell)
        .collect()
}

/// Finds the first line fully held by `player`.
///
/// A line counts when the player's occupied cells are a superset of the
/// line's cells.
#[instrument(skip(turns), fields(turns = turns.len()))]
pub fn winning_line(turns: &[Turn], player: Player) -> Option<WinLine> {
    let held = occupied(turns, player);
    let line = WinLine::iter().find(|line| held.is_superset(&line.cell_set()));
    debug!(%player, cells = held.len(), won = line.is_some(), "Checked win");
    line
}
