//! The board contract shared by both grid shapes.

use serde::{Deserialize, Serialize};

use crate::{GravityBoard, GridBoard, MoveError, Side};

/// A two-player board the AI can search.
///
/// Search works in place: [`play`](Self::play) mutates the board and
/// returns the cell it filled, and [`undo`](Self::undo) empties that cell
/// again. A search of any depth therefore needs one board, not one copy
/// per branch.
pub trait SearchBoard {
    /// Every position that currently accepts a mark, in ascending order.
    /// The order is part of the contract: it fixes the AI's tie-breaking.
    fn open_positions(&self) -> Vec<usize>;

    /// Places `side`'s mark at `position` and returns the filled cell.
    ///
    /// # Errors
    /// [`MoveError::OutOfRange`] for an unknown position, or
    /// [`MoveError::Occupied`] / [`MoveError::ColumnFull`] if the position
    /// cannot take another mark. The board is unchanged on error.
    fn play(&mut self, position: usize, side: Side) -> Result<usize, MoveError>;

    /// Empties a cell previously returned by [`play`](Self::play).
    fn undo(&mut self, cell: usize);

    /// The side holding a winning line, if any.
    fn winner(&self) -> Option<Side>;

    /// Whether no position accepts another mark.
    fn is_full(&self) -> bool;

    /// Maximum search depth, or `None` to search to the end of the game.
    fn depth_cap(&self) -> Option<u32>;
}

/// Either board shape. Sessions store this so that move handling can stay
/// ignorant of which game is being played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Board {
    Gravity(GravityBoard),
    Grid(GridBoard),
}

impl Board {
    /// Cells in row-major order, top row first.
    pub fn cells(&self) -> &[Option<Side>] {
        match self {
            Self::Gravity(b) => b.cells(),
            Self::Grid(b) => b.cells(),
        }
    }

    /// Number of columns in a rendered row.
    pub fn columns(&self) -> usize {
        match self {
            Self::Gravity(_) => GravityBoard::COLUMNS,
            Self::Grid(_) => GridBoard::SIDE,
        }
    }

    /// Number of positions a move may name.
    pub fn position_count(&self) -> usize {
        match self {
            Self::Gravity(_) => GravityBoard::COLUMNS,
            Self::Grid(_) => GridBoard::CELLS,
        }
    }

    /// Number of filled cells.
    pub fn filled(&self) -> usize {
        self.cells().iter().filter(|c| c.is_some()).count()
    }
}

impl SearchBoard for Board {
    fn open_positions(&self) -> Vec<usize> {
        match self {
            Self::Gravity(b) => b.open_positions(),
            Self::Grid(b) => b.open_positions(),
        }
    }

    fn play(&mut self, position: usize, side: Side) -> Result<usize, MoveError> {
        match self {
            Self::Gravity(b) => b.play(position, side),
            Self::Grid(b) => b.play(position, side),
        }
    }

    fn undo(&mut self, cell: usize) {
        match self {
            Self::Gravity(b) => b.undo(cell),
            Self::Grid(b) => b.undo(cell),
        }
    }

    fn winner(&self) -> Option<Side> {
        match self {
            Self::Gravity(b) => b.winner(),
            Self::Grid(b) => b.winner(),
        }
    }

    fn is_full(&self) -> bool {
        match self {
            Self::Gravity(b) => b.is_full(),
            Self::Grid(b) => b.is_full(),
        }
    }

    fn depth_cap(&self) -> Option<u32> {
        match self {
            Self::Gravity(b) => b.depth_cap(),
            Self::Grid(b) => b.depth_cap(),
        }
    }
}
