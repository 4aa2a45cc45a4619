//! The 3×3 grid.

use serde::{Deserialize, Serialize};

use crate::{MoveError, SearchBoard, Side};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Nine cells addressed 0–8, row-major. Three in a line wins. Small
/// enough that the AI searches it to the end without a depth cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBoard {
    cells: [Option<Side>; 9],
}

impl GridBoard {
    pub const SIDE: usize = 3;
    pub const CELLS: usize = 9;

    pub fn new() -> Self {
        Self { cells: [None; 9] }
    }

    pub fn cells(&self) -> &[Option<Side>] {
        &self.cells
    }
}

impl Default for GridBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBoard for GridBoard {
    fn open_positions(&self) -> Vec<usize> {
        (0..Self::CELLS).filter(|&i| self.cells[i].is_none()).collect()
    }

    fn play(&mut self, position: usize, side: Side) -> Result<usize, MoveError> {
        let slot = self.cells.get_mut(position).ok_or(MoveError::OutOfRange)?;
        if slot.is_some() {
            return Err(MoveError::Occupied);
        }
        *slot = Some(side);
        Ok(position)
    }

    fn undo(&mut self, cell: usize) {
        if let Some(slot) = self.cells.get_mut(cell) {
            *slot = None;
        }
    }

    fn winner(&self) -> Option<Side> {
        LINES.iter().find_map(|&[a, b, c]| {
            let side = self.cells[a]?;
            (self.cells[b] == Some(side) && self.cells[c] == Some(side)).then_some(side)
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    fn depth_cap(&self) -> Option<u32> {
        None
    }
}
