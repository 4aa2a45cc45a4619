//! The 7-column, 6-row drop board.

use serde::{Deserialize, Serialize};

use crate::{MoveError, SearchBoard, Side};

/// A vertical board where a mark falls to the lowest open row of the
/// chosen column. Four in a line (row, column, or either diagonal) wins.
///
/// Cells are stored row-major with row 0 at the top, so the bottom row is
/// `ROWS - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravityBoard {
    cells: Vec<Option<Side>>,
}

impl GravityBoard {
    pub const COLUMNS: usize = 7;
    pub const ROWS: usize = 6;
    pub const LINE: usize = 4;
    /// Plies searched below the root before a position is scored as 0.
    pub const SEARCH_DEPTH: u32 = 5;

    pub fn new() -> Self {
        Self {
            cells: vec![None; Self::COLUMNS * Self::ROWS],
        }
    }

    pub fn cells(&self) -> &[Option<Side>] {
        &self.cells
    }

    /// The mark at (`row`, `col`), row 0 being the top. `None` for an
    /// empty cell or a coordinate off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Side> {
        if row >= Self::ROWS || col >= Self::COLUMNS {
            return None;
        }
        self.cells.get(row * Self::COLUMNS + col).copied().flatten()
    }

    fn lowest_open_row(&self, col: usize) -> Option<usize> {
        (0..Self::ROWS).rev().find(|&row| self.get(row, col).is_none())
    }

    fn line_from(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<Side> {
        let side = self.get(row, col)?;
        for step in 1..Self::LINE as isize {
            let r = row as isize + dr * step;
            let c = col as isize + dc * step;
            if r < 0 || c < 0 || r >= Self::ROWS as isize || c >= Self::COLUMNS as isize {
                return None;
            }
            if self.get(r as usize, c as usize) != Some(side) {
                return None;
            }
        }
        Some(side)
    }
}

impl Default for GravityBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBoard for GravityBoard {
    fn open_positions(&self) -> Vec<usize> {
        (0..Self::COLUMNS).filter(|&col| self.get(0, col).is_none()).collect()
    }

    fn play(&mut self, position: usize, side: Side) -> Result<usize, MoveError> {
        if position >= Self::COLUMNS {
            return Err(MoveError::OutOfRange);
        }
        let row = self.lowest_open_row(position).ok_or(MoveError::ColumnFull)?;
        let cell = row * Self::COLUMNS + position;
        self.cells[cell] = Some(side);
        Ok(cell)
    }

    fn undo(&mut self, cell: usize) {
        if let Some(slot) = self.cells.get_mut(cell) {
            *slot = None;
        }
    }

    fn winner(&self) -> Option<Side> {
        const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
        for row in 0..Self::ROWS {
            for col in 0..Self::COLUMNS {
                for (dr, dc) in DIRECTIONS {
                    if let Some(side) = self.line_from(row, col, dr, dc) {
                        return Some(side);
                    }
                }
            }
        }
        None
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    fn depth_cap(&self) -> Option<u32> {
        Some(Self::SEARCH_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_all(board: &mut GravityBoard, moves: &[(usize, Side)]) {
        for &(col, side) in moves {
            board.play(col, side).unwrap();
        }
    }

    #[test]
    fn test_play_lands_on_bottom_row() {
        let mut board = GravityBoard::new();
        let cell = board.play(3, Side::First).unwrap();
        assert_eq!(cell, 5 * GravityBoard::COLUMNS + 3);
        assert_eq!(board.get(5, 3), Some(Side::First));
    }

    #[test]
    fn test_get_off_board_returns_none() {
        let mut board = GravityBoard::new();
        board.play(6, Side::First).unwrap();
        assert_eq!(board.get(5, 6), Some(Side::First));
        assert_eq!(board.get(5, 7), None);
        assert_eq!(board.get(6, 0), None);
    }

    #[test]
    fn test_play_stacks_upward() {
        let mut board = GravityBoard::new();
        board.play(0, Side::First).unwrap();
        board.play(0, Side::Second).unwrap();
        assert_eq!(board.get(4, 0), Some(Side::Second));
    }

    #[test]
    fn test_play_full_column_returns_column_full_and_leaves_board() {
        let mut board = GravityBoard::new();
        for i in 0..GravityBoard::ROWS {
            let side = if i % 2 == 0 { Side::First } else { Side::Second };
            board.play(2, side).unwrap();
        }
        let before = board.clone();

        assert_eq!(board.play(2, Side::First), Err(MoveError::ColumnFull));
        assert_eq!(board, before);
        assert!(!board.open_positions().contains(&2));
    }

    #[test]
    fn test_play_out_of_range_column_rejected() {
        let mut board = GravityBoard::new();
        assert_eq!(board.play(7, Side::First), Err(MoveError::OutOfRange));
    }

    #[test]
    fn test_undo_restores_empty_cell() {
        let mut board = GravityBoard::new();
        let cell = board.play(6, Side::Second).unwrap();
        board.undo(cell);
        assert_eq!(board, GravityBoard::new());
    }

    #[test]
    fn test_winner_horizontal() {
        let mut board = GravityBoard::new();
        drop_all(
            &mut board,
            &[(0, Side::First), (1, Side::First), (2, Side::First), (3, Side::First)],
        );
        assert_eq!(board.winner(), Some(Side::First));
    }

    #[test]
    fn test_winner_vertical() {
        let mut board = GravityBoard::new();
        drop_all(&mut board, &[(4, Side::Second); 4]);
        assert_eq!(board.winner(), Some(Side::Second));
    }

    #[test]
    fn test_winner_diagonal_rising() {
        // . . . X
        // . . X O
        // . X O O
        // X O O O
        let mut board = GravityBoard::new();
        drop_all(
            &mut board,
            &[
                (0, Side::First),
                (1, Side::Second),
                (1, Side::First),
                (2, Side::Second),
                (2, Side::Second),
                (2, Side::First),
                (3, Side::Second),
                (3, Side::Second),
                (3, Side::Second),
                (3, Side::First),
            ],
        );
        assert_eq!(board.winner(), Some(Side::First));
    }

    #[test]
    fn test_winner_three_in_a_row_is_none() {
        let mut board = GravityBoard::new();
        drop_all(&mut board, &[(0, Side::First), (1, Side::First), (2, Side::First)]);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_open_positions_ascending() {
        assert_eq!(GravityBoard::new().open_positions(), vec![0, 1, 2, 3, 4, 5, 6]);
    }
}
