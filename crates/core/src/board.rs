//! Board module - the grid of locked cells
//!
//! The board is a 10x22 grid where each cell holds the [`Tetromino`] variant
//! that was locked into it, or [`Tetromino::NoShape`] when empty.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..21
//! (**bottom to top**, row 0 is the floor).

use crate::types::{Cell, Tetromino, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x), row 0 at the bottom
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Tetromino::NoShape; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y).
    /// Returns None if out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y).
    /// Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Tetromino::NoShape))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if !cell.is_empty())
    }

    /// Cells of row `y`, left to right. None if `y` is off the board.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| !cell.is_empty()))
    }

    /// Remove row `y`: every row above it moves down by one and the top row
    /// becomes empty.
    pub fn collapse_row(&mut self, y: usize) {
        if y >= HEIGHT {
            return;
        }

        let start = y * WIDTH;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(start + WIDTH..BOARD_SIZE, start);
        self.cells[(HEIGHT - 1) * WIDTH..].fill(Tetromino::NoShape);
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows are scanned from the top down. When a full row is collapsed, the row
    /// that drops into its slot came from above and was already scanned, so no row
    /// needs to be examined twice and non-adjacent full rows all clear in one pass.
    pub fn remove_full_lines(&mut self) -> u32 {
        let mut removed = 0;
        for y in (0..HEIGHT).rev() {
            if self.is_row_full(y) {
                removed += 1;
                self.collapse_row(y);
            }
        }
        removed
    }

    /// Write `kind` into every listed absolute cell. Out-of-bounds cells are skipped.
    pub fn lock_cells(&mut self, cells: &[(i8, i8)], kind: Tetromino) {
        for &(x, y) in cells {
            self.set(x, y, kind);
        }
    }

    /// Write the grid as cell codes, `out[y][x]`, row 0 at the bottom.
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, code) in row.iter_mut().enumerate() {
                *code = self.cells[y * WIDTH + x].code();
            }
        }
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Tetromino::NoShape);
    }

    /// Build a board from text rows, top row first. `.` is empty, any other
    /// character is a locked cell of `fill`. Missing rows at the top stay empty.
    pub fn from_rows(rows: &[&str], fill: Tetromino) -> Self {
        let mut board = Self::new();
        for (y, line) in rows.iter().rev().take(HEIGHT).enumerate() {
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                if ch != '.' {
                    board.set(x as i8, y as i8, fill);
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 21), Some(219));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 22), None);
    }

    #[test]
    fn test_collapse_row_shifts_rows_above() {
        let mut board = Board::new();
        board.set(0, 0, Tetromino::T);
        board.set(1, 1, Tetromino::Z);
        board.set(2, 2, Tetromino::S);

        board.collapse_row(1);

        assert_eq!(board.get(0, 0), Some(Tetromino::T));
        assert_eq!(board.get(2, 1), Some(Tetromino::S));
        assert_eq!(board.get(1, 1), Some(Tetromino::NoShape));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_collapse_top_row_clears_it() {
        let mut board = Board::new();
        for x in 0..10 {
            board.set(x, 21, Tetromino::Line);
        }
        board.collapse_row(21);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_from_rows_places_bottom_row_at_zero() {
        let board = Board::from_rows(&["X.........", "XX........"], Tetromino::L);
        assert_eq!(board.get(0, 0), Some(Tetromino::L));
        assert_eq!(board.get(1, 0), Some(Tetromino::L));
        assert_eq!(board.get(0, 1), Some(Tetromino::L));
        assert_eq!(board.get(1, 1), Some(Tetromino::NoShape));
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = Board::new();
        board.set(3, 0, Tetromino::MirroredL);
        let mut grid = [[0u8; WIDTH]; HEIGHT];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[0][3], 7);
        assert_eq!(grid.iter().flatten().filter(|&&c| c != 0).count(), 1);
    }

    #[test]
    fn row_outside_board_is_none() {
        let board = Board::from_rows(&["##########"], Tetromino::T);
        assert_eq!(board.row(0).map(|r| r.len()), Some(WIDTH));
        assert_eq!(board.row(HEIGHT), None);
        assert!(board.is_row_full(0));
        assert!(!board.is_row_full(HEIGHT));
    }
}
