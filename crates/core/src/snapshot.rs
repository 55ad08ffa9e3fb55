//! Read-only copy of everything a display or audio collaborator may look at.

use crate::shape::Shape;
use crate::types::{Tetromino, BOARD_HEIGHT, BOARD_WIDTH};

/// The falling piece, already resolved to absolute board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: Tetromino,
    pub x: i8,
    pub y: i8,
    pub cells: [(i8, i8); 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Cell codes, `board[y][x]`, row 0 at the bottom. 0 is empty.
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<Shape>,
    pub score: u32,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Tetromino {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .and_then(|&code| Tetromino::from_code(code))
            .unwrap_or_default()
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            score: 0,
            started: false,
            paused: false,
            game_over: false,
        }
    }
}
