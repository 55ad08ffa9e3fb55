//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data with no external dependencies, so they can be used by
//! the engine, the terminal view, the key map and the audio layer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 22 rows (indexed 0-21, **row 0 is the bottom**)
//!
//! # Timing
//!
//! The game advances on a fixed gravity interval of [`TICK_MS`] milliseconds.
//! Each interval moves the active piece down one row (or locks it).
//!
//! # Examples
//!
//! ```
//! use classic_tetris_types::{Tetromino, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = Tetromino::from_code(3).unwrap();
//! assert_eq!(piece, Tetromino::Line);
//! assert_eq!(piece.code(), 3);
//! assert!(Tetromino::NoShape.is_empty());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (22 rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Default gravity interval in milliseconds (one row per tick)
pub const TICK_MS: u32 = 400;

/// Tetromino variants, including the "no shape" marker used for empty cells
/// and for the gap between a lock and the next spawn.
///
/// The declaration order is significant: it defines [`Tetromino::code`] and
/// the palette index used by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tetromino {
    #[default]
    NoShape,
    Z,
    S,
    Line,
    T,
    Square,
    L,
    MirroredL,
}

impl Tetromino {
    /// The seven playable variants (everything except [`Tetromino::NoShape`]).
    pub const PLAYABLE: [Tetromino; 7] = [
        Tetromino::Z,
        Tetromino::S,
        Tetromino::Line,
        Tetromino::T,
        Tetromino::Square,
        Tetromino::L,
        Tetromino::MirroredL,
    ];

    /// Stable cell code: 0 for no shape, 1..=7 for the playable variants.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Tetromino::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Tetromino::NoShape),
            1 => Some(Tetromino::Z),
            2 => Some(Tetromino::S),
            3 => Some(Tetromino::Line),
            4 => Some(Tetromino::T),
            5 => Some(Tetromino::Square),
            6 => Some(Tetromino::L),
            7 => Some(Tetromino::MirroredL),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Tetromino::NoShape
    }
}

/// A board cell holds the variant that was locked into it ([`Tetromino::NoShape`] = empty).
pub type Cell = Tetromino;

/// Discrete input commands accepted by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Pause,
    Restart,
}

/// Notifications raised by the engine for its collaborators (display, audio).
///
/// Events are fire-and-forget: the engine never waits for them to be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// A new game began (music starts).
    Started,
    Paused,
    Resumed,
    /// The active piece was written into the grid.
    Locked,
    /// `count` full rows (1..=4) were removed; `score` is the new total.
    LinesCleared { count: u32, score: u32 },
    /// The lookahead piece changed.
    NextPiece(Tetromino),
    /// A spawn collided; the game is over with this final score.
    GameOver { score: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_codes_roundtrip_for_every_variant() {
        for code in 0..=7u8 {
            let t = Tetromino::from_code(code).unwrap();
            assert_eq!(t.code(), code);
        }
        assert_eq!(Tetromino::from_code(8), None);
    }

    #[test]
    fn playable_excludes_no_shape() {
        assert!(!Tetromino::PLAYABLE.contains(&Tetromino::NoShape));
        assert_eq!(Tetromino::PLAYABLE.len(), 7);
        assert_eq!(Tetromino::default(), Tetromino::NoShape);
    }
}
