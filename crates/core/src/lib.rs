//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has **no
//! dependencies** on UI, audio, or I/O, making it:
//!
//! - **Deterministic**: the piece sequence comes from an injected, seedable generator
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: the terminal runner is only one possible front end
//!
//! # Module Structure
//!
//! - [`pieces`]: canonical offsets of the seven tetrominoes
//! - [`shape`]: a piece value with non-mutating left/right rotation
//! - [`board`]: 10x22 grid with collision queries and line removal
//! - [`game_state`]: the gravity-and-lock state machine
//! - [`rng`]: seedable random source for piece selection
//! - [`snapshot`]: read-only copy of the state for renderers
//!
//! # Game Rules
//!
//! - Every tick moves the falling piece down one row; a blocked piece locks.
//! - Full rows are removed together after each lock; each one scores a point.
//! - A lock that clears rows leaves the well empty of a falling piece until the next tick.
//! - A new piece that cannot be placed at the top ends the game.
//! - Square pieces do not rotate.
//!
//! # Example
//!
//! ```
//! use classic_tetris_core::{GameState, GameStatus};
//! use classic_tetris_types::{GameAction, GameEvent};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.status(), GameStatus::Running);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.drain_events().any(|e| e == GameEvent::Locked));
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod shape;
pub mod snapshot;

pub use classic_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, GameStatus};
pub use pieces::{canonical_shape, PieceShape};
pub use rng::{seeded, GameRng};
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
