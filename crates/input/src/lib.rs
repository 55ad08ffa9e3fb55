//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. Timing is
//! left to the game loop; this crate holds no state.

pub mod map;

pub use classic_tetris_types as types;

pub use map::{handle_key_event, should_quit};
