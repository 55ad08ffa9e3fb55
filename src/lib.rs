//! Classic terminal Tetris (workspace facade crate).
//!
//! The game is split into crates under `crates/`; this package re-exports them as
//! `classic_tetris::{core,audio,input,term,types}` and owns the runtime [`config`].

pub mod config;

pub use classic_tetris_audio as audio;
pub use classic_tetris_core as core;
pub use classic_tetris_input as input;
pub use classic_tetris_term as term;
pub use classic_tetris_types as types;
