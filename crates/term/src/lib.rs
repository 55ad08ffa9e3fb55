//! Terminal front end for the game.
//!
//! Rendering is split in two: [`GameView`] paints a [`core::GameSnapshot`] into a
//! [`FrameBuffer`] without any I/O, and [`TerminalRenderer`] flushes framebuffers
//! to the terminal, rewriting only what changed.
//!
//! Board cells are drawn two columns wide so pieces look roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use classic_tetris_core as core;
pub use classic_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
