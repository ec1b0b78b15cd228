//! Terminal rendering for the falling-block game.
//!
//! Renders a [`core::GameSnapshot`] into a simple framebuffer which is then
//! flushed to the terminal with diffing. No widget toolkit is involved, so
//! the aspect ratio (2 columns per cell) and colors are fully controlled.
//!
//! Only the snapshot is read; nothing here can change game state.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use color_tetris_core as core;
pub use color_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
