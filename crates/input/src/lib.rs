//! Terminal input mapping.
//!
//! Maps `crossterm` key events into engine [`crate::types::Command`]s. The
//! engine only knows four gameplay commands plus "new game"; there is no
//! auto-repeat handling here since the terminal's own key repeat is enough
//! for one-cell moves.

pub mod map;

pub use color_tetris_types as types;

pub use map::{handle_key_event, should_quit};
