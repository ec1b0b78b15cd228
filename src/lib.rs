//! Color Tetris (workspace facade crate).
//!
//! The rule engine, host driver, key mapping and renderer live in dedicated
//! crates under `crates/`; this package re-exports them under one name and
//! ships the terminal binary.

pub use color_tetris_core as core;
pub use color_tetris_driver as driver;
pub use color_tetris_input as input;
pub use color_tetris_term as term;
pub use color_tetris_types as types;
