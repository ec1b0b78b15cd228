//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state transitions. It has no
//! dependencies on rendering, audio, timers or I/O:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Synchronous**: every command finishes before it returns
//! - **Observable**: hosts read [`GameSnapshot`]s and drain [`GameEvent`]s
//!
//! # Module Structure
//!
//! - [`geometry`]: static cell-offset table for 7 shapes x 4 rotations
//! - [`piece`]: the falling piece and its candidates
//! - [`board`]: 10x20 grid with collision, locking and row removal
//! - [`rng`]: seeded uniform choice of shape and color
//! - [`scoring`]: per-row points and the drop-interval curve
//! - [`session`]: the game state machine and command API
//! - [`snapshot`]: copyable observable state
//!
//! # Rules
//!
//! - Pieces spawn at (3, 0) in rotation 0 with a random shape and color.
//! - Moves and rotations that would collide are silently rejected; there are
//!   no wall kicks.
//! - A piece that cannot fall locks. Full rows flash for six half-cycles and
//!   are then removed, each worth `10 + (20 - row)` points.
//! - Gravity starts at 1000ms and steps down to 700/500/300ms at
//!   100/500/1000 points.
//! - The game ends when a new piece cannot be placed.
//!
//! # Example
//!
//! ```
//! use color_tetris_core::{EngineConfig, GameSession};
//! use color_tetris_types::Command;
//!
//! let mut game = GameSession::with_config(12345, EngineConfig::instant());
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//!
//! // The dropped piece is locked and a new one is falling.
//! assert_eq!(game.board().filled_count(), 4);
//! assert!(game.active().is_some());
//! ```

pub mod board;
pub mod geometry;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use color_tetris_types as types;

pub use board::{Board, RowSet};
pub use geometry::{offsets, shape_cells};
pub use piece::Piece;
pub use rng::SimpleRng;
pub use scoring::{drop_interval_for_score, line_clear_score, row_clear_points};
pub use session::{
    EngineConfig, GameEvent, GameSession, LineClear, Phase, ScheduledEvent, StampedEvent, TimerKind,
    TimerPlan,
};
pub use snapshot::{ActiveSnapshot, GameSnapshot, PhaseKind};
