//! Host-side driving of a game session
//!
//! The rule engine in `color-tetris-core` only says *when* things should
//! happen. This crate supplies the pieces a host needs to make them happen:
//!
//! - [`config`]: settings from `COLOR_TETRIS_*` environment variables
//! - [`ticker`]: a deadline scheduler that follows the session's timer plan,
//!   restarting gravity when the drop interval changes or a new game starts
//! - [`event_log`]: a JSON-lines log of game events written on a tokio task
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use color_tetris_core::GameSession;
//! use color_tetris_driver::{drive, TickDriver};
//!
//! let mut session = GameSession::new(7);
//! let mut driver = TickDriver::new();
//! let t0 = Instant::now();
//!
//! drive(&mut session, &mut driver, t0);
//! let y0 = session.active().unwrap().y;
//!
//! // One gravity period later the piece has fallen a row.
//! drive(&mut session, &mut driver, t0 + Duration::from_millis(1000));
//! assert_eq!(session.active().unwrap().y, y0 + 1);
//! ```

pub mod config;
pub mod event_log;
pub mod ticker;

pub use color_tetris_core as core;
pub use color_tetris_types as types;

pub use config::{ConfigError, DriverConfig};
pub use event_log::{EventLog, EventRecord};
pub use ticker::{drive, TickDriver};
