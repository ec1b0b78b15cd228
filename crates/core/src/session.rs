//! Game session module - owns the complete game state
//!
//! Ties together board, pieces, RNG and scoring, and drives the
//! spawn → fall → lock → clear → spawn cycle.
//!
//! # Phases
//!
//! - `Falling`: an active piece exists; commands and gravity apply to it.
//! - `Clearing`: full rows are flashing; there is no active piece and
//!   commands are no-ops until the flash protocol finishes.
//! - `GameOver`: a fresh spawn could not be placed. Only `new_game` does
//!   anything from here.
//!
//! # Timing
//!
//! The session never sleeps. It publishes a [`TimerPlan`] describing which
//! periodic callbacks the host should run (gravity in `Falling`, flash
//! half-cycles in `Clearing`). Scheduled callbacks carry the session epoch and
//! are dropped by [`GameSession::on_timer`] once a new game has started.

use crate::board::{Board, RowSet};
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::scoring::{line_clear_score, next_drop_interval_ms};
use crate::types::{
    BlockColor, Command, Position, Shape, BASE_DROP_MS, FLASH_HALF_CYCLES, FLASH_INTERVAL_MS,
};

/// Engine tuning that hosts may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Visible/hidden half-cycles before full rows are removed.
    /// Zero removes rows synchronously at lock time.
    pub flash_half_cycles: u8,
    pub flash_interval_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            flash_half_cycles: FLASH_HALF_CYCLES,
            flash_interval_ms: FLASH_INTERVAL_MS,
        }
    }
}

impl EngineConfig {
    /// Collapse the flash protocol (headless hosts, simulations).
    pub fn instant() -> Self {
        Self {
            flash_half_cycles: 0,
            ..Self::default()
        }
    }
}

/// Rows pending removal and the flash half-cycles completed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    rows: RowSet,
    step: u8,
}

impl LineClear {
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// Even half-cycles show the rows highlighted, odd ones hide them.
    pub fn visible(&self) -> bool {
        self.step % 2 == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Clearing(LineClear),
    GameOver,
}

/// Which periodic callback fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Gravity,
    Flash,
}

/// A host timer callback, stamped with the epoch it was scheduled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduledEvent {
    pub epoch: u32,
    pub kind: TimerKind,
}

/// Periodic callbacks the host should be running right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerPlan {
    pub epoch: u32,
    pub gravity_ms: Option<u32>,
    pub flash_ms: Option<u32>,
}

/// Observable transitions, queued until the host drains them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    NewGame,
    Spawned {
        shape: Shape,
        color: BlockColor,
    },
    Locked {
        shape: Shape,
        color: BlockColor,
        cells: [Position; 4],
    },
    RowsFlashing {
        rows: RowSet,
    },
    RowsCleared {
        rows: RowSet,
        points: u32,
        score: u32,
    },
    DropIntervalChanged {
        interval_ms: u32,
    },
    GameOver {
        score: u32,
    },
}

/// A queued event with the epoch of the game that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedEvent {
    pub epoch: u32,
    pub event: GameEvent,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: Option<Piece>,
    phase: Phase,
    score: u32,
    drop_interval_ms: u32,
    /// Monotonic game id (increments on every new game).
    epoch: u32,
    rng: SimpleRng,
    config: EngineConfig,
    events: Vec<StampedEvent>,
}

impl GameSession {
    /// Start a game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, EngineConfig::default())
    }

    pub fn with_config(seed: u32, config: EngineConfig) -> Self {
        Self::with_board(seed, config, Board::new())
    }

    /// Start a game on a prepared board.
    ///
    /// The first piece spawns against `board`, so a board that blocks the
    /// spawn area yields a session that is already over.
    pub fn with_board(seed: u32, config: EngineConfig, board: Board) -> Self {
        let mut session = Self {
            board,
            active: None,
            phase: Phase::Falling,
            score: 0,
            drop_interval_ms: BASE_DROP_MS,
            epoch: 1,
            rng: SimpleRng::new(seed),
            config,
            events: Vec::new(),
        };
        session.emit(GameEvent::NewGame);
        session.spawn_piece();
        session
    }

    /// Discard the current game and start a fresh one.
    ///
    /// Supersedes any pending line clear and invalidates every callback
    /// scheduled for the previous epoch. The RNG keeps running so consecutive
    /// games differ.
    pub fn new_game(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.board.clear();
        self.active = None;
        self.phase = Phase::Falling;
        self.score = 0;
        self.drop_interval_ms = BASE_DROP_MS;
        self.emit(GameEvent::NewGame);
        self.spawn_piece();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Absolute cells of the active piece (for rendering)
    pub fn active_cells(&self) -> Option<[Position; 4]> {
        self.active.map(|p| p.cells())
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// RNG state, enough to replay the rest of the piece sequence
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Rows currently drawn highlighted.
    ///
    /// Empty outside the clear phase and during the hidden half-cycles.
    pub fn flashing_rows(&self) -> RowSet {
        match &self.phase {
            Phase::Clearing(clear) if clear.visible() => clear.rows.clone(),
            _ => RowSet::new(),
        }
    }

    /// Take all queued events, oldest first.
    ///
    /// Each carries the epoch it was raised in, so a batch drained after a
    /// new game still attributes the old game's events correctly.
    pub fn take_events(&mut self) -> Vec<StampedEvent> {
        std::mem::take(&mut self.events)
    }

    /// Periodic callbacks the host should be running.
    pub fn timer_plan(&self) -> TimerPlan {
        let (gravity_ms, flash_ms) = match self.phase {
            Phase::Falling => (Some(self.drop_interval_ms), None),
            Phase::Clearing(_) => (None, Some(self.config.flash_interval_ms)),
            Phase::GameOver => (None, None),
        };
        TimerPlan {
            epoch: self.epoch,
            gravity_ms,
            flash_ms,
        }
    }

    /// Replace the active piece if the candidate is placeable.
    ///
    /// Lets hosts and tests set up a specific situation; the same collision
    /// rule as every other command applies.
    pub fn place_active(&mut self, piece: Piece) -> bool {
        if self.phase != Phase::Falling || !self.board.can_place(&piece) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1)
    }

    /// Rotate clockwise around the anchor. No wall kicks: a blocked rotation
    /// is dropped.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        self.try_replace(active.rotated())
    }

    /// Gravity step. Locks the piece when it cannot fall any further.
    pub fn tick(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if !self.try_replace(active.shifted(0, 1)) {
            self.lock_and_advance();
        }
        true
    }

    /// Drop to the lowest reachable row and lock immediately
    pub fn hard_drop(&mut self) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };

        loop {
            let below = piece.shifted(0, 1);
            if !self.board.can_place(&below) {
                break;
            }
            piece = below;
        }

        self.active = Some(piece);
        self.lock_and_advance();
        true
    }

    /// Complete one flash half-cycle. The last one removes the rows, scores
    /// them and spawns the next piece.
    pub fn advance_flash(&mut self) -> bool {
        let Phase::Clearing(clear) = &mut self.phase else {
            return false;
        };

        clear.step = clear.step.saturating_add(1);
        if clear.step >= self.config.flash_half_cycles {
            self.finish_line_clear();
        }
        true
    }

    /// Apply a host timer callback, ignoring ones from an earlier game.
    pub fn on_timer(&mut self, event: ScheduledEvent) -> bool {
        if event.epoch != self.epoch {
            return false;
        }
        match event.kind {
            TimerKind::Gravity => self.tick(),
            TimerKind::Flash => self.advance_flash(),
        }
    }

    /// Apply a command
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop(),
            Command::Tick => self.tick(),
            Command::NewGame => {
                self.new_game();
                true
            }
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(StampedEvent {
            epoch: self.epoch,
            event,
        });
    }

    fn try_move(&mut self, dx: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        self.try_replace(active.shifted(dx, 0))
    }

    fn try_replace(&mut self, candidate: Piece) -> bool {
        if self.board.can_place(&candidate) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    /// Spawn a new random piece, ending the game if it does not fit
    fn spawn_piece(&mut self) -> bool {
        let piece = Piece::random(&mut self.rng);

        if !self.board.can_place(&piece) {
            self.active = None;
            self.phase = Phase::GameOver;
            self.emit(GameEvent::GameOver { score: self.score });
            return false;
        }

        self.active = Some(piece);
        self.phase = Phase::Falling;
        self.emit(GameEvent::Spawned {
            shape: piece.shape,
            color: piece.color,
        });
        true
    }

    /// Lock the active piece, then either start the flash protocol or spawn
    fn lock_and_advance(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.lock(&piece);
        self.emit(GameEvent::Locked {
            shape: piece.shape,
            color: piece.color,
            cells: piece.cells(),
        });

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.spawn_piece();
            return;
        }

        self.emit(GameEvent::RowsFlashing { rows: rows.clone() });
        self.phase = Phase::Clearing(LineClear { rows, step: 0 });

        if self.config.flash_half_cycles == 0 {
            self.finish_line_clear();
        }
    }

    /// Remove → score → retune gravity → spawn, in that order
    fn finish_line_clear(&mut self) {
        let Phase::Clearing(clear) = std::mem::replace(&mut self.phase, Phase::Falling) else {
            return;
        };

        self.board.remove_rows(&clear.rows);

        let points = line_clear_score(&clear.rows);
        self.score = self.score.saturating_add(points);
        self.emit(GameEvent::RowsCleared {
            rows: clear.rows,
            points,
            score: self.score,
        });

        let interval = next_drop_interval_ms(self.score, self.drop_interval_ms);
        if interval != self.drop_interval_ms {
            self.drop_interval_ms = interval;
            self.emit(GameEvent::DropIntervalChanged {
                interval_ms: interval,
            });
        }

        self.spawn_piece();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn bottom_row_gap_at(gap: usize) -> Board {
        let row: String = (0..BOARD_WIDTH as usize)
            .map(|x| if x == gap { '.' } else { '#' })
            .collect();
        Board::from_rows(&[row.as_str()], BlockColor::Green)
    }

    #[test]
    fn test_new_session_spawns_at_anchor() {
        let session = GameSession::new(12345);

        assert!(!session.game_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.epoch(), 1);
        assert_eq!(session.drop_interval_ms(), 1000);
        let active = session.active().unwrap();
        assert_eq!((active.x, active.y), (3, 0));
        assert!(session.flashing_rows().is_empty());
    }

    #[test]
    fn test_new_game_resets_everything() {
        let mut session = GameSession::with_config(5, EngineConfig::instant());
        session.hard_drop();
        session.score = 600;
        session.drop_interval_ms = 500;

        session.new_game();

        assert_eq!(session.epoch(), 2);
        assert_eq!(session.score(), 0);
        assert_eq!(session.drop_interval_ms(), 1000);
        assert_eq!(session.board().filled_count(), 0);
        assert!(session.active().is_some());
    }

    #[test]
    fn test_flash_protocol_defers_removal_and_scoring() {
        let board = bottom_row_gap_at(0);
        let mut session = GameSession::with_board(9, EngineConfig::default(), board);
        // Vertical I in the gap: rotation 3 puts cells at anchor.x + 1.
        let piece = Piece {
            shape: Shape::I,
            color: BlockColor::Rose,
            rotation: crate::types::Rotation::West,
            x: -1,
            y: 17,
        };
        assert!(session.place_active(piece));
        session.take_events();

        assert!(session.hard_drop());
        assert_eq!(session.flashing_rows().as_slice(), &[19]);
        assert!(session.active().is_none());
        assert_eq!(session.score(), 0);
        assert_eq!(session.timer_plan().gravity_ms, None);
        assert_eq!(session.timer_plan().flash_ms, Some(150));

        // Commands are ignored while rows flash.
        assert!(!session.move_left());
        assert!(!session.tick());

        for step in 1..FLASH_HALF_CYCLES {
            assert!(session.advance_flash());
            assert_eq!(session.flashing_rows().is_empty(), step % 2 == 1);
            assert_eq!(session.score(), 0);
            assert!(session.active().is_none());
        }

        assert!(session.advance_flash());
        assert!(session.flashing_rows().is_empty());
        assert_eq!(session.score(), 11);
        assert!(session.active().is_some());
        // Three of the four I cells were in rows 16..=18 and shift down one.
        assert_eq!(session.board().filled_count(), 3);
        assert!(!session.board().is_row_full(BOARD_HEIGHT as usize - 1));
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut session = GameSession::new(77);
        let stale = ScheduledEvent {
            epoch: session.epoch(),
            kind: TimerKind::Gravity,
        };
        session.new_game();
        let before = session.active();

        assert!(!session.on_timer(stale));
        assert_eq!(session.active(), before);
    }

    #[test]
    fn test_events_follow_lock_clear_spawn_order() {
        let board = bottom_row_gap_at(9);
        let mut session = GameSession::with_board(3, EngineConfig::instant(), board);
        let piece = Piece {
            shape: Shape::I,
            color: BlockColor::Cyan,
            rotation: crate::types::Rotation::East,
            x: 7,
            y: 17,
        };
        assert!(session.place_active(piece));
        session.take_events();

        session.hard_drop();
        let events: Vec<GameEvent> = session.take_events().into_iter().map(|e| e.event).collect();

        assert!(matches!(events[0], GameEvent::Locked { .. }));
        assert!(matches!(events[1], GameEvent::RowsFlashing { .. }));
        assert!(matches!(
            events[2],
            GameEvent::RowsCleared {
                points: 11,
                score: 11,
                ..
            }
        ));
        assert!(matches!(events[3], GameEvent::Spawned { .. }));
    }

    #[test]
    fn test_events_keep_their_game_epoch_across_new_game() {
        let mut session = GameSession::new(31);
        session.take_events();

        session.hard_drop();
        session.new_game();
        let events = session.take_events();

        let epochs: Vec<u32> = events.iter().map(|e| e.epoch).collect();
        assert_eq!(epochs, vec![1, 1, 2, 2]);
        assert!(matches!(events[0].event, GameEvent::Locked { .. }));
        assert!(matches!(events[1].event, GameEvent::Spawned { .. }));
        assert_eq!(events[2].event, GameEvent::NewGame);
        assert!(matches!(events[3].event, GameEvent::Spawned { .. }));
    }
}
