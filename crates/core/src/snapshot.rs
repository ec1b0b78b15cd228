//! Snapshot module - the observable state a presentation layer reads
//!
//! `GameSnapshot` is plain `Copy` data. Hosts keep one and refresh it with
//! [`GameSession::snapshot_into`] every frame without allocating.

use crate::piece::Piece;
use crate::session::{GameSession, Phase};
use crate::types::{BlockColor, Cell, Position, Rotation, Shape, BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub color: BlockColor,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub cells: [Position; 4],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            shape: value.shape,
            color: value.color,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhaseKind {
    #[default]
    Falling,
    Clearing,
    GameOver,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Falling => "falling",
            PhaseKind::Clearing => "clearing",
            PhaseKind::GameOver => "game_over",
        }
    }
}

impl From<&Phase> for PhaseKind {
    fn from(value: &Phase) -> Self {
        match value {
            Phase::Falling => PhaseKind::Falling,
            Phase::Clearing(_) => PhaseKind::Clearing,
            Phase::GameOver => PhaseKind::GameOver,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// `flashing[y]` is true while row `y` is drawn highlighted
    pub flashing: [bool; BOARD_HEIGHT as usize],
    pub phase: PhaseKind,
    pub score: u32,
    pub game_over: bool,
    pub drop_interval_ms: u32,
    pub epoch: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.flashing = [false; BOARD_HEIGHT as usize];
        self.phase = PhaseKind::Falling;
        self.score = 0;
        self.game_over = false;
        self.drop_interval_ms = BASE_DROP_MS;
        self.epoch = 0;
    }

    pub fn playable(&self) -> bool {
        self.phase == PhaseKind::Falling
    }

    /// Whether `(x, y)` is covered by the active piece
    pub fn is_active_cell(&self, x: i8, y: i8) -> bool {
        self.active
            .map(|a| a.cells.contains(&Position::new(x, y)))
            .unwrap_or(false)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            flashing: [false; BOARD_HEIGHT as usize],
            phase: PhaseKind::Falling,
            score: 0,
            game_over: false,
            drop_interval_ms: BASE_DROP_MS,
            epoch: 0,
        }
    }
}

impl GameSession {
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board().rows()) {
            dst.copy_from_slice(src);
        }

        out.flashing = [false; BOARD_HEIGHT as usize];
        for y in self.flashing_rows() {
            out.flashing[y] = true;
        }

        out.active = self.active().map(ActiveSnapshot::from);
        out.phase = PhaseKind::from(self.phase());
        out.score = self.score();
        out.game_over = self.game_over();
        out.drop_interval_ms = self.drop_interval_ms();
        out.epoch = self.epoch();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
