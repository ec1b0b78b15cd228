//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be
//! used by the rule engine, the tick driver, the event log and the terminal
//! front end alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn anchor**: (3, 0), rotation 0
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Gravity interval at the start of a game |
//! | `DROP_INTERVAL_STEPS` | 100/500/1000 pts | Score thresholds for 700/500/300ms |
//! | `FLASH_INTERVAL_MS` | 150 | Length of one flash half-cycle |
//! | `FLASH_HALF_CYCLES` | 6 | Half-cycles before full rows are removed |
//!
//! # Examples
//!
//! ```
//! use color_tetris_types::{BlockColor, Command, Rotation, Shape, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(Shape::from_str("t"), Some(Shape::T));
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//! assert_eq!(BlockColor::from_str("Sky"), Some(BlockColor::Sky));
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Anchor column for freshly spawned pieces
pub const SPAWN_X: i8 = 3;

/// Anchor row for freshly spawned pieces
pub const SPAWN_Y: i8 = 0;

/// Gravity interval at the start of every game (1000ms = 1 row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Score thresholds and the drop interval that applies once each is reached.
///
/// Ordered by threshold; the last matching entry wins.
pub const DROP_INTERVAL_STEPS: [(u32, u32); 3] = [(100, 700), (500, 500), (1000, 300)];

/// Length of one flash half-cycle for rows pending removal
pub const FLASH_INTERVAL_MS: u32 = 150;

/// Number of visible/hidden half-cycles before full rows are removed (3 blinks)
pub const FLASH_HALF_CYCLES: u8 = 6;

/// Points awarded per cleared row before the height bonus
pub const ROW_CLEAR_BASE_POINTS: u32 = 10;

/// Board coordinate (column, row).
///
/// Rows grow downwards. A row may be negative transiently, e.g. when a
/// rotation candidate pokes above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The seven tetromino shapes.
///
/// Shapes carry no color: a piece's color is chosen independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Shape {
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::O,
        Shape::T,
        Shape::S,
        Shape::Z,
        Shape::J,
        Shape::L,
    ];

    /// Position in [`Shape::ALL`], used to index static tables.
    pub const fn index(self) -> usize {
        match self {
            Shape::I => 0,
            Shape::O => 1,
            Shape::T => 2,
            Shape::S => 3,
            Shape::Z => 4,
            Shape::J => 5,
            Shape::L => 6,
        }
    }

    /// Parse shape from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(Shape::I),
            "o" => Some(Shape::O),
            "t" => Some(Shape::T),
            "s" => Some(Shape::S),
            "z" => Some(Shape::Z),
            "j" => Some(Shape::J),
            "l" => Some(Shape::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::I => "i",
            Shape::O => "o",
            Shape::T => "t",
            Shape::S => "s",
            Shape::Z => "z",
            Shape::J => "j",
            Shape::L => "l",
        }
    }
}

/// Rotation states (North = spawn orientation, index 0)
///
/// The cycle goes North → East → South → West → North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Build a rotation from any index, taken modulo 4.
    pub const fn from_index(index: u32) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// The 16-color block palette.
///
/// Colors are pure identity; [`BlockColor::rgb`] is only a rendering hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockColor {
    Red,
    Orange,
    Yellow,
    Lime,
    Green,
    Mint,
    Cyan,
    Sky,
    Blue,
    Indigo,
    Purple,
    Magenta,
    Pink,
    Rose,
    Coral,
    Amber,
}

impl BlockColor {
    pub const ALL: [BlockColor; 16] = [
        BlockColor::Red,
        BlockColor::Orange,
        BlockColor::Yellow,
        BlockColor::Lime,
        BlockColor::Green,
        BlockColor::Mint,
        BlockColor::Cyan,
        BlockColor::Sky,
        BlockColor::Blue,
        BlockColor::Indigo,
        BlockColor::Purple,
        BlockColor::Magenta,
        BlockColor::Pink,
        BlockColor::Rose,
        BlockColor::Coral,
        BlockColor::Amber,
    ];

    /// 24-bit RGB value used by renderers.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            BlockColor::Red => (255, 0, 0),
            BlockColor::Orange => (255, 128, 0),
            BlockColor::Yellow => (255, 255, 0),
            BlockColor::Lime => (128, 255, 0),
            BlockColor::Green => (0, 204, 0),
            BlockColor::Mint => (0, 255, 128),
            BlockColor::Cyan => (0, 255, 255),
            BlockColor::Sky => (0, 128, 255),
            BlockColor::Blue => (0, 0, 255),
            BlockColor::Indigo => (77, 0, 128),
            BlockColor::Purple => (128, 0, 128),
            BlockColor::Magenta => (255, 0, 255),
            BlockColor::Pink => (255, 102, 179),
            BlockColor::Rose => (255, 0, 128),
            BlockColor::Coral => (255, 77, 77),
            BlockColor::Amber => (255, 191, 0),
        }
    }

    /// Parse color from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == lower)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockColor::Red => "red",
            BlockColor::Orange => "orange",
            BlockColor::Yellow => "yellow",
            BlockColor::Lime => "lime",
            BlockColor::Green => "green",
            BlockColor::Mint => "mint",
            BlockColor::Cyan => "cyan",
            BlockColor::Sky => "sky",
            BlockColor::Blue => "blue",
            BlockColor::Indigo => "indigo",
            BlockColor::Purple => "purple",
            BlockColor::Magenta => "magenta",
            BlockColor::Pink => "pink",
            BlockColor::Rose => "rose",
            BlockColor::Coral => "coral",
            BlockColor::Amber => "amber",
        }
    }
}

/// Cell on the board (None = empty, Some = locked block of that color)
pub type Cell = Option<BlockColor>;

/// Commands a host can issue to a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    HardDrop,
    Tick,
    NewGame,
}

impl Command {
    /// Parse command from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotate" => Some(Command::Rotate),
            "harddrop" => Some(Command::HardDrop),
            "tick" => Some(Command::Tick),
            "newgame" => Some(Command::NewGame),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
            Command::Tick => "tick",
            Command::NewGame => "newGame",
        }
    }
}
