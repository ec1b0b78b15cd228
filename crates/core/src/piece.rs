//! Piece module - the falling tetromino
//!
//! A piece is a plain `Copy` value. Movement and rotation never mutate a
//! piece in place: they build a candidate which the session either accepts
//! or drops.

use crate::geometry::{shape_cells, ShapeCells};
use crate::rng::SimpleRng;
use crate::types::{BlockColor, Position, Rotation, Shape, SPAWN_X, SPAWN_Y};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub color: BlockColor,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at the spawn anchor in its spawn orientation
    pub fn new(shape: Shape, color: BlockColor) -> Self {
        Self {
            shape,
            color,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Spawn a piece with an independently chosen shape and color
    pub fn random(rng: &mut SimpleRng) -> Self {
        let shape = rng.next_shape();
        let color = rng.next_color();
        Self::new(shape, color)
    }

    pub fn anchor(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Offsets for the current rotation
    pub fn shape_cells(&self) -> ShapeCells {
        shape_cells(self.shape, self.rotation)
    }

    /// Absolute board positions of the four cells
    pub fn cells(&self) -> [Position; 4] {
        self.shape_cells().map(|c| c.offset(self.x, self.y))
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Candidate rotated one step clockwise around the same anchor
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }
}
