//! Geometry module - tetromino cell offsets
//!
//! Every shape has four fixed rotation states stored in one static table
//! indexed by `[shape][rotation]`. No rotation matrices are computed at
//! runtime, so there is no rounding or pivot parity to get wrong at the
//! board edges.
//!
//! Offsets are (x, y) relative to the piece anchor. The vertical I states
//! reach one row above the anchor, which is why an I piece cannot be rotated
//! while it sits on row 0.

use crate::types::{Position, Rotation, Shape};

/// Offsets of the four cells of a piece relative to its anchor
pub type ShapeCells = [Position; 4];

const fn p(x: i8, y: i8) -> Position {
    Position::new(x, y)
}

/// `SHAPE_TABLE[shape.index()][rotation.index()]`
static SHAPE_TABLE: [[ShapeCells; 4]; 7] = [
    // I
    [
        [p(0, 0), p(1, 0), p(2, 0), p(3, 0)],
        [p(2, -1), p(2, 0), p(2, 1), p(2, 2)],
        [p(0, 1), p(1, 1), p(2, 1), p(3, 1)],
        [p(1, -1), p(1, 0), p(1, 1), p(1, 2)],
    ],
    // O
    [
        [p(0, 0), p(1, 0), p(0, 1), p(1, 1)],
        [p(0, 0), p(1, 0), p(0, 1), p(1, 1)],
        [p(0, 0), p(1, 0), p(0, 1), p(1, 1)],
        [p(0, 0), p(1, 0), p(0, 1), p(1, 1)],
    ],
    // T
    [
        [p(1, 0), p(0, 1), p(1, 1), p(2, 1)],
        [p(1, 0), p(1, 1), p(2, 1), p(1, 2)],
        [p(0, 1), p(1, 1), p(2, 1), p(1, 2)],
        [p(1, 0), p(0, 1), p(1, 1), p(1, 2)],
    ],
    // S
    [
        [p(1, 0), p(2, 0), p(0, 1), p(1, 1)],
        [p(1, 0), p(1, 1), p(2, 1), p(2, 2)],
        [p(1, 1), p(2, 1), p(0, 2), p(1, 2)],
        [p(0, 0), p(0, 1), p(1, 1), p(1, 2)],
    ],
    // Z
    [
        [p(0, 0), p(1, 0), p(1, 1), p(2, 1)],
        [p(2, 0), p(1, 1), p(2, 1), p(1, 2)],
        [p(0, 1), p(1, 1), p(1, 2), p(2, 2)],
        [p(1, 0), p(0, 1), p(1, 1), p(0, 2)],
    ],
    // J
    [
        [p(0, 0), p(0, 1), p(1, 1), p(2, 1)],
        [p(1, 0), p(2, 0), p(1, 1), p(1, 2)],
        [p(0, 1), p(1, 1), p(2, 1), p(2, 2)],
        [p(1, 0), p(1, 1), p(0, 2), p(1, 2)],
    ],
    // L
    [
        [p(2, 0), p(0, 1), p(1, 1), p(2, 1)],
        [p(1, 0), p(1, 1), p(1, 2), p(2, 2)],
        [p(0, 1), p(1, 1), p(2, 1), p(0, 2)],
        [p(0, 0), p(1, 0), p(1, 1), p(1, 2)],
    ],
];

/// Get the cell offsets for a shape in a given rotation state
#[inline]
pub fn shape_cells(shape: Shape, rotation: Rotation) -> ShapeCells {
    SHAPE_TABLE[shape.index()][rotation.index()]
}

/// Get the cell offsets for a shape and any rotation index (taken modulo 4)
pub fn offsets(shape: Shape, rotation: u32) -> ShapeCells {
    shape_cells(shape, Rotation::from_index(rotation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_has_four_distinct_cells() {
        for shape in Shape::ALL {
            for r in 0..4 {
                let cells = offsets(shape, r);
                for i in 0..4 {
                    for j in i + 1..4 {
                        assert_ne!(cells[i], cells[j], "{:?} rot {} repeats a cell", shape, r);
                    }
                }
            }
        }
    }

    #[test]
    fn rotation_index_is_taken_modulo_four() {
        for shape in Shape::ALL {
            for r in 0..4 {
                assert_eq!(offsets(shape, r), offsets(shape, r + 4));
                assert_eq!(offsets(shape, r), offsets(shape, r + 400));
            }
        }
    }

    #[test]
    fn o_shape_is_rotation_invariant() {
        let north = shape_cells(Shape::O, Rotation::North);
        for rotation in [Rotation::East, Rotation::South, Rotation::West] {
            assert_eq!(shape_cells(Shape::O, rotation), north);
        }
    }

    #[test]
    fn vertical_i_reaches_above_anchor() {
        assert!(offsets(Shape::I, 1).iter().any(|c| c.y < 0));
        assert!(offsets(Shape::I, 3).iter().any(|c| c.y < 0));
        assert!(offsets(Shape::I, 0).iter().all(|c| c.y == 0));
    }

    #[test]
    fn spawn_states_touch_row_zero() {
        for shape in Shape::ALL {
            assert!(
                offsets(shape, 0).iter().any(|c| c.y == 0),
                "{:?} spawn state has no cell on the anchor row",
                shape
            );
        }
    }
}
