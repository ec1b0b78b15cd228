//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color of
//! a locked block. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom).
//!
//! The falling piece is never written into the board until it locks, so
//! "locked block or active piece" is always answered by construction.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{BlockColor, Cell, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices, at most one per board row
pub type RowSet = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Column in [0, W) and row in [0, H)
    pub fn in_bounds(&self, pos: Position) -> bool {
        Self::index(pos.x, pos.y).is_some()
    }

    /// True only for an in-bounds locked block.
    ///
    /// Rows above the board are never occupied.
    pub fn is_occupied(&self, pos: Position) -> bool {
        matches!(self.get(pos.x, pos.y), Some(Some(_)))
    }

    /// Collision check shared by movement, rotation, gravity and spawning.
    ///
    /// Every cell must be inside `[0, W) x [0, H)` and empty. Cells above the
    /// board (negative rows) are rejected as well.
    pub fn can_place(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .iter()
            .all(|c| matches!(self.get(c.x, c.y), Some(None)))
    }

    /// Write the piece's color into the board.
    ///
    /// Cells outside the board are skipped; an accepted piece never has any.
    pub fn lock(&mut self, piece: &Piece) {
        for c in piece.cells() {
            self.set(c.x, c.y, Some(piece.color));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Indices of full rows, top to bottom
    pub fn full_rows(&self) -> RowSet {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove the listed rows (original indices) and insert the same number
    /// of empty rows at the top, keeping the order of the remaining rows.
    ///
    /// Duplicates and out-of-range indices are ignored. Uses a single
    /// bottom-up compaction pass, so the result does not depend on how many
    /// rows are removed at once.
    pub fn remove_rows(&mut self, rows: &[usize]) -> usize {
        let height = BOARD_HEIGHT as usize;
        let width = BOARD_WIDTH as usize;

        let mut remove = [false; BOARD_HEIGHT as usize];
        for &y in rows {
            if y < height {
                remove[y] = true;
            }
        }

        let mut write_y = height;
        for read_y in (0..height).rev() {
            if remove[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        // write_y rows were removed; blank that many rows at the top
        self.cells[..write_y * width].fill(None);
        write_y
    }

    /// One row of cells, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Number of locked blocks on the board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, top row first.
    ///
    /// `.` is empty, any other character is a block of `color`. Missing rows
    /// are empty and missing trailing columns are empty; anything beyond the
    /// board is ignored. Meant for scenarios and tests.
    pub fn from_rows(rows: &[&str], color: BlockColor) -> Self {
        let mut board = Self::new();
        let offset = (BOARD_HEIGHT as usize).saturating_sub(rows.len());
        for (i, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch != '.' {
                    board.set(x as i8, (offset + i) as i8, Some(color));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
