//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PhaseKind};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BlockColor, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const FLASH_BG: Rgb = Rgb::new(235, 235, 235);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the board and score panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Board frame origin and size inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is only reallocated
    /// when the viewport grows.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame(viewport);
        let border = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        self.draw_border(fb, frame, border);

        for y in 0..BOARD_HEIGHT as usize {
            let flashing = snap.flashing[y];
            for x in 0..BOARD_WIDTH as usize {
                let (cx, cy) = (x as u16, y as u16);
                if snap.is_active_cell(x as i8, y as i8) {
                    continue;
                }
                match (snap.board[y][x], flashing) {
                    (Some(color), true) => self.draw_flash_cell(fb, frame, cx, cy, color),
                    (Some(color), false) => self.draw_block(fb, frame, cx, cy, color),
                    (None, _) => self.draw_empty_cell(fb, frame, cx, cy),
                }
            }
        }

        if let Some(active) = snap.active {
            for c in active.cells {
                // Cells above the top row are not drawn.
                if c.x >= 0 && c.x < BOARD_WIDTH as i8 && c.y >= 0 && c.y < BOARD_HEIGHT as i8 {
                    self.draw_block(fb, frame, c.x as u16, c.y as u16, active.color);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Top-left terminal position of board cell `(x, y)` for `viewport`.
    pub fn cell_origin(&self, viewport: Viewport, x: u16, y: u16) -> (u16, u16) {
        let frame = self.frame(viewport);
        (
            frame.x + 1 + x * self.cell_w,
            frame.y + 1 + y * self.cell_h,
        )
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y,
            w,
            h,
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle {
            dim: true,
            ..CellStyle::plain(Rgb::new(90, 90, 100), WELL_BG)
        };
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, color: BlockColor) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::from(color), WELL_BG)
        };
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    /// Rows in a visible flash step: pale background, blocks drawn lighter.
    fn draw_flash_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, color: BlockColor) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::from(color).lighten(160), FLASH_BG)
        };
        self.fill_cell_rect(fb, frame, x, y, '▓', style);
    }

    fn fill_cell_rect(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "SPEED", label);
        fb.put_u32(panel_x, y + 1, snap.drop_interval_ms, value);
        let digits = digit_count(snap.drop_interval_ms);
        fb.put_str(panel_x + digits, y + 1, "ms", value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "STATE", label);
        let state = match snap.phase {
            PhaseKind::Falling => "PLAYING",
            PhaseKind::Clearing => "CLEARING",
            PhaseKind::GameOver => "GAME OVER",
        };
        fb.put_str(panel_x, y + 1, state, value);
        y = y.saturating_add(3);

        let hint = CellStyle {
            dim: true,
            ..value
        };
        for line in ["r  new game", "q  quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0))
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}
