//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: the bordered well with a status line under it, then a
//! side panel with the NEXT preview box and the score.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Tetromino, BOARD_HEIGHT, BOARD_WIDTH};

/// Side length of the preview area, in board cells.
const PREVIEW_CELLS: u16 = 4;

const WELL_BG: Rgb = Rgb::new(20, 20, 28);

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

/// Screen-space origin of the well frame (top-left border corner).
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Outer size of the well including its border.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        // Centred, leaving one row under the well for the status line.
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h + 1) / 2,
        };

        fb.fill_rect(
            origin.x + 1,
            origin.y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::fg(Rgb::new(70, 70, 80)).on(WELL_BG),
        );
        fb.draw_box(
            origin.x,
            origin.y,
            frame_w,
            frame_h,
            CellStyle::fg(Rgb::new(200, 200, 200)),
        );

        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                let kind = snap.cell(x, y);
                if kind.is_empty() {
                    self.draw_empty_cell(fb, origin, x as i8, y as i8);
                } else {
                    self.draw_board_cell(fb, origin, x as i8, y as i8, kind, false);
                }
            }
        }

        if let Some(active) = snap.active {
            for &(x, y) in active.cells.iter() {
                self.draw_board_cell(fb, origin, x, y, active.kind, true);
            }
        }

        self.draw_status_line(fb, snap, origin, frame_h);
        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if snap.paused {
            self.draw_overlay_text(fb, origin, "PAUSED");
        } else if snap.game_over {
            self.draw_overlay_text(fb, origin, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Screen position of board cell (x, y); row 0 is drawn at the bottom.
    fn cell_origin(&self, origin: Origin, x: i8, y: i8) -> Option<(u16, u16)> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        let row = (BOARD_HEIGHT as i8 - 1 - y) as u16;
        Some((
            origin.x + 1 + x as u16 * self.cell_w,
            origin.y + 1 + row * self.cell_h,
        ))
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, origin: Origin, x: i8, y: i8) {
        if let Some((px, py)) = self.cell_origin(origin, x, y) {
            let style = CellStyle::fg(Rgb::new(70, 70, 80)).on(WELL_BG).dim();
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
            fb.put_char(px, py, '·', style);
        }
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        x: i8,
        y: i8,
        kind: Tetromino,
        active: bool,
    ) {
        if let Some((px, py)) = self.cell_origin(origin, x, y) {
            let mut style = CellStyle::fg(piece_color(kind)).on(WELL_BG);
            if active {
                style = CellStyle::fg(piece_color(kind).scale(5, 4)).on(WELL_BG).bold();
            }
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_status_line(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, origin: Origin, frame_h: u16) {
        let y = origin.y + frame_h;
        let style = CellStyle::fg(Rgb::new(220, 220, 220));
        let x = origin.x;

        if snap.game_over {
            let text = "Game over. Score: ";
            fb.put_str(x, y, text, style);
            fb.put_u32(x + text.len() as u16, y, snap.score, style);
        } else if snap.paused {
            fb.put_str(x, y, "Paused", style);
        } else if snap.started {
            let text = "Score: ";
            fb.put_str(x, y, text, style);
            fb.put_u32(x + text.len() as u16, y, snap.score, style);
        } else {
            fb.put_str(x, y, "Press R to start, P to pause", style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        origin: Origin,
        frame_w: u16,
    ) {
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        let box_w = PREVIEW_CELLS * self.cell_w + 2;
        let box_h = PREVIEW_CELLS * self.cell_h + 2;
        if panel_x.saturating_add(box_w) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = origin.y;
        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        fb.draw_box(panel_x, y, box_w, box_h, CellStyle::fg(Rgb::new(120, 120, 130)));
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x + 1, y + 1, &next);
        }
        y += box_h + 1;

        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.score, value);
    }

    /// Draw `shape` centred in the preview area whose top-left inner corner is (x, y).
    /// Offsets are drawn y-down, the same way they appear on the board.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &Shape) {
        if shape.is_empty() {
            return;
        }
        let w = (shape.max_x() - shape.min_x() + 1) as i16;
        let h = (shape.max_y() - shape.min_y() + 1) as i16;
        let left = (PREVIEW_CELLS as i16 - w) / 2 - shape.min_x() as i16;
        let top = (PREVIEW_CELLS as i16 - h) / 2 - shape.min_y() as i16;

        let style = CellStyle::fg(piece_color(shape.kind()));
        for &(ox, oy) in shape.coords() {
            let col = (left + ox as i16) as u16;
            let row = (top + oy as i16) as u16;
            fb.fill_rect(
                x + col * self.cell_w,
                y + row * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, origin: Origin, text: &str) {
        let (frame_w, frame_h) = self.frame_size();
        let text_w = text.chars().count() as u16;
        let x = origin.x + frame_w.saturating_sub(text_w) / 2;
        let y = origin.y + frame_h / 2;
        fb.put_str(x, y, text, CellStyle::fg(Rgb::new(255, 255, 255)).bold());
    }
}

/// Fill color per variant.
pub fn piece_color(kind: Tetromino) -> Rgb {
    match kind {
        Tetromino::NoShape => Rgb::new(0, 0, 0),
        Tetromino::Z => Rgb::new(204, 102, 102),
        Tetromino::S => Rgb::new(102, 204, 102),
        Tetromino::Line => Rgb::new(102, 102, 204),
        Tetromino::T => Rgb::new(204, 204, 102),
        Tetromino::Square => Rgb::new(204, 102, 204),
        Tetromino::L => Rgb::new(102, 204, 204),
        Tetromino::MirroredL => Rgb::new(218, 170, 0),
    }
}
