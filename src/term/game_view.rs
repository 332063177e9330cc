//! GameView: maps a `core::Session` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The board is drawn with row 0 at the bottom, so views flip rows into
//! screen space. Tiles are colored by value with the classic 2048 palette
//! and show their number right-aligned inside the cell.

use crate::core::session::Session;
use crate::core::tetromino::Tetromino;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};

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

/// A lightweight terminal view for the hybrid game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x1 leaves room for four-digit tile values and still fits a
        // 12-column board plus side panel into 80 terminal columns.
        Self {
            cell_w: 4,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Render the running session into a framebuffer. `toast` is the name
    /// of a freshly unlocked achievement, shown in the side panel.
    pub fn render(&self, session: &Session, toast: Option<&str>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let board = session.board();

        let board_px_w = board.width() as u16 * self.cell_w;
        let board_px_h = board.height() as u16 * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        // Play area background and frame.
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Settled tiles.
        for row in 0..board.height() {
            for col in 0..board.width() {
                match board.tile(row as i32, col as i32) {
                    Some(tile) => self.draw_tile_cell(
                        &mut fb,
                        (start_x, start_y),
                        board.height(),
                        col as u16,
                        row as u16,
                        tile.value(),
                        false,
                    ),
                    None => self.draw_empty_cell(
                        &mut fb,
                        (start_x, start_y),
                        board.height(),
                        col as u16,
                        row as u16,
                    ),
                }
            }
        }

        // Ghost, then the active piece over it.
        if let (Some(active), Some(offset)) = (session.active(), session.ghost_offset()) {
            let ghost = CellStyle {
                fg: Rgb::new(140, 140, 140),
                bg: Rgb::new(30, 30, 40),
                bold: false,
                dim: true,
            };
            for tile in active.tiles() {
                let pos = tile.position();
                let target_y = pos.y - offset;
                if board.is_inside(target_y, pos.x) {
                    let (px, py) = self.cell_origin(
                        (start_x, start_y),
                        board.height(),
                        pos.x as u16,
                        target_y as u16,
                    );
                    fb.fill_rect(px, py, self.cell_w, self.cell_h, '░', ghost);
                }
            }

            for tile in active.tiles() {
                let pos = tile.position();
                if board.is_inside(pos.y, pos.x) {
                    self.draw_tile_cell(
                        &mut fb,
                        (start_x, start_y),
                        board.height(),
                        pos.x as u16,
                        pos.y as u16,
                        tile.value(),
                        true,
                    );
                }
            }
        }

        // Side panel (score / next / toast).
        self.draw_side_panel(&mut fb, session, toast, viewport, (start_x, start_y), frame_w);

        // Overlays.
        if session.paused() {
            self.draw_overlay_lines(&mut fb, start_x, start_y, frame_w, frame_h, &["PAUSED"]);
        } else if session.game_over() {
            let score_line = format!("SCORE {}", session.score());
            self.draw_overlay_lines(
                &mut fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                &["GAME OVER", &score_line, "R RESTART  Q QUIT"],
            );
        }

        fb
    }

    /// Render the title screen.
    pub fn render_menu(&self, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let title_white = CellStyle {
            fg: Rgb::new(249, 246, 242),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let title_gold = CellStyle {
            bold: true,
            ..tile_style(2048)
        };
        let text = CellStyle::default();
        let dim = CellStyle {
            dim: true,
            ..CellStyle::default()
        };

        let mid_y = viewport.height / 2;
        let title = "TETRIS 2048";
        let title_x = viewport.width.saturating_sub(title.chars().count() as u16) / 2;
        fb.put_str(title_x, mid_y.saturating_sub(5), "TETRIS ", title_white);
        fb.put_str(title_x + 7, mid_y.saturating_sub(5), "2048", title_gold);

        put_centered(
            &mut fb,
            mid_y.saturating_sub(3),
            "tetrominoes fall, equal tiles merge",
            dim,
        );
        put_centered(&mut fb, mid_y, "ENTER  start", text);
        put_centered(&mut fb, mid_y + 1, "Q      quit", text);
        put_centered(
            &mut fb,
            mid_y + 4,
            "move with arrows or hjkl, SPACE to drop, P to pause",
            dim,
        );

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

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

    /// Top-left terminal cell of a board cell, flipping rows so the
    /// board's bottom row lands at the bottom of the frame.
    fn cell_origin(
        &self,
        start: (u16, u16),
        board_height: usize,
        col: u16,
        row: u16,
    ) -> (u16, u16) {
        let px = start.0 + 1 + col * self.cell_w;
        let py = start.1 + 1 + (board_height as u16 - 1 - row) * self.cell_h;
        (px, py)
    }

    fn draw_empty_cell(
        &self,
        fb: &mut FrameBuffer,
        start: (u16, u16),
        board_height: usize,
        col: u16,
        row: u16,
    ) {
        let style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            dim: true,
        };
        let (px, py) = self.cell_origin(start, board_height, col, row);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, '·', style);
    }

    fn draw_tile_cell(
        &self,
        fb: &mut FrameBuffer,
        start: (u16, u16),
        board_height: usize,
        col: u16,
        row: u16,
        value: u32,
        bold: bool,
    ) {
        let style = CellStyle {
            bold,
            ..tile_style(value)
        };
        let (px, py) = self.cell_origin(start, board_height, col, row);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_str_right(
            px,
            py + self.cell_h / 2,
            self.cell_w,
            &value.to_string(),
            style,
        );
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        session: &Session,
        toast: Option<&str>,
        viewport: Viewport,
        start: (u16, u16),
        frame_w: u16,
    ) {
        let panel_x = start.0.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = start.1;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &session.score().to_string(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        fb.put_str(
            panel_x + 5,
            y,
            session.next_piece().kind().as_str(),
            value,
        );
        y = y.saturating_add(1);
        y = self.draw_next_preview(fb, session.next_piece(), panel_x, y);
        y = y.saturating_add(1);

        if let Some(name) = toast {
            let gold = CellStyle {
                fg: Rgb::new(237, 194, 46),
                bg: Rgb::new(0, 0, 0),
                bold: true,
                dim: false,
            };
            fb.put_str(panel_x, y, "UNLOCKED", gold);
            fb.put_str(panel_x, y.saturating_add(1), name, value);
        }

        // Key help at the bottom of the frame, skipped on boards too
        // short to keep it clear of the score block.
        let frame_h = session.board().height() as u16 * self.cell_h + 2;
        if frame_h >= 16 {
            let dim = CellStyle {
                dim: true,
                ..CellStyle::default()
            };
            let help = ["←→ move", "↓ soft drop", "SPACE drop", "P pause"];
            let mut help_y = start.1 + frame_h - help.len() as u16;
            for line in help {
                fb.put_str(panel_x, help_y, line, dim);
                help_y += 1;
            }
        }
    }

    /// Draw the preview piece normalized to the panel origin.
    /// Returns the first free row below the preview.
    fn draw_next_preview(
        &self,
        fb: &mut FrameBuffer,
        piece: &Tetromino,
        panel_x: u16,
        y: u16,
    ) -> u16 {
        let min_x = piece
            .tiles()
            .iter()
            .map(|t| t.position().x)
            .min()
            .unwrap_or(0);
        let min_y = piece
            .tiles()
            .iter()
            .map(|t| t.position().y)
            .min()
            .unwrap_or(0);
        let max_y = piece
            .tiles()
            .iter()
            .map(|t| t.position().y)
            .max()
            .unwrap_or(0);
        let rows = (max_y - min_y + 1) as u16;

        for tile in piece.tiles() {
            let pos = tile.position();
            let px = panel_x + (pos.x - min_x) as u16 * self.cell_w;
            let py = y + (max_y - pos.y) as u16 * self.cell_h;
            let style = tile_style(tile.value());
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
            fb.put_str_right(
                px,
                py + self.cell_h / 2,
                self.cell_w,
                &tile.value().to_string(),
                style,
            );
        }

        y + rows * self.cell_h
    }

    fn draw_overlay_lines(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let first_y = start_y
            .saturating_add(frame_h / 2)
            .saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            let text_w = line.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, first_y.saturating_add(i as u16), line, style);
        }
    }
}

/// Classic 2048 palette, keyed by tile value. Values beyond 2048 share
/// one dark style.
fn tile_style(value: u32) -> CellStyle {
    let dark_text = Rgb::new(119, 110, 101);
    let light_text = Rgb::new(249, 246, 242);
    let (fg, bg) = match value {
        2 => (dark_text, Rgb::new(238, 228, 218)),
        4 => (dark_text, Rgb::new(237, 224, 200)),
        8 => (light_text, Rgb::new(242, 177, 121)),
        16 => (light_text, Rgb::new(245, 149, 99)),
        32 => (light_text, Rgb::new(246, 124, 95)),
        64 => (light_text, Rgb::new(246, 94, 59)),
        128 => (light_text, Rgb::new(237, 207, 114)),
        256 => (light_text, Rgb::new(237, 204, 97)),
        512 => (light_text, Rgb::new(237, 200, 80)),
        1024 => (light_text, Rgb::new(237, 197, 63)),
        2048 => (light_text, Rgb::new(237, 194, 46)),
        _ => (light_text, Rgb::new(60, 58, 50)),
    };
    CellStyle {
        fg,
        bg,
        bold: false,
        dim: false,
    }
}

fn put_centered(fb: &mut FrameBuffer, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    let x = fb.width().saturating_sub(text_w) / 2;
    fb.put_str(x, y, text, style);
}
