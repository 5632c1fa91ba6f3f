//! The play screen, drawn from a [`GameSnapshot`] plus the per-frame [`Hud`] text.
//!
//! The board is centred horizontally; tiles are 6x3 cells with the value in the
//! middle row. A game-over or win banner is boxed over the centre of the board.
//!
//! Layout, top to bottom: title and score on row 1, recent score changes under the
//! score, the tile grid, a status line and the controls footer on the last row.

use std::time::Instant;

use crate::core::{Fade, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer};
use crate::theme::{tile_label, Theme};

/// Tile size in terminal cells.
pub const TILE_WIDTH: u16 = 6;
pub const TILE_HEIGHT: u16 = 3;
/// Gap between neighbouring tiles.
pub const TILE_GAP_X: u16 = 2;
pub const TILE_GAP_Y: u16 = 1;

const BOARD_TOP: u16 = 3;

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

/// Per-frame text that does not live in the game state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hud<'a> {
    /// Controls help, built from the active key bindings.
    pub controls: &'a str,
    /// One-line status (save/load results and similar).
    pub status: Option<&'a str>,
    /// Show the win banner over the board.
    pub win_banner: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GameView {
    theme: Theme,
}

impl GameView {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Columns and rows taken by an `n x n` grid.
    pub fn board_extent(n: usize) -> (u16, u16) {
        let n = n as u16;
        if n == 0 {
            return (0, 0);
        }
        (
            n * TILE_WIDTH + (n - 1) * TILE_GAP_X,
            n * TILE_HEIGHT + (n - 1) * TILE_GAP_Y,
        )
    }

    /// Render the game screen into an existing framebuffer.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &Hud<'_>,
        now: Instant,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(self.theme.text.into_cell(' '));

        self.draw_header(fb, snap, now, viewport);

        let (board_w, board_h) = Self::board_extent(snap.size);
        let board_x = viewport.width.saturating_sub(board_w) / 2;
        for row in 0..snap.size {
            for col in 0..snap.size {
                let x = board_x + col as u16 * (TILE_WIDTH + TILE_GAP_X);
                let y = BOARD_TOP + row as u16 * (TILE_HEIGHT + TILE_GAP_Y);
                self.draw_tile(fb, x, y, snap.tile(row, col));
            }
        }

        if snap.game_over {
            let score = format!("Final score: {}", snap.score);
            self.draw_banner(
                fb,
                board_x,
                board_w,
                board_h,
                &["GAME OVER", &score, "Press any key"],
            );
        } else if hud.win_banner {
            self.draw_banner(
                fb,
                board_x,
                board_w,
                board_h,
                &["YOU WIN!", "Endless mode enabled"],
            );
        }

        let last = viewport.height.saturating_sub(1);
        if let Some(status) = hud.status {
            fb.put_str_centered(0, last.saturating_sub(1), viewport.width, status, self.theme.accent);
        }
        fb.put_str_centered(0, last, viewport.width, hud.controls, self.theme.controls);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        hud: &Hud<'_>,
        now: Instant,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, now, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, now: Instant, viewport: Viewport) {
        let used = fb.put_str(2, 1, "2048", self.theme.title);
        if snap.endless_mode {
            fb.put_str(2 + used, 1, " [ENDLESS]", self.theme.accent);
        }

        let right = viewport.width.saturating_sub(2);
        fb.put_str_right(right, 1, &format!("Score: {}", snap.score), self.theme.score);

        for (i, change) in snap.history.visible(now).enumerate() {
            let style = self.fade_style(change.fade(now));
            fb.put_str_right(right, 2 + i as u16, &format!("+{}", change.points), style);
        }
    }

    fn fade_style(&self, fade: Fade) -> CellStyle {
        match fade {
            Fade::Recent => self.theme.accent.bold(),
            Fade::Medium => self.theme.accent,
            Fade::Old => self.theme.accent.dim(),
        }
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, x: u16, y: u16, value: u32) {
        let style = self.theme.tile_style(value);
        let mid = y + TILE_HEIGHT / 2;
        if style.filled {
            fb.fill_rect(x, y, TILE_WIDTH, TILE_HEIGHT, ' ', style.frame);
            let label = tile_label(value, TILE_WIDTH as usize);
            fb.put_str_centered(x, mid, TILE_WIDTH, &label, style.label);
        } else {
            fb.draw_box(x, y, TILE_WIDTH, TILE_HEIGHT, style.frame);
            let label = tile_label(value, (TILE_WIDTH - 2) as usize);
            fb.put_str_centered(x + 1, mid, TILE_WIDTH - 2, &label, style.label);
        }
    }

    /// Boxed lines centred over the board.
    fn draw_banner(&self, fb: &mut FrameBuffer, board_x: u16, board_w: u16, board_h: u16, lines: &[&str]) {
        let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        let w = inner + 4;
        let h = lines.len() as u16 + 2;
        let x = board_x + board_w.saturating_sub(w) / 2;
        let y = BOARD_TOP + board_h.saturating_sub(h) / 2;

        fb.fill_rect(x, y, w, h, ' ', self.theme.text);
        fb.draw_box(x, y, w, h, self.theme.accent);
        for (i, line) in lines.iter().enumerate() {
            let style = if i == 0 { self.theme.score } else { self.theme.text };
            fb.put_str_centered(x + 1, y + 1 + i as u16, w - 2, line, style);
        }
    }
}
