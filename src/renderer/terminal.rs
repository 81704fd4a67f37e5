//! Terminal renderer
//!
//! Draws the snapshot into a character grid, one cell per `world / grid`
//! block, then flushes it with crossterm.

use std::io::{self, Write};

use crossterm::{cursor, queue, style::{self, Color}};

use super::{RenderSnapshot, Renderer};
use crate::sim::{DecorKind, GameOverReason, GamePhase, ObstacleKind};

const SKY: Color = Color::Rgb { r: 92, g: 148, b: 252 };
const GROUND: Color = Color::Rgb { r: 222, g: 184, b: 135 };
const GROUND_TILE: Color = Color::Rgb { r: 205, g: 133, b: 63 };
const HILL: Color = Color::Rgb { r: 34, g: 139, b: 34 };
const CLOUD: Color = Color::Rgb { r: 255, g: 255, b: 255 };
const PIPE: Color = Color::Rgb { r: 0, g: 128, b: 0 };
const PIPE_RIM: Color = Color::Rgb { r: 0, g: 100, b: 0 };
const BLOCK: Color = Color::Rgb { r: 210, g: 105, b: 30 };
const BLOCK_DETAIL: Color = Color::Rgb { r: 160, g: 82, b: 45 };
const SHIRT: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const OVERALLS: Color = Color::Rgb { r: 0, g: 0, b: 255 };
const HAT: Color = Color::Rgb { r: 0, g: 0, b: 0 };
const KEY_BG: Color = Color::Rgb { r: 0, g: 0, b: 0 };
const KEY_TEXT: Color = Color::Rgb { r: 255, g: 255, b: 255 };
const KEY_TARGET: Color = Color::Rgb { r: 255, g: 255, b: 0 };
const KEY_CLEARED: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const HUD_TEXT: Color = Color::Rgb { r: 0, g: 0, b: 0 };
const OVERLAY_START: Color = Color::Rgb { r: 40, g: 40, b: 60 };
const OVERLAY_OVER: Color = Color::Rgb { r: 140, g: 20, b: 20 };
const TITLE: Color = Color::Rgb { r: 255, g: 255, b: 0 };

/// Width of one ground tile in world units
const GROUND_TILE_WIDTH: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: KEY_TEXT,
            bg: SKY,
        }
    }
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        let mut renderer = Self {
            out,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        };
        renderer.resize(cols, rows);
        renderer
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1) as usize;
        self.rows = rows.max(1) as usize;
        self.cells = vec![Cell::default(); self.cols * self.rows];
    }

    /// Underlying output
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        Some(&mut self.cells[row as usize * self.cols + col as usize])
    }

    fn fill(&mut self, col: i32, row: i32, w: i32, h: i32, bg: Color) {
        for dy in 0..h {
            for dx in 0..w {
                if let Some(cell) = self.cell_mut(col + dx, row + dy) {
                    *cell = Cell { ch: ' ', fg: KEY_TEXT, bg };
                }
            }
        }
    }

    fn text(&mut self, col: i32, row: i32, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if let Some(cell) = self.cell_mut(col + i as i32, row) {
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }

    fn text_centered(&mut self, row: i32, s: &str, fg: Color) {
        let col = (self.cols as i32 - s.chars().count() as i32) / 2;
        self.text(col, row, s, fg);
    }

    fn draw(&mut self, frame: &RenderSnapshot<'_>) {
        let sx = frame.viewport.width / self.cols as f32;
        let sy = frame.viewport.height / self.rows as f32;
        // World rectangle to cell rectangle, at least one cell big
        let to_cells = |x: f32, y: f32, w: f32, h: f32| {
            let col = (x / sx).floor() as i32;
            let row = (y / sy).floor() as i32;
            let w = ((w / sx).round() as i32).max(1);
            let h = ((h / sy).round() as i32).max(1);
            (col, row, w, h)
        };

        self.cells.fill(Cell::default());

        for deco in frame.hills.iter().chain(frame.clouds) {
            let (col, row, w, h) = to_cells(deco.pos.x, deco.pos.y, deco.size.x, deco.size.y);
            let color = match deco.kind {
                DecorKind::Hill => HILL,
                DecorKind::Cloud => CLOUD,
            };
            self.fill(col, row, w, h, color);
        }

        // Ground with a scrolling tile pattern
        let ground_row = (frame.ground_y / sy).floor() as i32;
        self.fill(0, ground_row, self.cols as i32, self.rows as i32 - ground_row, GROUND);
        let offset = (frame.frame_count as f32 * frame.speed * 0.8) % GROUND_TILE_WIDTH;
        let mut x = -offset;
        while x < frame.viewport.width {
            let (col, _, w, _) = to_cells(x, 0.0, GROUND_TILE_WIDTH / 2.0, 1.0);
            self.fill(col, ground_row, w, 1, GROUND_TILE);
            x += GROUND_TILE_WIDTH;
        }

        let flash = frame.clear_flash_active();
        for obstacle in frame.obstacles {
            let (col, row, w, h) =
                to_cells(obstacle.pos.x, obstacle.pos.y, obstacle.size.x, obstacle.size.y);
            match obstacle.kind {
                ObstacleKind::Pipe => {
                    self.fill(col, row, w, h, PIPE);
                    self.fill(col - 1, row, w + 2, 1, PIPE_RIM);
                }
                ObstacleKind::Block => {
                    self.fill(col, row, w, h, BLOCK);
                    self.fill(col, row + h / 2, w, 1, BLOCK_DETAIL);
                }
            }

            let key_col = col + w / 2;
            let key_row = row + h / 2;
            let fg = if obstacle.is_target {
                KEY_TARGET
            } else if obstacle.cleared {
                KEY_CLEARED
            } else {
                KEY_TEXT
            };
            if obstacle.is_target || (obstacle.cleared && flash) {
                self.fill(key_col - 1, key_row, 3, 1, KEY_BG);
            }
            let key = obstacle.required_key.to_ascii_uppercase().to_string();
            self.text(key_col, key_row, &key, fg);
        }

        let player = frame.player;
        let (col, row, w, h) = to_cells(
            player.pos.x - player.size.x / 2.0,
            player.pos.y - player.size.y / 2.0,
            player.size.x,
            player.size.y,
        );
        self.fill(col, row, w, h, SHIRT);
        self.fill(col, row + h / 2, w, h - h / 2, OVERALLS);
        self.fill(col + w / 4, row - 1, (w / 2).max(1), 1, HAT);

        match frame.phase {
            GamePhase::Start => self.draw_start(),
            GamePhase::Playing => self.draw_hud(frame),
            GamePhase::GameOver => self.draw_game_over(frame),
        }
    }

    fn draw_hud(&mut self, frame: &RenderSnapshot<'_>) {
        self.text(2, 0, &format!("SCORE: {}", frame.score), HUD_TEXT);
        let speed = format!("SPEED: {:.1}", frame.speed);
        let col = self.cols as i32 - speed.len() as i32 - 2;
        self.text(col, 0, &speed, HUD_TEXT);
        self.text_centered(1, "Press the key shown on the block!", HUD_TEXT);
    }

    fn draw_start(&mut self) {
        let mid = self.rows as i32 / 2;
        self.fill(0, mid - 4, self.cols as i32, 8, OVERLAY_START);
        self.text_centered(mid - 3, "KEY RUNNER", TITLE);
        self.text_centered(mid - 1, "Press the letter shown on the incoming obstacle!", KEY_TEXT);
        self.text_centered(mid, "Miss a key or hit the obstacle, and it's GAME OVER.", KEY_TEXT);
        self.text_centered(mid + 2, "Press ANY KEY to Start", TITLE);
    }

    fn draw_game_over(&mut self, frame: &RenderSnapshot<'_>) {
        let mid = self.rows as i32 / 2;
        self.fill(0, mid - 4, self.cols as i32, 8, OVERLAY_OVER);
        self.text_centered(mid - 3, "GAME OVER", KEY_TEXT);
        let reason = match frame.game_over_reason {
            Some(GameOverReason::Collision) => "You ran into an obstacle",
            Some(GameOverReason::Missed) => "An obstacle got past you",
            Some(GameOverReason::WrongKey) => "Wrong key",
            None => "",
        };
        self.text_centered(mid - 1, reason, KEY_TEXT);
        self.text_centered(mid, &format!("Final Score: {}", frame.score), KEY_TEXT);
        self.text_centered(mid + 2, "Press [R] to Restart", TITLE);
    }

    fn flush(&mut self) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0))?;
        let mut prev: Option<(Color, Color)> = None;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = self.cells[row * self.cols + col];
                if prev != Some((cell.fg, cell.bg)) {
                    queue!(
                        self.out,
                        style::SetForegroundColor(cell.fg),
                        style::SetBackgroundColor(cell.bg)
                    )?;
                    prev = Some((cell.fg, cell.bg));
                }
                queue!(self.out, style::Print(cell.ch))?;
            }
            if row < self.rows - 1 {
                queue!(self.out, style::ResetColor, style::Print("\r\n"))?;
                prev = None;
            }
        }
        queue!(self.out, style::ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = io::Error;

    fn render(&mut self, frame: &RenderSnapshot<'_>) -> io::Result<()> {
        self.draw(frame);
        self.flush()
    }
}
