use serde::Serialize;
use tetrion_types::{Cell, PieceKind, Rotation};

use crate::pieces::Tetromino;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub cells: [(i8, i8); 4],
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

/// Read-only view of a game for renderers and the headless driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major, `width * height` cells
    pub cells: Vec<Cell>,
    pub current: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: Option<PieceKind>,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub back_to_back: bool,
    pub drop_interval_ms: u32,
    pub paused: bool,
    pub over: bool,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.cells[y * self.width as usize + x]
    }

    pub fn playable(&self) -> bool {
        !self.over && !self.paused
    }

    /// Plain-text rendering: `#` for blocks, `@` for the current piece
    pub fn render_text(&self) -> String {
        let width = self.width as usize;
        let mut out = String::with_capacity((width + 1) * self.height as usize);
        for y in 0..self.height as usize {
            for x in 0..width {
                let active = self
                    .current
                    .map(|p| p.cells.contains(&(x as i8, y as i8)))
                    .unwrap_or(false);
                let ch = if active {
                    '@'
                } else if self.cell(x, y).is_some() {
                    '#'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
