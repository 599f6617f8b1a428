//! Grid module - the playfield cell matrix
//!
//! The grid is a `width x height` matrix where each cell is empty or holds the
//! kind of the piece that was locked there. Cells live in a flat row-major
//! vector for cache locality; dimensions are fixed at construction.
//!
//! Coordinates: `(x, y)` where `x` runs left to right and `y` top to bottom.
//! The grid itself only knows about in-bounds cells; the collision resolver
//! decides what walls, floor and the area above the grid mean for a piece.

use std::fmt;

use tetrion_types::{Cell, ConfigError, GridConfig, PieceKind};

/// Cell write outside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds { x: i8, y: i8 },
}

impl GridError {
    pub fn code(self) -> &'static str {
        match self {
            GridError::OutOfBounds { .. } => "out_of_bounds",
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { x, y } => write!(f, "cell ({}, {}) is outside the grid", x, y),
        }
    }
}

impl std::error::Error for GridError {}

/// The playfield - fixed size, flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid, rejecting dimensions the engine cannot play on
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    /// Empty grid for an already validated config
    fn empty(config: GridConfig) -> Self {
        let len = config.width as usize * config.height as usize;
        Self {
            width: config.width,
            height: config.height,
            cells: vec![None; len],
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether `(x, y)` is inside the grid
    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        self.index(x, y).is_some()
    }

    /// Get cell at `(x, y)`, `None` when out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// True if `(x, y)` is inside the grid and filled
    ///
    /// Out-of-bounds positions report `false`; walls and floor are the
    /// resolver's business.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Write a cell
    pub fn set_cell(&mut self, x: i8, y: i8, cell: Cell) -> Result<(), GridError> {
        let idx = self.index(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        self.cells[idx] = cell;
        Ok(())
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height as usize && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, ascending
    pub fn find_full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove the listed rows and drop everything above them
    ///
    /// The rows are treated as a set: duplicates and order do not matter and
    /// indices outside the grid are ignored. Surviving rows keep their relative
    /// order and settle at the bottom; the same number of empty rows is
    /// inserted at the top. Returns how many rows were removed.
    pub fn remove_rows(&mut self, rows: &[usize]) -> usize {
        let height = self.height as usize;
        let width = self.width as usize;

        let mut doomed = vec![false; height];
        for &y in rows {
            if y < height {
                doomed[y] = true;
            }
        }
        let removed = doomed.iter().filter(|&&d| d).count();
        if removed == 0 {
            return 0;
        }

        let mut cells = vec![None; removed * width];
        cells.reserve(self.cells.len() - cells.len());
        for y in (0..height).filter(|&y| !doomed[y]) {
            cells.extend_from_slice(self.row(y));
        }
        self.cells = cells;
        removed
    }

    /// True when no cell is filled (perfect clear)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// Build a grid from text rows, `.` for empty and a piece letter for filled
    ///
    /// Rows are given top to bottom and are bottom-aligned; missing rows on top
    /// stay empty. Intended for tests and fixtures.
    pub fn from_rows(config: GridConfig, rows: &[&str]) -> Result<Self, ConfigError> {
        let mut grid = Self::new(config)?;
        let offset = grid.height as usize - rows.len().min(grid.height as usize);
        for (i, line) in rows.iter().take(grid.height as usize).enumerate() {
            let y = offset + i;
            for (x, ch) in line.chars().take(grid.width as usize).enumerate() {
                let cell = PieceKind::from_str(&ch.to_string());
                let idx = y * grid.width as usize + x;
                grid.cells[idx] = cell;
            }
        }
        Ok(grid)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty(GridConfig::default())
    }
}
