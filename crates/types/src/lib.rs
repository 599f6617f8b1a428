//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! Everything here is plain data: the game core, the input controller and any
//! host (renderer, audio, UI) can depend on it without pulling in game logic.
//!
//! # Grid Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Coordinates are `(x, y)` with
//! `x` growing to the right and `y` growing downwards; row 0 is the top visible row.
//! Pieces may hang above the grid (negative `y`) while they spawn.
//!
//! # Default Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_INITIAL_INTERVAL_MS` | 1000 | Gravity interval at level 1 |
//! | `DEFAULT_SPEED_FACTOR` | 0.7 | Base of the exponential level curve |
//! | `DEFAULT_LEVEL_ADJUSTMENT` | 0.015 | Per-level reduction of the base |
//! | `DEFAULT_MINIMUM_INTERVAL_MS` | 100 | Gravity floor |
//! | `DEFAULT_REPEAT_DELAY_MS` | 150 | Held key: delay before the first repeat |
//! | `DEFAULT_REPEAT_INTERVAL_MS` | 50 | Held key: interval between repeats |
//!
//! # Examples
//!
//! ```
//! use tetrion_types::{GameAction, PieceKind, Rotation, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::Spawn.rotate_cw(), Rotation::Right);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(DEFAULT_GRID_WIDTH, 10);
//! assert_eq!(DEFAULT_GRID_HEIGHT, 20);
//! ```

pub mod config;

pub use config::{
    ConfigError, GameConfig, GridConfig, InputConfig, RandomizerKind, ScoringConfig, SpeedConfig,
};

use serde::{Deserialize, Serialize};

/// Default grid width in cells
pub const DEFAULT_GRID_WIDTH: u8 = 10;

/// Default grid height in cells
pub const DEFAULT_GRID_HEIGHT: u8 = 20;

/// Smallest accepted grid side (the I piece must fit lying down and standing up)
pub const MIN_GRID_SIDE: u8 = 4;

/// Largest accepted grid side
pub const MAX_GRID_SIDE: u8 = 64;

/// Gravity interval at level 1
pub const DEFAULT_INITIAL_INTERVAL_MS: u32 = 1000;

/// Base of the exponential speed curve (lower = faster)
pub const DEFAULT_SPEED_FACTOR: f64 = 0.7;

/// Amount the speed factor shrinks per level
pub const DEFAULT_LEVEL_ADJUSTMENT: f64 = 0.015;

/// Gravity never gets faster than this
pub const DEFAULT_MINIMUM_INTERVAL_MS: u32 = 100;

/// Base points for each cleared line (multiplied by level)
pub const DEFAULT_POINTS_PER_LINE: u32 = 100;

/// Multiplier applied when exactly four rows clear at once
pub const DEFAULT_TETRIS_MULTIPLIER: f64 = 4.0;

/// Extra multiplier for a Tetris that follows another Tetris
pub const DEFAULT_BACK_TO_BACK_MULTIPLIER: f64 = 1.5;

/// Lines needed to advance one level
pub const DEFAULT_LINES_PER_LEVEL: u32 = 10;

/// Points per cell for a player-issued soft drop
pub const DEFAULT_SOFT_DROP_POINTS: u32 = 1;

/// Points per cell for a hard drop
pub const DEFAULT_HARD_DROP_POINTS: u32 = 2;

/// Points per combo step after the first clear in a chain
pub const DEFAULT_COMBO_POINTS: u32 = 50;

/// Held key: delay before the first automatic repeat
pub const DEFAULT_REPEAT_DELAY_MS: u32 = 150;

/// Held key: interval between automatic repeats
pub const DEFAULT_REPEAT_INTERVAL_MS: u32 = 50;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrion_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Color tag as `0xRRGGBB`
    ///
    /// ```
    /// use tetrion_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.color(), 0x00f0f0);
    /// ```
    pub fn color(&self) -> u32 {
        match self {
            PieceKind::I => 0x00f0f0,
            PieceKind::O => 0xf0f000,
            PieceKind::T => 0xa000f0,
            PieceKind::S => 0x00f000,
            PieceKind::Z => 0xf00000,
            PieceKind::J => 0x0000f0,
            PieceKind::L => 0xf0a000,
        }
    }

    /// Index into [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// Rotation states, numbered 0..=3 clockwise
///
/// - **Spawn** (0): orientation a piece enters the grid with
/// - **Right** (1): rotated 90° clockwise
/// - **Reverse** (2): rotated 180°
/// - **Left** (3): rotated 90° counter-clockwise
///
/// The cycle is closed: four turns in the same direction return to the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    Spawn,
    Right,
    Reverse,
    Left,
}

impl Rotation {
    /// Rotation for a state index (taken modulo 4)
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::Spawn,
            1 => Rotation::Right,
            2 => Rotation::Reverse,
            _ => Rotation::Left,
        }
    }

    /// State index 0..=3
    pub fn index(&self) -> u8 {
        match self {
            Rotation::Spawn => 0,
            Rotation::Right => 1,
            Rotation::Reverse => 2,
            Rotation::Left => 3,
        }
    }

    /// Rotate by `direction` quarter turns (`+1` clockwise, `-1` counter-clockwise)
    ///
    /// Computes `(current + direction + 4) mod 4`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrion_types::Rotation;
    ///
    /// assert_eq!(Rotation::Spawn.turn(1), Rotation::Right);
    /// assert_eq!(Rotation::Spawn.turn(-1), Rotation::Left);
    /// ```
    pub fn turn(&self, direction: i8) -> Self {
        let next = (self.index() as i16 + direction as i16).rem_euclid(4);
        Self::from_index(next as u8)
    }

    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        self.turn(1)
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        self.turn(-1)
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::Spawn => "spawn",
            Rotation::Right => "right",
            Rotation::Reverse => "reverse",
            Rotation::Left => "left",
        }
    }
}

/// Game actions that can be applied to the state machine
///
/// Hosts issue these directly or through the input controller, which turns
/// held keys into repeated actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (soft drop scoring; locks when blocked)
    SoftDrop,
    /// Instantly drop piece to its resting row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per piece)
    Hold,
    /// Toggle pause state
    Pause,
    /// Reinitialize the game
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrion_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateccw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" | "movedown" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" | "reset" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Filled; the kind doubles as the cell's color/material tag
pub type Cell = Option<PieceKind>;
