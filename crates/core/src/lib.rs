//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules, the state machine and every calculation the
//! game needs. It has **no dependencies** on terminals, audio or clocks: time
//! comes in as a monotonic millisecond timestamp and side effects go out as
//! [`GameEvent`]s to registered observers.
//!
//! # Module Structure
//!
//! - [`grid`]: playfield of cells with full-row detection and removal
//! - [`pieces`]: tetromino shape table, spawn placement and the kick list
//! - [`collision`]: placement queries against the grid
//! - [`rng`]: seeded uniform and 7-bag piece generation
//! - [`scoring`]: line, combo and drop points, levels and gravity speed
//! - [`events`]: events and the observer seam
//! - [`game_state`]: the real-time state machine
//! - [`snapshot`]: serializable read-only views
//!
//! # Example
//!
//! ```
//! use tetrion_core::GameState;
//! use tetrion_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop awards two points per row fallen.
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::update`] with the current time. The piece falls one row
//! each time a full drop interval has elapsed; the interval starts at 1000ms
//! and shrinks with every level down to a 100ms floor.

pub mod collision;
pub mod events;
pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetrion_types as types;

// Re-export commonly used types for convenience
pub use collision::{drop_position, is_colliding};
pub use events::{EventLog, GameEvent, GameObserver};
pub use game_state::{GamePhase, GameState};
pub use grid::{Grid, GridError};
pub use pieces::{get_kicks, get_shape, Tetromino};
pub use rng::{Randomizer, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_score, get_drop_interval_ms, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
