//! Events emitted by the state machine to its collaborators
//!
//! Renderers, audio and UI layers implement [`GameObserver`] and are handed to
//! the game at construction. Events are delivered synchronously, in the order
//! the state changes happen: a lock is always reported before the line clear it
//! caused, and both before the next piece spawns.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use tetrion_types::PieceKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// A piece was written into the grid
    PieceLocked {
        kind: PieceKind,
        cells: [(i8, i8); 4],
    },
    /// Full rows were removed
    LinesCleared {
        count: u32,
        /// Row indices before removal, ascending
        rows: Vec<usize>,
        points: u32,
        combo: u32,
        back_to_back: bool,
        perfect_clear: bool,
    },
    LevelUp {
        old_level: u32,
        new_level: u32,
    },
    GameOver {
        final_score: u32,
    },
    /// The current piece moved by one step (player or gravity)
    Moved { dx: i8, dy: i8 },
    Rotated { direction: i8 },
    HardDropped { cells: u32 },
    /// The current piece went to the hold slot
    Held { kind: PieceKind },
    PauseToggled { paused: bool },
    Reset,
}

impl GameEvent {
    /// Short stable name, handy for log lines
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PieceLocked { .. } => "piece_locked",
            GameEvent::LinesCleared { .. } => "lines_cleared",
            GameEvent::LevelUp { .. } => "level_up",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::Moved { .. } => "moved",
            GameEvent::Rotated { .. } => "rotated",
            GameEvent::HardDropped { .. } => "hard_dropped",
            GameEvent::Held { .. } => "held",
            GameEvent::PauseToggled { .. } => "pause_toggled",
            GameEvent::Reset => "reset",
        }
    }
}

/// Receiver of game events
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

/// Recording observer; clones share one log
///
/// ```
/// use tetrion_core::{EventLog, GameState};
///
/// let log = EventLog::new();
/// let mut game = GameState::new(7);
/// game.add_observer(Box::new(log.clone()));
/// game.start();
/// game.hard_drop();
/// assert!(log.take().iter().any(|e| e.name() == "piece_locked"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
