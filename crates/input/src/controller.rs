//! Key-repeat controller
//!
//! Turns raw key-down/key-up transitions into game actions. Directional keys
//! fire once on press, again after the repeat delay, then every repeat
//! interval while held. Every other key is edge-triggered: one action per
//! physical press, with source auto-repeat ignored until the key goes up.
//!
//! Time is passed in as monotonic milliseconds so the controller stays
//! deterministic and testable without a clock.

use arrayvec::ArrayVec;

use crate::types::{GameAction, InputConfig};

/// Logical game key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Down,
    RotateCw,
    RotateCcw,
    HardDrop,
    Hold,
    Pause,
    Restart,
}

impl Key {
    pub const ALL: [Key; 9] = [
        Key::Left,
        Key::Right,
        Key::Down,
        Key::RotateCw,
        Key::RotateCcw,
        Key::HardDrop,
        Key::Hold,
        Key::Pause,
        Key::Restart,
    ];

    pub fn action(self) -> GameAction {
        match self {
            Key::Left => GameAction::MoveLeft,
            Key::Right => GameAction::MoveRight,
            Key::Down => GameAction::SoftDrop,
            Key::RotateCw => GameAction::RotateCw,
            Key::RotateCcw => GameAction::RotateCcw,
            Key::HardDrop => GameAction::HardDrop,
            Key::Hold => GameAction::Hold,
            Key::Pause => GameAction::Pause,
            Key::Restart => GameAction::Restart,
        }
    }

    /// Whether holding the key repeats its action
    pub fn repeats(self) -> bool {
        matches!(self, Key::Left | Key::Right | Key::Down)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-key timing state
#[derive(Debug, Clone, Copy, Default)]
struct KeyState {
    held: bool,
    /// Last time the key fired (press or repeat)
    last_trigger_ms: u64,
    /// Set once the first repeat has fired; later repeats use the interval
    repeating: bool,
    /// Last key-down seen from the source, auto-repeats included
    last_seen_ms: u64,
    /// Press order, used to pick between left and right
    press_seq: u64,
}

/// Tracks held keys and produces timed repeats
#[derive(Debug, Clone)]
pub struct InputController {
    keys: [KeyState; 9],
    repeat_delay_ms: u64,
    repeat_interval_ms: u64,
    /// Release keys not seen for this long (sources without key-up events)
    key_release_timeout_ms: Option<u64>,
    seq: u64,
}

impl InputController {
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            keys: [KeyState::default(); 9],
            repeat_delay_ms: config.repeat_delay_ms as u64,
            repeat_interval_ms: config.repeat_interval_ms as u64,
            key_release_timeout_ms: None,
            seq: 0,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys[key.index()].held
    }

    /// Register a key-down; returns the action to fire now, if any
    ///
    /// A key-down for a key that is already held is source auto-repeat and
    /// fires nothing.
    pub fn key_down(&mut self, key: Key, now_ms: u64) -> Option<GameAction> {
        let state = &mut self.keys[key.index()];
        state.last_seen_ms = now_ms;
        if state.held {
            return None;
        }

        self.seq += 1;
        *state = KeyState {
            held: true,
            last_trigger_ms: now_ms,
            repeating: false,
            last_seen_ms: now_ms,
            press_seq: self.seq,
        };
        Some(key.action())
    }

    /// Register a key-up; the next press starts fresh
    pub fn key_up(&mut self, key: Key) {
        self.keys[key.index()] = KeyState::default();
    }

    /// Repeats due at `now_ms`
    ///
    /// Each held directional key fires at most once per poll. When both left
    /// and right are held, only the most recently pressed one repeats.
    pub fn poll(&mut self, now_ms: u64) -> ArrayVec<GameAction, 4> {
        let mut actions = ArrayVec::<GameAction, 4>::new();

        if let Some(timeout) = self.key_release_timeout_ms {
            for key in Key::ALL {
                let state = self.keys[key.index()];
                if state.held && now_ms.saturating_sub(state.last_seen_ms) > timeout {
                    self.key_up(key);
                }
            }
        }

        let left = self.keys[Key::Left.index()];
        let right = self.keys[Key::Right.index()];
        let horizontal = match (left.held, right.held) {
            (true, true) if right.press_seq > left.press_seq => Some(Key::Right),
            (true, _) => Some(Key::Left),
            (false, true) => Some(Key::Right),
            (false, false) => None,
        };

        for key in horizontal.into_iter().chain(Some(Key::Down)) {
            if self.fire_repeat(key, now_ms) {
                let _ = actions.try_push(key.action());
            }
        }

        actions
    }

    fn fire_repeat(&mut self, key: Key, now_ms: u64) -> bool {
        let state = &mut self.keys[key.index()];
        if !state.held {
            return false;
        }
        let threshold = if state.repeating {
            self.repeat_interval_ms
        } else {
            self.repeat_delay_ms
        };
        if now_ms.saturating_sub(state.last_trigger_ms) < threshold {
            return false;
        }
        state.last_trigger_ms = now_ms;
        state.repeating = true;
        true
    }

    /// Release every key
    pub fn reset(&mut self) {
        self.keys = [KeyState::default(); 9];
    }

    /// Release the repeating keys only; edge keys stay latched until key-up
    pub fn release_repeating(&mut self) {
        for key in [Key::Left, Key::Right, Key::Down] {
            self.key_up(key);
        }
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}
