//! Frame driver: routes key transitions through the repeat controller into
//! the state machine and advances gravity.
//!
//! Everything runs on the caller's thread. Key handlers and [`Session::update`]
//! are meant to be called from the same loop, so a command and a gravity tick
//! never interleave.

use tetrion_core::{GameObserver, GameState};
use tetrion_input::{InputController, Key, KeyTransition};
use tetrion_types::{ConfigError, GameAction, GameConfig};

#[derive(Debug)]
pub struct Session {
    state: GameState,
    input: InputController,
}

impl Session {
    pub fn new(seed: u32) -> Self {
        Self {
            state: GameState::new(seed),
            input: InputController::new(),
        }
    }

    pub fn with_config(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        let state = GameState::with_config(config, seed)?;
        Ok(Self {
            state,
            input: InputController::with_config(config.input),
        })
    }

    /// Release keys after this long without a key event (terminals that
    /// never report key-up)
    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.input = self.input.with_key_release_timeout_ms(timeout_ms);
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.state.add_observer(observer);
    }

    pub fn start(&mut self) {
        self.state.start();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    /// Key pressed (or auto-repeated by the source); returns whether an action applied
    pub fn key_down(&mut self, key: Key, now_ms: u64) -> bool {
        match self.input.key_down(key, now_ms) {
            Some(action) => self.apply(action),
            None => false,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    pub fn handle_transition(&mut self, transition: KeyTransition, now_ms: u64) -> bool {
        match transition {
            KeyTransition::Down(key) => self.key_down(key, now_ms),
            KeyTransition::Up(key) => {
                self.key_up(key);
                false
            }
        }
    }

    fn apply(&mut self, action: GameAction) -> bool {
        let applied = self.state.apply_action(action);
        if action == GameAction::Restart {
            self.input.release_repeating();
        }
        applied
    }

    /// One frame: gravity first, then held-key repeats
    ///
    /// Returns the number of repeat actions that applied.
    pub fn update(&mut self, now_ms: u64) -> usize {
        self.state.update(now_ms);
        let repeats = self.input.poll(now_ms);
        repeats
            .into_iter()
            .filter(|&action| self.state.apply_action(action))
            .count()
    }
}
