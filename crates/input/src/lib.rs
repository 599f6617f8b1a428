//! Input module (engine-facing).
//!
//! Independent of any UI framework apart from the `crossterm` key mapping. The
//! [`InputController`] turns key-down/key-up transitions into timed repeat
//! actions for the state machine; [`map`] translates terminal key events into
//! those transitions.

pub mod controller;
pub mod map;

pub use tetrion_types as types;

pub use controller::{InputController, Key};
pub use map::{handle_key_event, map_key_code, should_quit, KeyTransition};
