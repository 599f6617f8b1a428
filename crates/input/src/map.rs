//! Key mapping from terminal events to logical keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::Key;

/// A key going down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Down(Key),
    Up(Key),
}

/// Map a key code to a logical key.
pub fn map_key_code(code: KeyCode) -> Option<Key> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Key::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Key::Right)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Key::Down)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Key::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Key::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(Key::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Key::Hold),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(Key::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Restart),

        _ => None,
    }
}

/// Translate a terminal key event into a key transition.
///
/// Press and auto-repeat events both become `Down`; the controller drops the
/// repeats. Terminals that never report releases need the controller's
/// key-release timeout.
pub fn handle_key_event(event: KeyEvent) -> Option<KeyTransition> {
    if should_quit(event) {
        return None;
    }
    let key = map_key_code(event.code)?;
    match event.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => Some(KeyTransition::Down(key)),
        KeyEventKind::Release => Some(KeyTransition::Up(key)),
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
