//! Terminal key events through the controller into a session

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use tetrion::engine::Session;
use tetrion::input::{handle_key_event, InputController, Key, KeyTransition};
use tetrion::types::{GameAction, InputConfig, PieceKind};

fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
    KeyEvent::new_with_kind_and_state(code, KeyModifiers::NONE, kind, KeyEventState::NONE)
}

fn session() -> Session {
    let mut session = Session::new(11);
    session.state_mut().enqueue_pieces(&[PieceKind::T, PieceKind::O, PieceKind::I]);
    session.start();
    session.update(0);
    session
}

#[test]
fn test_terminal_repeat_events_do_not_double_fire() {
    let mut session = session();
    let press = handle_key_event(event(KeyCode::Char(' '), KeyEventKind::Press)).unwrap();
    let repeat = handle_key_event(event(KeyCode::Char(' '), KeyEventKind::Repeat)).unwrap();
    assert_eq!(press, KeyTransition::Down(Key::HardDrop));
    assert_eq!(repeat, press);

    assert!(session.handle_transition(press, 0));
    assert!(!session.handle_transition(repeat, 30));
    assert_eq!(session.state().current().unwrap().kind, PieceKind::O);

    let release = handle_key_event(event(KeyCode::Char(' '), KeyEventKind::Release)).unwrap();
    assert!(!session.handle_transition(release, 40));
    assert!(session.handle_transition(press, 50));
    assert_eq!(session.state().current().unwrap().kind, PieceKind::I);
}

#[test]
fn test_arrow_hold_walks_to_the_wall() {
    let mut session = session();
    let left = handle_key_event(event(KeyCode::Left, KeyEventKind::Press)).unwrap();
    session.handle_transition(left, 0);

    let mut now = 0;
    while now < 400 {
        now += 10;
        session.update(now);
    }
    // The press and the repeats at 150 and 200 ms reach x = 0; later repeats hit the wall.
    assert_eq!(session.state().current().unwrap().x, 0);
}

#[test]
fn test_release_timeout_for_terminals_without_key_up() {
    let mut session = session().with_key_release_timeout_ms(120);
    let right = handle_key_event(event(KeyCode::Right, KeyEventKind::Press)).unwrap();
    session.handle_transition(right, 0);
    assert!(session.input().is_held(Key::Right));

    session.update(200);
    assert!(!session.input().is_held(Key::Right));
    assert_eq!(session.state().current().unwrap().x, 4);
}

#[test]
fn test_controller_config_from_rules() {
    let mut ic = InputController::with_config(InputConfig {
        repeat_delay_ms: 300,
        repeat_interval_ms: 100,
    });
    assert_eq!(ic.key_down(Key::Down, 0), Some(GameAction::SoftDrop));
    assert!(ic.poll(299).is_empty());
    assert_eq!(ic.poll(300).as_slice(), &[GameAction::SoftDrop]);
    assert!(ic.poll(399).is_empty());
    assert_eq!(ic.poll(400).as_slice(), &[GameAction::SoftDrop]);
}
