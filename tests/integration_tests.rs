//! Integration tests for the game loop

use tetrion::core::scoring::calculate_line_clear_points;
use tetrion::core::{EventLog, GameEvent, GamePhase, GameState, Grid};
use tetrion::engine::Session;
use tetrion::input::Key;
use tetrion::types::{GameAction, GameConfig, GridConfig, PieceKind, RandomizerKind, ScoringConfig};

fn started(kinds: &[PieceKind], rows: &[&str]) -> (GameState, EventLog) {
    let log = EventLog::new();
    let mut state = GameState::new(12345).with_observer(Box::new(log.clone()));
    state
        .load_grid(Grid::from_rows(GridConfig::default(), rows).unwrap())
        .unwrap();
    state.enqueue_pieces(kinds);
    state.start();
    (state, log)
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.phase(), GamePhase::Idle);

    state.start();
    assert_eq!(state.phase(), GamePhase::Falling);
    assert!(state.current().is_some());
    assert!(state.next_piece().is_some());
    assert!(!state.game_over());
    assert!(!state.paused());
}

#[test]
fn test_tetris_base_points() {
    assert_eq!(calculate_line_clear_points(4, 1, false, &ScoringConfig::default()), 1600);
}

#[test]
fn test_single_row_scenario() {
    let (mut state, log) = started(&[PieceKind::I, PieceKind::T], &["ZZZ....ZZZ"]);
    let drop_cells = (state.ghost_y().unwrap() - state.current().unwrap().y) as u32;

    assert!(state.apply_action(GameAction::HardDrop));

    assert_eq!(state.lines(), 1);
    assert_eq!(state.level(), 1);
    assert_eq!(state.score(), 100 + 2 * drop_cells);
    assert!(state.grid().is_empty());

    let events = log.take();
    let kinds: Vec<&str> = events.iter().map(|e| e.name()).collect();
    assert_eq!(kinds, vec!["hard_dropped", "piece_locked", "lines_cleared"]);
    match &events[2] {
        GameEvent::LinesCleared {
            count,
            rows,
            perfect_clear,
            ..
        } => {
            assert_eq!(*count, 1);
            assert_eq!(rows, &vec![19]);
            assert!(*perfect_clear);
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_ten_lines_reach_level_two() {
    let kinds = [PieceKind::I; 12];
    let (mut state, log) = started(&kinds, &[]);
    let level_one_interval = state.drop_interval_ms();

    // Each round: fill the bottom row except a four-wide gap, then drop an I into it.
    for _ in 0..10 {
        let mut grid = state.grid().clone();
        for x in [0, 1, 2, 7, 8, 9] {
            grid.set_cell(x, 19, Some(PieceKind::Z)).unwrap();
        }
        state.load_grid(grid).unwrap();
        state.hard_drop();
    }

    assert_eq!(state.lines(), 10);
    assert_eq!(state.level(), 2);
    assert!(state.drop_interval_ms() < level_one_interval);
    assert!(log
        .take()
        .contains(&GameEvent::LevelUp { old_level: 1, new_level: 2 }));
}

#[test]
fn test_hold_twice_leaves_state_unchanged() {
    let (mut state, _) = started(&[PieceKind::S, PieceKind::Z, PieceKind::L], &[]);
    assert!(state.hold());
    let before = state.snapshot();
    assert!(!state.hold());
    assert!(!state.apply_action(GameAction::Hold));
    assert_eq!(state.snapshot(), before);
}

#[test]
fn test_rotation_against_left_wall_never_leaves_grid() {
    for kind in PieceKind::ALL {
        for direction in [1i8, -1] {
            let (mut state, _) = started(&[kind], &[]);
            state.try_move(0, 1);
            for turn in 0..4 {
                while state.move_left() {}
                let before = state.current().unwrap();
                let rotated = state.try_rotate(direction);
                let after = state.current().unwrap();
                assert!(
                    after.cells().iter().all(|&(x, _)| x >= 0),
                    "{:?} turn {} committed a cell left of the wall",
                    kind,
                    turn
                );
                if !rotated {
                    assert_eq!(after, before);
                }
            }
        }
    }
}

#[test]
fn test_lock_above_grid_is_game_over() {
    // Column 5 filled from row 3 down.
    let rows = vec![".....Z...."; 17];
    let (mut state, log) = started(&[PieceKind::I, PieceKind::T], &rows);

    // Standing the I up in column 5 puts its top mino on row -1.
    assert!(state.rotate_cw());
    assert!(!state.game_over());

    state.update(0);
    state.update(1_000);
    assert!(state.game_over());
    // Nothing was written for the piece that ended the game.
    assert_eq!(state.grid().get(5, 0), Some(None));
    assert_eq!(state.grid().get(5, 2), Some(None));
    assert!(!state.move_left());
    assert!(!state.rotate_cw());

    let events = log.take();
    assert!(!events.iter().any(|e| e.name() == "piece_locked"));
    assert!(matches!(events.last(), Some(GameEvent::GameOver { final_score: 0 })));
}

#[test]
fn test_custom_rules_flow_through() {
    let mut config = GameConfig::default();
    config.grid = GridConfig {
        width: 12,
        height: 24,
    };
    config.scoring.points_per_line = 40;
    config.randomizer = RandomizerKind::Bag7;

    let mut state = GameState::with_config(config, 99).unwrap();
    state.start();
    assert_eq!(state.grid().width(), 12);
    assert_eq!(state.grid().height(), 24);

    // The first seven pieces come from one bag.
    let mut seen = vec![state.current().unwrap().kind];
    for _ in 0..6 {
        state.hard_drop();
        seen.push(state.current().unwrap().kind);
    }
    seen.sort_by_key(|k| k.index());
    seen.dedup();
    assert_eq!(seen.len(), 7);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed: u32| {
        let mut session = Session::new(seed);
        session.start();
        let mut now = 0;
        for i in 0..200u64 {
            let key = match i % 5 {
                0 => Key::Left,
                1 => Key::RotateCw,
                2 => Key::Right,
                3 => Key::Down,
                _ => Key::HardDrop,
            };
            session.key_down(key, now);
            session.key_up(key);
            now += 16;
            session.update(now);
        }
        session.state().snapshot()
    };
    assert_eq!(play(5), play(5));
}

#[test]
fn test_session_gravity_and_soft_drop_repeat() {
    let mut session = Session::new(7);
    session.state_mut().enqueue_pieces(&[PieceKind::O]);
    session.start();
    session.update(0);

    assert!(session.key_down(Key::Down, 0));
    assert_eq!(session.state().current().unwrap().y, 1);

    // Delay 150ms, then every 50ms: repeats at 150, 200, 250.
    let mut now = 0;
    while now < 260 {
        now += 10;
        session.update(now);
    }
    assert_eq!(session.state().current().unwrap().y, 4);
    assert_eq!(session.state().score(), 4);

    session.key_up(Key::Down);
    session.update(1_000);
    // Gravity only: one more row, no points.
    assert_eq!(session.state().current().unwrap().y, 5);
    assert_eq!(session.state().score(), 4);
}
