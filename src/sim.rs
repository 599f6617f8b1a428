//! Headless simulation: a deterministic autoplayer driving a [`Session`] with
//! synthetic frame timestamps.
//!
//! The autoplayer picks a placement for each piece by trying every rotation
//! and column, then plays it through the same key path a human would use:
//! taps rotate, taps move, a final tap hard-drops. Gravity keeps running in
//! between, so a slow placement can still be cut short by the floor.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::core::{
    drop_position, get_shape, is_colliding, EventLog, GameEvent, GameObserver, GameSnapshot,
    GameState, Grid,
};
use crate::engine::Session;
use crate::input::Key;
use crate::types::GameConfig;

/// Synthetic frame length (about 60 frames per second)
pub const FRAME_MS: u64 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimOptions {
    pub seed: u32,
    /// Stop after this many locked pieces (or at game over)
    pub pieces: u32,
    pub config_path: Option<PathBuf>,
    pub json: bool,
    pub verbose: bool,
    pub help: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            seed: 1,
            pieces: 100,
            config_path: None,
            json: false,
            verbose: false,
            help: false,
        }
    }
}

pub const USAGE: &str = "usage: tetrion [--seed N] [--pieces N] [--config PATH] [--json] [--verbose]";

pub fn parse_sim_args(args: &[String]) -> Result<SimOptions> {
    let mut opts = SimOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                opts.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--pieces" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --pieces"))?;
                opts.pieces = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --pieces value: {}", v))?;
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                opts.config_path = Some(PathBuf::from(v));
            }
            "--json" => opts.json = true,
            "--verbose" | "-v" => opts.verbose = true,
            "--help" | "-h" => opts.help = true,
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(opts)
}

/// Parse a (possibly partial) JSON rule set and validate it
pub fn parse_game_config(text: &str) -> Result<GameConfig> {
    let config: GameConfig = serde_json::from_str(text).context("config: malformed JSON")?;
    config
        .validate()
        .map_err(|e| anyhow!("config: {} ({})", e, e.code()))?;
    Ok(config)
}

pub fn load_game_config(path: &Path) -> Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("config: cannot read {}", path.display()))?;
    parse_game_config(&text)
}

/// Observer printing `[Game]` lines to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLog {
    verbose: bool,
}

impl ConsoleLog {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl GameObserver for ConsoleLog {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::LinesCleared {
                count,
                points,
                combo,
                back_to_back,
                perfect_clear,
                ..
            } => {
                eprintln!(
                    "[Game] cleared {} line(s) for {} points (combo {}, b2b {}, perfect {})",
                    count, points, combo, back_to_back, perfect_clear
                );
            }
            GameEvent::LevelUp {
                old_level,
                new_level,
            } => {
                eprintln!("[Game] level {} -> {}", old_level, new_level);
            }
            GameEvent::GameOver { final_score } => {
                eprintln!("[Game] game over, final score {}", final_score);
            }
            GameEvent::Reset => eprintln!("[Game] reset"),
            GameEvent::PauseToggled { paused } => eprintln!("[Game] paused: {}", paused),
            other if self.verbose => {
                eprintln!("[Game] {}: {:?}", other.name(), other);
            }
            _ => {}
        }
    }
}

/// Placement chosen by the autoplayer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Clockwise quarter turns from the current rotation
    pub turns: u8,
    pub x: i8,
}

/// Best resting placement for the current piece, if it has one
pub fn choose_placement(state: &GameState) -> Option<Placement> {
    let piece = state.current()?;
    let grid = state.grid();
    let mut best: Option<(f64, Placement)> = None;

    for turns in 0..4u8 {
        let shape = get_shape(piece.kind, piece.rotation.turn(turns as i8));
        'columns: for x in -3..grid.width() as i8 {
            if is_colliding(grid, x, piece.y, &shape) {
                continue;
            }
            let landing = drop_position(grid, x, piece.y, &shape);
            if shape.iter().any(|&(_, dy)| landing + dy < 0) {
                continue;
            }

            let mut after = grid.clone();
            for &(dx, dy) in &shape {
                if after.set_cell(x + dx, landing + dy, Some(piece.kind)).is_err() {
                    continue 'columns;
                }
            }
            let cleared = after.find_full_rows();
            after.remove_rows(&cleared);

            let value = evaluate(&after, cleared.len());
            if best.map_or(true, |(v, _)| value > v) {
                best = Some((value, Placement { turns, x }));
            }
        }
    }

    best.map(|(_, placement)| placement)
}

/// Heuristic value of a grid: fewer holes, lower and flatter is better
fn evaluate(grid: &Grid, cleared: usize) -> f64 {
    let width = grid.width() as i8;
    let height = grid.height() as i8;
    let mut heights = Vec::with_capacity(width as usize);
    let mut holes = 0u32;

    for x in 0..width {
        let top = (0..height).find(|&y| grid.is_occupied(x, y));
        let column_height = top.map_or(0, |y| height - y);
        heights.push(column_height as f64);
        if let Some(top) = top {
            holes += (top..height).filter(|&y| !grid.is_occupied(x, y)).count() as u32;
        }
    }

    let aggregate: f64 = heights.iter().sum();
    let bumpiness: f64 = heights.windows(2).map(|w| (w[0] - w[1]).abs()).sum();

    -0.51 * aggregate + 0.76 * cleared as f64 - 0.36 * holes as f64 - 0.18 * bumpiness
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimReport {
    pub seed: u32,
    pub pieces_locked: u32,
    pub frames: u64,
    pub elapsed_ms: u64,
    pub snapshot: GameSnapshot,
}

struct Driver {
    session: Session,
    log: EventLog,
    now_ms: u64,
    frames: u64,
    locked: u32,
}

impl Driver {
    fn count_locks(&mut self) {
        let locks = self
            .log
            .take()
            .iter()
            .filter(|e| matches!(e, GameEvent::PieceLocked { .. }))
            .count();
        self.locked += locks as u32;
    }

    fn frame(&mut self) {
        self.now_ms += FRAME_MS;
        self.frames += 1;
        self.session.update(self.now_ms);
        self.count_locks();
    }

    /// Press and release `key`, then run one frame
    fn tap(&mut self, key: Key) -> bool {
        let applied = self.session.key_down(key, self.now_ms);
        self.session.key_up(key);
        self.count_locks();
        self.frame();
        applied
    }

    fn play_piece(&mut self) {
        let start = self.locked;
        let Some(target) = choose_placement(self.session.state()) else {
            self.tap(Key::HardDrop);
            return;
        };

        for _ in 0..target.turns {
            if self.locked != start {
                return;
            }
            self.tap(Key::RotateCw);
        }

        let width = self.session.state().grid().width();
        for _ in 0..width {
            if self.locked != start {
                return;
            }
            let Some(piece) = self.session.state().current() else {
                return;
            };
            let key = match piece.x.cmp(&target.x) {
                std::cmp::Ordering::Less => Key::Right,
                std::cmp::Ordering::Greater => Key::Left,
                std::cmp::Ordering::Equal => break,
            };
            if !self.tap(key) {
                break;
            }
        }

        if self.locked == start {
            self.tap(Key::HardDrop);
        }
    }
}

/// Play a seeded game until `opts.pieces` pieces lock or the game ends
pub fn run_sim(opts: &SimOptions) -> Result<SimReport> {
    let config = match &opts.config_path {
        Some(path) => load_game_config(path)?,
        None => GameConfig::default(),
    };
    let mut session = Session::with_config(config, opts.seed)
        .map_err(|e| anyhow!("config: {} ({})", e, e.code()))?;
    session.add_observer(Box::new(ConsoleLog::new(opts.verbose)));
    let log = EventLog::new();
    session.add_observer(Box::new(log.clone()));
    session.start();

    let mut driver = Driver {
        session,
        log,
        now_ms: 0,
        frames: 0,
        locked: 0,
    };
    // Arm the fall clock.
    driver.session.update(0);

    while driver.locked < opts.pieces && !driver.session.state().game_over() {
        driver.play_piece();
    }

    Ok(SimReport {
        seed: opts.seed,
        pieces_locked: driver.locked,
        frames: driver.frames,
        elapsed_ms: driver.now_ms,
        snapshot: driver.session.state().snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_sim_args() {
        let opts = parse_sim_args(&args(&["--seed", "9", "--pieces", "20", "--json"])).unwrap();
        assert_eq!(opts.seed, 9);
        assert_eq!(opts.pieces, 20);
        assert!(opts.json);
        assert!(opts.config_path.is_none());

        assert_eq!(parse_sim_args(&[]).unwrap(), SimOptions::default());
    }

    #[test]
    fn test_parse_sim_args_errors() {
        assert!(parse_sim_args(&args(&["--seed"])).is_err());
        assert!(parse_sim_args(&args(&["--pieces", "many"])).is_err());
        assert!(parse_sim_args(&args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_game_config(r#"{"grid": {"width": 8}, "randomizer": "bag7"}"#).unwrap();
        assert_eq!(config.grid.width, 8);
        assert_eq!(config.grid.height, 20);
        assert_eq!(config.speed.initial_interval_ms, 1000);

        assert!(parse_game_config(r#"{"grid": {"width": 2}}"#).is_err());
        assert!(parse_game_config("not json").is_err());
    }

    #[test]
    fn test_choose_placement_prefers_completing_a_line() {
        let mut state = GameState::new(3);
        let grid = Grid::from_rows(Default::default(), &["ZZZZZZ..ZZ"]).unwrap();
        state.load_grid(grid).unwrap();
        state.enqueue_pieces(&[PieceKind::O]);
        state.start();

        let placement = choose_placement(&state).unwrap();
        assert_eq!(placement.x, 6);
    }

    #[test]
    fn test_sim_is_deterministic() {
        let opts = SimOptions {
            seed: 77,
            pieces: 25,
            ..SimOptions::default()
        };
        let a = run_sim(&opts).unwrap();
        let b = run_sim(&opts).unwrap();
        assert_eq!(a.snapshot, b.snapshot);
        assert_eq!(a.frames, b.frames);
        assert!(a.pieces_locked <= 25);
        assert!(a.pieces_locked == 25 || a.snapshot.over);
    }
}
