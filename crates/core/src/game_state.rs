//! Game state module - the real-time state machine
//!
//! This module ties together the grid, pieces, collision resolver, randomizer
//! and scoring. A game cycles through
//! `Spawning -> Falling -> Locking -> LineClearing -> Spawning`, ends in the
//! terminal `GameOver`, and can be paused at any point while falling.
//! Spawning, locking and line clearing all complete synchronously inside the
//! command or `update` call that triggers them, so between calls a game is
//! always idle, falling, paused or over (see [`GamePhase`]).
//!
//! Every state-mutating entry point checks pause and game-over first; commands
//! issued in those states are no-ops that return `false`.

use std::collections::VecDeque;
use std::fmt;

use tetrion_types::{ConfigError, GameAction, GameConfig, PieceKind};

use crate::collision::{drop_position, is_above_grid, is_colliding};
use crate::events::{GameEvent, GameObserver};
use crate::grid::Grid;
use crate::pieces::{get_kicks, get_shape, Tetromino};
use crate::rng::Randomizer;
use crate::scoring::{calculate_drop_score, calculate_level, calculate_score, get_drop_interval_ms};
use crate::snapshot::{GameSnapshot, ActiveSnapshot};

/// Coarse externally visible phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Built but not started
    Idle,
    Falling,
    Paused,
    GameOver,
}

/// Complete game state
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    randomizer: Randomizer,
    /// Host-provided kinds consumed before the randomizer
    upcoming: VecDeque<PieceKind>,
    current: Option<Tetromino>,
    next: Option<PieceKind>,
    held: Option<PieceKind>,
    can_hold: bool,
    ghost_y: Option<i8>,
    score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    back_to_back: bool,
    drop_interval_ms: u32,
    /// Timestamp of the last automatic fall; `None` until the clock is armed
    last_fall_ms: Option<u64>,
    started: bool,
    paused: bool,
    over: bool,
    observers: Vec<Box<dyn GameObserver>>,
}

impl GameState {
    /// Create a new game with the default rules and the given RNG seed
    pub fn new(seed: u32) -> Self {
        let config = GameConfig::default();
        Self::build(config, Grid::default(), seed)
    }

    /// Create a new game with custom rules
    pub fn with_config(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.grid)?;
        Ok(Self::build(config, grid, seed))
    }

    fn build(config: GameConfig, grid: Grid, seed: u32) -> Self {
        Self {
            grid,
            randomizer: Randomizer::new(config.randomizer, seed),
            upcoming: VecDeque::new(),
            current: None,
            next: None,
            held: None,
            can_hold: true,
            ghost_y: None,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            back_to_back: false,
            drop_interval_ms: get_drop_interval_ms(1, &config.speed),
            last_fall_ms: None,
            started: false,
            paused: false,
            over: false,
            observers: Vec::new(),
            config,
        }
    }

    /// Attach a collaborator that receives every [`GameEvent`]
    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Builder form of [`GameState::add_observer`]
    pub fn with_observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.add_observer(observer);
        self
    }

    /// Queue piece kinds to be dealt before any random ones
    pub fn enqueue_pieces(&mut self, kinds: &[PieceKind]) {
        self.upcoming.extend(kinds.iter().copied());
    }

    /// Replace the grid contents (puzzles, fixtures); dimensions must match
    pub fn load_grid(&mut self, grid: Grid) -> Result<(), ConfigError> {
        if grid.width() != self.grid.width() {
            return Err(ConfigError::GridWidth(grid.width()));
        }
        if grid.height() != self.grid.height() {
            return Err(ConfigError::GridHeight(grid.height()));
        }
        self.grid = grid;
        self.refresh_ghost();
        Ok(())
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> Option<Tetromino> {
        self.current
    }

    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn held_piece(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Resting row of the current piece if dropped straight down
    pub fn ghost_y(&self) -> Option<i8> {
        self.ghost_y
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.over
    }

    pub fn phase(&self) -> GamePhase {
        if self.over {
            GamePhase::GameOver
        } else if !self.started {
            GamePhase::Idle
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Falling
        }
    }

    fn playable(&self) -> bool {
        self.started && !self.paused && !self.over
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    fn draw_kind(&mut self) -> PieceKind {
        match self.upcoming.pop_front() {
            Some(kind) => kind,
            None => self.randomizer.draw(),
        }
    }

    fn refresh_ghost(&mut self) {
        self.ghost_y = self
            .current
            .map(|p| drop_position(&self.grid, p.x, p.y, &p.shape()));
    }

    fn collides(&self, piece: &Tetromino) -> bool {
        is_colliding(&self.grid, piece.x, piece.y, &piece.shape())
    }

    /// Promote the next piece to current and deal a new next piece
    ///
    /// Returns `false` (and ends the game) when the new piece is blocked at
    /// its spawn position.
    pub(crate) fn spawn_piece(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.draw_kind(),
        };
        let next = self.draw_kind();
        self.next = Some(next);

        let piece = Tetromino::new(kind, self.grid.width());
        self.current = Some(piece);
        self.can_hold = true;
        self.refresh_ghost();

        if self.collides(&piece) {
            self.end_game();
            return false;
        }
        true
    }

    /// Try to move the current piece
    ///
    /// A blocked downward move lands the piece and locks it. Returns whether
    /// the piece moved.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let moved = Tetromino {
            x: piece.x + dx,
            y: piece.y + dy,
            ..piece
        };
        if !self.collides(&moved) {
            self.current = Some(moved);
            self.refresh_ghost();
            self.emit(GameEvent::Moved { dx, dy });
            return true;
        }

        if dy > 0 {
            self.lock_piece();
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Player soft drop: one row down, scored per cell
    pub fn move_down(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if moved {
            self.score = self
                .score
                .saturating_add(calculate_drop_score(1, false, &self.config.scoring));
        }
        moved
    }

    /// Try to rotate the current piece, falling back to the kick list
    ///
    /// `direction` is `+1` for clockwise and `-1` for counter-clockwise. The
    /// first kick offset that clears collision is applied; if none does, the
    /// piece is left untouched.
    pub fn try_rotate(&mut self, direction: i8) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let to = piece.rotated(direction);
        let blocks = get_shape(piece.kind, to);

        let offset = if !is_colliding(&self.grid, piece.x, piece.y, &blocks) {
            Some((0, 0))
        } else {
            get_kicks(piece.rotation, to)
                .iter()
                .copied()
                .find(|&(kx, ky)| !is_colliding(&self.grid, piece.x + kx, piece.y + ky, &blocks))
        };
        let Some((kx, ky)) = offset else {
            return false;
        };

        self.current = Some(Tetromino {
            rotation: to,
            x: piece.x + kx,
            y: piece.y + ky,
            ..piece
        });
        self.refresh_ghost();
        self.emit(GameEvent::Rotated { direction });
        true
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(1)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(-1)
    }

    /// Drop the current piece to its resting row and lock it immediately
    pub fn hard_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let landing = drop_position(&self.grid, piece.x, piece.y, &piece.shape());
        let cells = (landing - piece.y) as u32;
        self.current = Some(Tetromino { y: landing, ..piece });
        self.score = self
            .score
            .saturating_add(calculate_drop_score(cells, true, &self.config.scoring));
        self.emit(GameEvent::HardDropped { cells });

        self.lock_piece();
        true
    }

    /// Swap the current piece with the hold slot (once per piece)
    pub fn hold(&mut self) -> bool {
        if !self.playable() || !self.can_hold {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let incoming = match self.held.replace(piece.kind) {
            Some(kind) => kind,
            None => {
                let kind = match self.next.take() {
                    Some(kind) => kind,
                    None => self.draw_kind(),
                };
                let next = self.draw_kind();
                self.next = Some(next);
                kind
            }
        };

        let fresh = Tetromino::new(incoming, self.grid.width());
        self.current = Some(fresh);
        self.can_hold = false;
        self.refresh_ghost();
        self.emit(GameEvent::Held { kind: piece.kind });

        if self.collides(&fresh) {
            self.end_game();
        }
        true
    }

    /// Lock the current piece into the grid, clear lines and spawn the next one
    ///
    /// A piece with any mino above the grid ends the game without being written.
    pub fn lock_piece(&mut self) {
        if !self.playable() {
            return;
        }
        let Some(piece) = self.current else {
            return;
        };

        if is_above_grid(piece.y, &piece.shape()) {
            self.end_game();
            return;
        }

        let cells = piece.cells();
        for &(x, y) in &cells {
            if let Err(err) = self.grid.set_cell(x, y, Some(piece.kind)) {
                panic!("locked piece {:?} escaped the grid: {}", piece.kind, err);
            }
        }
        self.current = None;
        self.ghost_y = None;
        self.emit(GameEvent::PieceLocked {
            kind: piece.kind,
            cells,
        });

        self.clear_lines();
        self.spawn_piece();
    }

    /// Remove full rows and update score, combo, lines and level
    ///
    /// Returns the number of rows cleared.
    pub(crate) fn clear_lines(&mut self) -> u32 {
        let rows = self.grid.find_full_rows();
        if rows.is_empty() {
            self.combo = 0;
            return 0;
        }

        let count = rows.len() as u32;
        self.combo += 1;
        let result = calculate_score(
            count,
            self.level,
            self.combo,
            self.back_to_back,
            &self.config.scoring,
        );
        self.score = self.score.saturating_add(result.total);

        self.grid.remove_rows(&rows);
        self.lines += count;
        self.back_to_back = result.is_tetris;

        let perfect_clear = self.grid.is_empty();
        self.emit(GameEvent::LinesCleared {
            count,
            rows,
            points: result.total,
            combo: self.combo,
            back_to_back: result.b2b_applied,
            perfect_clear,
        });

        self.update_level();
        count
    }

    fn update_level(&mut self) {
        let new_level = calculate_level(self.lines, &self.config.scoring);
        if new_level > self.level {
            let old_level = self.level;
            self.level = new_level;
            self.drop_interval_ms = get_drop_interval_ms(new_level, &self.config.speed);
            self.emit(GameEvent::LevelUp {
                old_level,
                new_level,
            });
        }
    }

    fn end_game(&mut self) {
        if self.over {
            return;
        }
        self.over = true;
        let final_score = self.score;
        self.emit(GameEvent::GameOver { final_score });
    }

    /// Advance the automatic fall clock to `now_ms`
    ///
    /// The first call after start, reset or resume only arms the clock. After
    /// that, once a full drop interval has elapsed the piece falls one row (or
    /// locks) and the clock restarts at `now_ms`, so a long stall never turns
    /// into a burst of catch-up falls. Returns whether a fall was attempted.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(last) = self.last_fall_ms else {
            self.last_fall_ms = Some(now_ms);
            return false;
        };

        if now_ms.saturating_sub(last) < self.drop_interval_ms as u64 {
            return false;
        }
        self.try_move(0, 1);
        self.last_fall_ms = Some(now_ms);
        true
    }

    /// Pause or resume; has no effect once the game is over
    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.over {
            return false;
        }
        self.paused = !self.paused;
        if !self.paused {
            self.last_fall_ms = None;
        }
        let paused = self.paused;
        self.emit(GameEvent::PauseToggled { paused });
        true
    }

    /// Reinitialize grid and every game field, then spawn a fresh piece
    ///
    /// Observers and the random stream carry over.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.upcoming.clear();
        self.current = None;
        self.next = None;
        self.held = None;
        self.can_hold = true;
        self.ghost_y = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.back_to_back = false;
        self.drop_interval_ms = get_drop_interval_ms(1, &self.config.speed);
        self.last_fall_ms = None;
        self.paused = false;
        self.over = false;
        self.started = true;
        self.emit(GameEvent::Reset);
        self.spawn_piece();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.move_down(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Read-only copy of everything a renderer needs
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            cells: self.grid.cells().to_vec(),
            current: self.current.map(ActiveSnapshot::from),
            ghost_y: self.ghost_y,
            next: self.next,
            held: self.held,
            can_hold: self.can_hold,
            score: self.score,
            level: self.level,
            lines: self.lines,
            combo: self.combo,
            back_to_back: self.back_to_back,
            drop_interval_ms: self.drop_interval_ms,
            paused: self.paused,
            over: self.over,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("current", &self.current)
            .field("next", &self.next)
            .field("held", &self.held)
            .field("can_hold", &self.can_hold)
            .field("score", &self.score)
            .field("level", &self.level)
            .field("lines", &self.lines)
            .field("combo", &self.combo)
            .field("back_to_back", &self.back_to_back)
            .field("drop_interval_ms", &self.drop_interval_ms)
            .field("paused", &self.paused)
            .field("over", &self.over)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
