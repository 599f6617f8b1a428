//! Game configuration - immutable values handed to the engine at construction
//!
//! Every tunable of the rules lives here: grid size, the gravity curve, scoring
//! constants and key-repeat timing. A config is validated once, when a grid or
//! game is built from it; malformed values fail fast with [`ConfigError`].
//!
//! All sections deserialize with `#[serde(default)]`, so a partial JSON document
//! only overrides the fields it names:
//!
//! ```
//! use tetrion_types::GameConfig;
//!
//! let config: GameConfig = serde_json::from_str(r#"{ "grid": { "height": 24 } }"#).unwrap();
//! assert_eq!(config.grid.width, 10);
//! assert_eq!(config.grid.height, 24);
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_BACK_TO_BACK_MULTIPLIER, DEFAULT_COMBO_POINTS, DEFAULT_GRID_HEIGHT,
    DEFAULT_GRID_WIDTH, DEFAULT_HARD_DROP_POINTS, DEFAULT_INITIAL_INTERVAL_MS,
    DEFAULT_LEVEL_ADJUSTMENT, DEFAULT_LINES_PER_LEVEL, DEFAULT_MINIMUM_INTERVAL_MS,
    DEFAULT_POINTS_PER_LINE, DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_MS,
    DEFAULT_SOFT_DROP_POINTS, DEFAULT_SPEED_FACTOR, DEFAULT_TETRIS_MULTIPLIER, MAX_GRID_SIDE,
    MIN_GRID_SIDE,
};

/// Rejected configuration value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    GridWidth(u8),
    GridHeight(u8),
    InitialInterval,
    MinimumInterval,
    /// Minimum interval above the level-1 interval
    IntervalRange,
    SpeedFactor(f64),
    LevelAdjustment(f64),
    TetrisMultiplier(f64),
    BackToBackMultiplier(f64),
    LinesPerLevel,
    RepeatDelay,
    RepeatInterval,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::GridWidth(_) | ConfigError::GridHeight(_) => "invalid_grid",
            ConfigError::InitialInterval
            | ConfigError::MinimumInterval
            | ConfigError::IntervalRange
            | ConfigError::SpeedFactor(_)
            | ConfigError::LevelAdjustment(_) => "invalid_speed",
            ConfigError::TetrisMultiplier(_)
            | ConfigError::BackToBackMultiplier(_)
            | ConfigError::LinesPerLevel => "invalid_scoring",
            ConfigError::RepeatDelay | ConfigError::RepeatInterval => "invalid_input",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GridWidth(w) => write!(
                f,
                "grid width {} outside {}..={}",
                w, MIN_GRID_SIDE, MAX_GRID_SIDE
            ),
            ConfigError::GridHeight(h) => write!(
                f,
                "grid height {} outside {}..={}",
                h, MIN_GRID_SIDE, MAX_GRID_SIDE
            ),
            ConfigError::InitialInterval => write!(f, "initial drop interval must be positive"),
            ConfigError::MinimumInterval => write!(f, "minimum drop interval must be positive"),
            ConfigError::IntervalRange => {
                write!(f, "minimum drop interval must not exceed the initial interval")
            }
            ConfigError::SpeedFactor(v) => {
                write!(f, "speed factor must be finite and in (0, 1), got {}", v)
            }
            ConfigError::LevelAdjustment(v) => {
                write!(f, "level adjustment must be finite and >= 0, got {}", v)
            }
            ConfigError::TetrisMultiplier(v) => {
                write!(f, "tetris multiplier must be finite and >= 1, got {}", v)
            }
            ConfigError::BackToBackMultiplier(v) => {
                write!(f, "back-to-back multiplier must be finite and >= 1, got {}", v)
            }
            ConfigError::LinesPerLevel => write!(f, "lines per level must be positive"),
            ConfigError::RepeatDelay => write!(f, "key repeat delay must be positive"),
            ConfigError::RepeatInterval => write!(f, "key repeat interval must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// How upcoming pieces are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomizerKind {
    /// Every piece drawn independently and uniformly
    #[default]
    Uniform,
    /// Shuffled bags of all seven kinds
    Bag7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: u8,
    pub height: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = MIN_GRID_SIDE..=MAX_GRID_SIDE;
        if !side.contains(&self.width) {
            return Err(ConfigError::GridWidth(self.width));
        }
        if !side.contains(&self.height) {
            return Err(ConfigError::GridHeight(self.height));
        }
        Ok(())
    }
}

/// Parameters of the gravity curve
///
/// `interval = max(minimum, initial * (speed_factor - (level - 1) * level_adjustment) ^ (level - 1))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    pub initial_interval_ms: u32,
    pub speed_factor: f64,
    pub level_adjustment: f64,
    pub minimum_interval_ms: u32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: DEFAULT_INITIAL_INTERVAL_MS,
            speed_factor: DEFAULT_SPEED_FACTOR,
            level_adjustment: DEFAULT_LEVEL_ADJUSTMENT,
            minimum_interval_ms: DEFAULT_MINIMUM_INTERVAL_MS,
        }
    }
}

impl SpeedConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_interval_ms == 0 {
            return Err(ConfigError::InitialInterval);
        }
        if self.minimum_interval_ms == 0 {
            return Err(ConfigError::MinimumInterval);
        }
        if self.minimum_interval_ms > self.initial_interval_ms {
            return Err(ConfigError::IntervalRange);
        }
        // A factor of 1 or more would slow gravity down as the level rises.
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 || self.speed_factor >= 1.0 {
            return Err(ConfigError::SpeedFactor(self.speed_factor));
        }
        if !self.level_adjustment.is_finite() || self.level_adjustment < 0.0 {
            return Err(ConfigError::LevelAdjustment(self.level_adjustment));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub points_per_line: u32,
    pub tetris_multiplier: f64,
    pub back_to_back_multiplier: f64,
    pub lines_per_level: u32,
    pub soft_drop_points: u32,
    pub hard_drop_points: u32,
    pub combo_points: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_line: DEFAULT_POINTS_PER_LINE,
            tetris_multiplier: DEFAULT_TETRIS_MULTIPLIER,
            back_to_back_multiplier: DEFAULT_BACK_TO_BACK_MULTIPLIER,
            lines_per_level: DEFAULT_LINES_PER_LEVEL,
            soft_drop_points: DEFAULT_SOFT_DROP_POINTS,
            hard_drop_points: DEFAULT_HARD_DROP_POINTS,
            combo_points: DEFAULT_COMBO_POINTS,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tetris_multiplier.is_finite() || self.tetris_multiplier < 1.0 {
            return Err(ConfigError::TetrisMultiplier(self.tetris_multiplier));
        }
        if !self.back_to_back_multiplier.is_finite() || self.back_to_back_multiplier < 1.0 {
            return Err(ConfigError::BackToBackMultiplier(
                self.back_to_back_multiplier,
            ));
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::LinesPerLevel);
        }
        Ok(())
    }
}

/// Held-key repeat timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Delay between key-down and the first repeat
    pub repeat_delay_ms: u32,
    /// Interval between subsequent repeats
    pub repeat_interval_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            repeat_delay_ms: DEFAULT_REPEAT_DELAY_MS,
            repeat_interval_ms: DEFAULT_REPEAT_INTERVAL_MS,
        }
    }
}

impl InputConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repeat_delay_ms == 0 {
            return Err(ConfigError::RepeatDelay);
        }
        if self.repeat_interval_ms == 0 {
            return Err(ConfigError::RepeatInterval);
        }
        Ok(())
    }
}

/// Complete, immutable rule set for one game
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub speed: SpeedConfig,
    pub scoring: ScoringConfig,
    pub input: InputConfig,
    pub randomizer: RandomizerKind,
}

impl GameConfig {
    /// Check every section, reporting the first bad value
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.speed.validate()?;
        self.scoring.validate()?;
        self.input.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_grid_dimensions_are_rejected() {
        let mut config = GameConfig::default();
        config.grid.width = 0;
        assert_eq!(config.validate(), Err(ConfigError::GridWidth(0)));

        let mut config = GameConfig::default();
        config.grid.height = 0;
        assert_eq!(config.validate(), Err(ConfigError::GridHeight(0)));

        let mut config = GameConfig::default();
        config.grid.width = MAX_GRID_SIDE + 1;
        assert_eq!(config.validate().unwrap_err().code(), "invalid_grid");
    }

    #[test]
    fn speed_and_scoring_values_are_checked() {
        let mut config = GameConfig::default();
        config.speed.speed_factor = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::SpeedFactor(_))));

        let mut config = GameConfig::default();
        config.speed.minimum_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::MinimumInterval));

        let mut config = GameConfig::default();
        config.speed.speed_factor = 1.5;
        config.speed.level_adjustment = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::SpeedFactor(1.5)));

        let mut config = GameConfig::default();
        config.speed.speed_factor = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::SpeedFactor(1.0)));

        let mut config = GameConfig::default();
        config.speed.minimum_interval_ms = 5_000;
        assert_eq!(config.validate(), Err(ConfigError::IntervalRange));
        assert_eq!(config.validate().unwrap_err().code(), "invalid_speed");

        let mut config = GameConfig::default();
        config.scoring.lines_per_level = 0;
        assert_eq!(config.validate(), Err(ConfigError::LinesPerLevel));

        let mut config = GameConfig::default();
        config.scoring.tetris_multiplier = 0.5;
        assert_eq!(config.validate().unwrap_err().code(), "invalid_scoring");
    }

    #[test]
    fn input_timing_must_be_positive() {
        let mut config = GameConfig::default();
        config.input.repeat_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::RepeatInterval));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "scoring": { "combo_points": 0 }, "randomizer": "bag7" }"#)
                .unwrap();
        assert_eq!(config.scoring.combo_points, 0);
        assert_eq!(config.scoring.points_per_line, DEFAULT_POINTS_PER_LINE);
        assert_eq!(config.randomizer, RandomizerKind::Bag7);
        assert_eq!(config.grid, GridConfig::default());
    }
}
