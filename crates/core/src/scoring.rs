//! Scoring module - line clear points, drop points, levels and gravity speed
//!
//! Line clears score `floor(lines * points_per_line * level * multiplier)` where
//! the multiplier is the Tetris multiplier for exactly four lines (times the
//! back-to-back multiplier when the previous clear was also a Tetris) and 1
//! otherwise. Consecutive clearing locks add a flat combo bonus on top.

use tetrion_types::{ScoringConfig, SpeedConfig};

/// Score calculation result for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for the cleared lines, multipliers included
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`
    pub combo_bonus: u32,
    pub total: u32,
    /// Whether this clear was a Tetris (sets the back-to-back state)
    pub is_tetris: bool,
    /// Whether the back-to-back multiplier was applied
    pub b2b_applied: bool,
}

/// Points for clearing `lines` rows at `level`
///
/// ```
/// use tetrion_core::scoring::calculate_line_clear_points;
/// use tetrion_types::ScoringConfig;
///
/// let rules = ScoringConfig::default();
/// assert_eq!(calculate_line_clear_points(4, 1, false, &rules), 1600);
/// assert_eq!(calculate_line_clear_points(1, 3, false, &rules), 300);
/// ```
pub fn calculate_line_clear_points(
    lines: u32,
    level: u32,
    back_to_back: bool,
    rules: &ScoringConfig,
) -> u32 {
    if lines == 0 {
        return 0;
    }
    let mut multiplier = 1.0;
    if lines == 4 {
        multiplier = rules.tetris_multiplier;
        if back_to_back {
            multiplier *= rules.back_to_back_multiplier;
        }
    }
    let points = lines as f64 * rules.points_per_line as f64 * level as f64 * multiplier;
    points.floor().min(u32::MAX as f64) as u32
}

/// Combo bonus for the `combo_count`-th consecutive clearing lock
///
/// The first clear of a chain (`combo_count == 1`) earns nothing.
pub fn calculate_combo_bonus(combo_count: u32, rules: &ScoringConfig) -> u32 {
    rules
        .combo_points
        .saturating_mul(combo_count.saturating_sub(1))
}

/// Complete score for a lock that cleared `lines` rows
pub fn calculate_score(
    lines: u32,
    level: u32,
    combo_count: u32,
    previous_tetris: bool,
    rules: &ScoringConfig,
) -> ScoreResult {
    let is_tetris = lines == 4;
    let b2b_applied = is_tetris && previous_tetris;
    let line_clear_score = calculate_line_clear_points(lines, level, previous_tetris, rules);
    let combo_bonus = if lines > 0 {
        calculate_combo_bonus(combo_count, rules)
    } else {
        0
    };

    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score.saturating_add(combo_bonus),
        is_tetris,
        b2b_applied,
    }
}

/// Drop score: soft drops and hard drops award per cell traveled
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool, rules: &ScoringConfig) -> u32 {
    let per_cell = if is_hard_drop {
        rules.hard_drop_points
    } else {
        rules.soft_drop_points
    };
    cells.saturating_mul(per_cell)
}

/// Level for a total line count; levels start at 1
pub fn calculate_level(total_lines: u32, rules: &ScoringConfig) -> u32 {
    total_lines / rules.lines_per_level + 1
}

/// Gravity interval for a level (in milliseconds)
///
/// `max(minimum, initial * (speed_factor - (level - 1) * level_adjustment) ^ (level - 1))`.
/// Rounded to the nearest millisecond; once the base shrinks to zero the curve
/// is pinned at the minimum.
pub fn get_drop_interval_ms(level: u32, speed: &SpeedConfig) -> u32 {
    let steps = level.saturating_sub(1) as f64;
    let base = (speed.speed_factor - steps * speed.level_adjustment).max(0.0);
    let interval = speed.initial_interval_ms as f64 * base.powf(steps);
    let floor = speed.minimum_interval_ms as f64;
    interval.round().max(floor).min(u32::MAX as f64) as u32
}
