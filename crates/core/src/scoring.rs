//! Scoring module - line-clear points, levels and drop cadence

use crate::types::{
    INITIAL_SPEED_MS, LINES_PER_LEVEL, LINE_POINTS, MIN_SPEED_MS, SPEED_STEP_MS,
};

/// Points for clearing `lines` rows in one lock at `level` (1-based).
///
/// More than four lines scores as four.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    LINE_POINTS[lines.min(4)].saturating_mul(level)
}

/// Level reached after `total_lines` cleared lines: ten lines per level,
/// starting at level 1.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Auto-drop interval at `level`, floored at [`MIN_SPEED_MS`].
pub fn drop_interval_ms(level: u32) -> u32 {
    let step = level.saturating_sub(1).saturating_mul(SPEED_STEP_MS);
    INITIAL_SPEED_MS.saturating_sub(step).max(MIN_SPEED_MS)
}
