//! Scoring module - placement scoring, level and countdown pacing
//!
//! All functions are pure. Ordering matters at the call site: points are
//! computed with the multiplier as it stood before the placement, then the
//! level is recomputed from the new score, then the multiplier advances.

use crate::types::{
    BASE_LOOP_DELAY_MS, LINE_CLEAR_BASE_POINTS, LOOP_DELAY_STEP_MS, MIN_LOOP_DELAY_MS,
    SCORE_PER_LEVEL,
};

/// Points for one placement: `lines * cells * 10 * multiplier`.
///
/// `cells` is the size of the deduplicated cleared set, not lines times the
/// row length. Zero lines means zero points.
pub fn placement_points(lines: u32, cells: u32, multiplier: u32) -> u32 {
    lines
        .saturating_mul(cells)
        .saturating_mul(LINE_CLEAR_BASE_POINTS)
        .saturating_mul(multiplier)
}

/// Level is derived from score, 1000 points per level (integer division)
pub fn level_for_score(score: u32) -> u32 {
    score / SCORE_PER_LEVEL
}

/// Multiplier streak: one more on any clearing placement, reset to 1 on a
/// placement that clears nothing
pub fn next_multiplier(lines: u32, multiplier: u32) -> u32 {
    if lines > 0 {
        multiplier + 1
    } else {
        1
    }
}

/// Countdown delay for a level: `max(2500, 12000 - level * 500)` milliseconds
pub fn loop_delay_ms(level: u32) -> u64 {
    BASE_LOOP_DELAY_MS
        .saturating_sub(u64::from(level) * LOOP_DELAY_STEP_MS)
        .max(MIN_LOOP_DELAY_MS)
}
