//! Scoring module - row points and the difficulty curve
//!
//! - Each cleared row is worth `10 + (H - row)` using the row's index before
//!   removal, so rows near the top pay more than rows at the bottom.
//! - The drop interval steps down at 100, 500 and 1000 points and never
//!   steps back up within a game.

use crate::types::{BASE_DROP_MS, BOARD_HEIGHT, DROP_INTERVAL_STEPS, ROW_CLEAR_BASE_POINTS};

/// Points for clearing the row at `row` (original index)
pub fn row_clear_points(row: usize) -> u32 {
    ROW_CLEAR_BASE_POINTS + (BOARD_HEIGHT as u32).saturating_sub(row as u32)
}

/// Points for one clear event, summed per row
pub fn line_clear_score(rows: &[usize]) -> u32 {
    rows.iter().map(|&r| row_clear_points(r)).sum()
}

/// Drop interval for a score, ignoring history
pub fn drop_interval_for_score(score: u32) -> u32 {
    DROP_INTERVAL_STEPS
        .iter()
        .rev()
        .find(|&&(threshold, _)| score >= threshold)
        .map(|&(_, ms)| ms)
        .unwrap_or(BASE_DROP_MS)
}

/// Interval after reaching `score` when currently at `current_ms`.
///
/// Only ever moves down.
pub fn next_drop_interval_ms(score: u32, current_ms: u32) -> u32 {
    drop_interval_for_score(score).min(current_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_points_favor_high_rows() {
        assert_eq!(row_clear_points(19), 11);
        assert_eq!(row_clear_points(0), 30);
        assert!(row_clear_points(3) > row_clear_points(17));
    }

    #[test]
    fn test_line_clear_score_sums_rows() {
        assert_eq!(line_clear_score(&[]), 0);
        assert_eq!(line_clear_score(&[19]), 11);
        assert_eq!(line_clear_score(&[16, 17, 18, 19]), 14 + 13 + 12 + 11);
        assert_eq!(line_clear_score(&[19, 16]), line_clear_score(&[16, 19]));
    }

    #[test]
    fn test_drop_interval_thresholds() {
        assert_eq!(drop_interval_for_score(0), 1000);
        assert_eq!(drop_interval_for_score(99), 1000);
        assert_eq!(drop_interval_for_score(100), 700);
        assert_eq!(drop_interval_for_score(499), 700);
        assert_eq!(drop_interval_for_score(500), 500);
        assert_eq!(drop_interval_for_score(999), 500);
        assert_eq!(drop_interval_for_score(1000), 300);
        assert_eq!(drop_interval_for_score(50_000), 300);
    }

    #[test]
    fn test_drop_interval_never_increases() {
        assert_eq!(next_drop_interval_ms(0, 500), 500);
        assert_eq!(next_drop_interval_ms(120, 1000), 700);
        assert_eq!(next_drop_interval_ms(1200, 700), 300);
    }
}
