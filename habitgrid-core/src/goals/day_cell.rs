//! Per-day grid cell state.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::HabitType;

/// Cell intensities used by the grid.
pub mod opacity {
    /// Before the habit started, or in the future
    pub const INACTIVE: f64 = 0.1;
    /// Tracked day that missed
    pub const FAILED: f64 = 0.25;
    /// Lowest partial intensity
    pub const PARTIAL_MIN: f64 = 0.4;
    /// Highest partial intensity, just short of complete
    pub const PARTIAL_MAX: f64 = 0.85;
    pub const COMPLETED: f64 = 1.0;
}

/// Visual state of one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", content = "progress", rename_all = "snake_case")]
pub enum DayCellState {
    Inactive,
    Failed,
    /// Progress toward complete, `0.0..=1.0`
    Partial(f64),
    Completed,
}

impl DayCellState {
    /// Grid intensity for this state.
    pub fn opacity(&self) -> f64 {
        match self {
            DayCellState::Inactive => opacity::INACTIVE,
            DayCellState::Failed => opacity::FAILED,
            DayCellState::Partial(progress) => {
                let progress = progress.clamp(0.0, 1.0);
                opacity::PARTIAL_MIN + progress * (opacity::PARTIAL_MAX - opacity::PARTIAL_MIN)
            }
            DayCellState::Completed => opacity::COMPLETED,
        }
    }
}

/// Classify a single day for display.
///
/// Quit habits invert progress: no violations is complete, exactly at the
/// limit is the dimmest partial, over the limit has failed.
pub fn day_cell_state(
    date: NaiveDate,
    count: u32,
    target: u32,
    habit_type: HabitType,
    habit_start_date: NaiveDate,
    today: NaiveDate,
) -> DayCellState {
    if date < habit_start_date || date > today {
        return DayCellState::Inactive;
    }

    let target = target.max(1);
    match habit_type {
        HabitType::Build => {
            if count == 0 {
                DayCellState::Failed
            } else if count >= target {
                DayCellState::Completed
            } else {
                DayCellState::Partial(f64::from(count) / f64::from(target))
            }
        }
        HabitType::Quit => {
            if count == 0 {
                DayCellState::Completed
            } else if count > target {
                DayCellState::Failed
            } else if count == target {
                DayCellState::Partial(0.0)
            } else {
                DayCellState::Partial(1.0 - f64::from(count) / f64::from(target))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state(count: u32, target: u32, habit_type: HabitType) -> DayCellState {
        day_cell_state(
            date(2026, 1, 10),
            count,
            target,
            habit_type,
            date(2026, 1, 1),
            date(2026, 1, 15),
        )
    }

    #[test]
    fn test_inactive_outside_lifetime() {
        for habit_type in [HabitType::Build, HabitType::Quit] {
            let before = day_cell_state(
                date(2025, 12, 31),
                0,
                1,
                habit_type,
                date(2026, 1, 1),
                date(2026, 1, 15),
            );
            let future = day_cell_state(
                date(2026, 1, 16),
                5,
                1,
                habit_type,
                date(2026, 1, 1),
                date(2026, 1, 15),
            );
            assert_eq!(before, DayCellState::Inactive);
            assert_eq!(future, DayCellState::Inactive);
        }
    }

    #[test]
    fn test_build_states() {
        assert_eq!(state(0, 4, HabitType::Build), DayCellState::Failed);
        assert_eq!(state(1, 4, HabitType::Build), DayCellState::Partial(0.25));
        assert_eq!(state(4, 4, HabitType::Build), DayCellState::Completed);
        assert_eq!(state(9, 4, HabitType::Build), DayCellState::Completed);
    }

    #[test]
    fn test_quit_states() {
        assert_eq!(state(0, 4, HabitType::Quit), DayCellState::Completed);
        assert_eq!(state(1, 4, HabitType::Quit), DayCellState::Partial(0.75));
        assert_eq!(state(4, 4, HabitType::Quit), DayCellState::Partial(0.0));
        assert_eq!(state(5, 4, HabitType::Quit), DayCellState::Failed);
    }

    #[test]
    fn test_opacity_levels() {
        assert_eq!(DayCellState::Inactive.opacity(), 0.1);
        assert_eq!(DayCellState::Failed.opacity(), 0.25);
        assert_eq!(DayCellState::Partial(0.0).opacity(), 0.4);
        assert!((DayCellState::Partial(1.0).opacity() - 0.85).abs() < 1e-9);
        assert_eq!(DayCellState::Completed.opacity(), 1.0);
    }
}
