//! Goal and streak engine
//!
//! Pure functions over a [`HabitConfig`], a [`CompletionHistory`], an explicit
//! `today` and a [`HabitCalendar`]. Nothing here reads the clock, touches the
//! filesystem or fails: callers resolve every input up front and may evaluate
//! as often as they like.
//!
//! ## Modules
//!
//! - [`totals`]: range aggregation and the goal satisfaction rule
//! - [`indicator`]: which grid weeks and months light up
//! - [`streak`]: current streak and progress in the current period
//! - [`subtitle`]: the goal line and secondary fragment under a habit name
//! - [`day_cell`]: per-day cell states for the grid
//! - [`summary`]: all of the above for one habit in one pass

pub mod day_cell;
pub mod indicator;
pub mod streak;
pub mod subtitle;
pub mod summary;
pub mod totals;

pub use day_cell::{day_cell_state, DayCellState};
pub use indicator::{
    grid_start_date, GoalIndicatorEvaluator, GridWindow, QualifyingReason, DAYS_IN_WEEK,
    DEFAULT_GRID_WEEKS,
};
pub use streak::{Streak, StreakCalculator};
pub use subtitle::{HabitSubtitle, SubtitleCalculator, SubtitleStyle};
pub use summary::{summarize, HabitSummary};
pub use totals::{PeriodTotals, TotalsScanner};

use chrono::NaiveDate;

use crate::calendar::HabitCalendar;
use crate::types::{CompletionHistory, HabitConfig};

/// Whether week column `week_index` of a default-width grid starting at
/// `grid_start_date` shows a goal bar.
pub fn evaluate_week(
    config: &HabitConfig,
    history: &CompletionHistory,
    grid_start_date: NaiveDate,
    week_index: u32,
    today: NaiveDate,
    calendar: &HabitCalendar,
) -> bool {
    let weeks = DEFAULT_GRID_WEEKS.max(week_index.saturating_add(1));
    let grid = GridWindow::starting_at(grid_start_date, weeks);
    GoalIndicatorEvaluator::new(*config, history, grid, today, *calendar).week_qualifies(week_index)
}

/// Whether the month containing `month_start` shows a lit label on a
/// default-width grid starting at `grid_start_date`.
///
/// Month qualification does not depend on the grid; the start day only
/// anchors the evaluator the same way [`evaluate_week`] does.
pub fn evaluate_month(
    config: &HabitConfig,
    history: &CompletionHistory,
    grid_start_date: NaiveDate,
    month_start: NaiveDate,
    today: NaiveDate,
    calendar: &HabitCalendar,
) -> bool {
    let grid = GridWindow::starting_at(grid_start_date, DEFAULT_GRID_WEEKS);
    GoalIndicatorEvaluator::new(*config, history, grid, today, *calendar)
        .month_qualifies(month_start)
}

/// Current streak in the unit of the habit's streak goal period.
pub fn current_streak(
    config: &HabitConfig,
    history: &CompletionHistory,
    today: NaiveDate,
    calendar: &HabitCalendar,
) -> Option<Streak> {
    StreakCalculator::new(*config, history, today, *calendar).current_streak()
}

/// Subtitle shown under the habit's name on `today`.
pub fn compose_subtitle(
    config: &HabitConfig,
    history: &CompletionHistory,
    today: NaiveDate,
    calendar: &HabitCalendar,
) -> HabitSubtitle {
    SubtitleCalculator::new(*config, history, today, *calendar).calculate()
}

/// Cell state for `date` given the count recorded on it.
pub fn day_cell_state_for(
    date: NaiveDate,
    count: u32,
    config: &HabitConfig,
    today: NaiveDate,
) -> DayCellState {
    let tracked = date >= config.habit_start_date() && date <= today;
    if tracked && config.is_day_complete(count) {
        return DayCellState::Completed;
    }
    day_cell_state(
        date,
        count,
        config.daily_target(),
        config.habit_type(),
        config.habit_start_date(),
        today,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HabitType, StreakGoalType, StreakPeriod};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_facade_agrees_with_evaluators() {
        let calendar = HabitCalendar::default();
        let today = date(2026, 2, 4);
        let config = HabitConfig::builder(date(2026, 1, 1))
            .streak_goal(StreakPeriod::Month, 20, StreakGoalType::DayBasis)
            .build();
        let history = CompletionHistory::from_counts(
            (1..=25).map(|day| (date(2026, 1, day), 1)),
        );

        let grid_start = grid_start_date(today, DEFAULT_GRID_WEEKS, &calendar);
        assert!(evaluate_month(&config, &history, grid_start, date(2026, 1, 1), today, &calendar));
        assert!(!evaluate_month(&config, &history, grid_start, date(2026, 2, 1), today, &calendar));
        // Any anchor gives the same answer for a month
        assert!(evaluate_month(&config, &history, date(2026, 1, 4), date(2026, 1, 1), today, &calendar));

        let evaluator = GoalIndicatorEvaluator::new(
            config,
            &history,
            GridWindow::trailing(today, DEFAULT_GRID_WEEKS, &calendar),
            today,
            calendar,
        );
        for week_index in 0..DEFAULT_GRID_WEEKS {
            assert_eq!(
                evaluate_week(&config, &history, grid_start, week_index, today, &calendar),
                evaluator.week_qualifies(week_index)
            );
        }

        assert_eq!(
            current_streak(&config, &history, today, &calendar),
            Some(Streak {
                count: 1,
                period: StreakPeriod::Month
            })
        );
        assert_eq!(
            compose_subtitle(&config, &history, today, &calendar).goal_text,
            "20 days a month"
        );
    }

    #[test]
    fn test_day_cell_state_for_uses_config() {
        let config = HabitConfig::builder(date(2026, 1, 1))
            .daily_target(2)
            .habit_type(HabitType::Quit)
            .build();
        let today = date(2026, 1, 10);

        assert_eq!(
            day_cell_state_for(date(2026, 1, 5), 3, &config, today),
            DayCellState::Failed
        );
        assert_eq!(
            day_cell_state_for(date(2026, 1, 11), 0, &config, today),
            DayCellState::Inactive
        );
        assert_eq!(
            day_cell_state_for(date(2026, 1, 6), 0, &config, today),
            DayCellState::Completed
        );

        let build = HabitConfig::builder(date(2026, 1, 1)).daily_target(2).build();
        assert_eq!(
            day_cell_state_for(date(2026, 1, 6), 5, &build, today),
            DayCellState::Completed
        );
        assert_eq!(
            day_cell_state_for(date(2025, 12, 31), 5, &build, today),
            DayCellState::Inactive
        );
    }

    #[test]
    fn test_evaluate_week_widens_grid_for_late_columns() {
        let calendar = HabitCalendar::default();
        let config = HabitConfig::builder(date(2026, 1, 4)).build();
        let history = CompletionHistory::from_counts((4..=10).map(|day| (date(2026, 1, day), 1)));
        let today = date(2026, 3, 1);

        assert!(evaluate_week(&config, &history, date(2025, 1, 5), 52, today, &calendar));
        assert!(!evaluate_week(&config, &history, date(2025, 1, 5), 53, today, &calendar));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_evaluate_week_rejects_column_past_calendar() {
        let calendar = HabitCalendar::default();
        let config = HabitConfig::builder(date(2026, 1, 1)).build();
        let history = CompletionHistory::default();

        evaluate_week(&config, &history, date(2026, 1, 4), u32::MAX, date(2026, 1, 10), &calendar);
    }
}
