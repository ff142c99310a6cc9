//! Everything a habit card needs, computed in one pass.

use chrono::NaiveDate;
use serde::Serialize;

use super::day_cell::DayCellState;
use super::indicator::{GoalIndicatorEvaluator, GridWindow};
use super::streak::{Streak, StreakCalculator};
use super::subtitle::{HabitSubtitle, SubtitleCalculator};
use crate::calendar::HabitCalendar;
use crate::types::{CompletionHistory, HabitConfig};

/// Evaluated state of one habit on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitSummary {
    /// Day the summary was evaluated for
    pub today: NaiveDate,
    /// Goal line and secondary fragment
    pub subtitle: HabitSubtitle,
    /// Raw current streak (day streaks of 1 included)
    pub streak: Option<Streak>,
    /// Today's cell state
    pub today_state: DayCellState,
    /// Units still needed this week or month, for larger goals
    pub left_this_period: Option<u32>,
    /// Grid the indicators refer to
    pub grid: GridWindow,
    /// Goal bar per week column, oldest first
    pub week_indicators: Vec<bool>,
    /// First days of qualifying months inside the grid
    pub qualifying_months: Vec<NaiveDate>,
}

impl HabitSummary {
    /// Number of week columns with a goal bar.
    pub fn qualifying_week_count(&self) -> usize {
        self.week_indicators.iter().filter(|lit| **lit).count()
    }
}

/// Evaluate a habit for display over a trailing grid of `weeks` columns.
pub fn summarize(
    config: &HabitConfig,
    history: &CompletionHistory,
    today: NaiveDate,
    calendar: &HabitCalendar,
    weeks: u32,
) -> HabitSummary {
    let grid = GridWindow::trailing(today, weeks, calendar);
    let indicators = GoalIndicatorEvaluator::new(*config, history, grid, today, *calendar);
    let streaks = StreakCalculator::new(*config, history, today, *calendar);
    let subtitle = SubtitleCalculator::new(*config, history, today, *calendar).calculate();

    let summary = HabitSummary {
        today,
        subtitle,
        streak: streaks.current_streak(),
        today_state: super::day_cell_state_for(today, history.count_on(today), config, today),
        left_this_period: streaks.left_this_period(),
        grid: indicators.grid(),
        week_indicators: indicators.week_indicators(),
        qualifying_months: indicators.qualifying_months(),
    };

    tracing::debug!(
        %today,
        weeks,
        qualifying_weeks = summary.qualifying_week_count(),
        qualifying_months = summary.qualifying_months.len(),
        streak = ?summary.streak,
        "Habit summarized"
    );

    summary
}
