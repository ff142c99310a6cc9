//! Goal indicators for the contribution grid.
//!
//! The grid shows a trailing window of whole weeks. Above each week column a
//! bar lights up when the week qualifies, and a month label lights up when
//! its month qualifies. A period qualifies when any of a short, ordered list
//! of conditions holds; [`QualifyingReason`] names the first one that did.
//!
//! Quit habits are judged only on periods that are already over: a week or
//! month still in progress can always pick up another violation. A quit
//! week must also start on or after the habit start, while a month that
//! spans the habit start is judged on its tracked days.

use chrono::NaiveDate;
use serde::Serialize;

use super::totals::TotalsScanner;
use crate::calendar::HabitCalendar;
use crate::types::{CompletionHistory, HabitConfig, StreakPeriod};

/// Days per grid column.
pub const DAYS_IN_WEEK: u32 = 7;

/// Default number of week columns in the grid.
pub const DEFAULT_GRID_WEEKS: u32 = 52;

/// Which condition made a week or month qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualifyingReason {
    /// The streak goal is set on this period and its totals meet it
    GoalMet,
    /// Every tracked day in the period met its per-day target
    AllDaysMet,
    /// Weekly goal: every week overlapping the month met the goal
    AllWeeksMet,
}

const WEEK_CHECKS: [QualifyingReason; 2] = [QualifyingReason::GoalMet, QualifyingReason::AllDaysMet];

const MONTH_CHECKS: [QualifyingReason; 3] = [
    QualifyingReason::GoalMet,
    QualifyingReason::AllDaysMet,
    QualifyingReason::AllWeeksMet,
];

/// First day of the trailing grid that ends with the week containing `today`.
pub fn grid_start_date(today: NaiveDate, weeks: u32, calendar: &HabitCalendar) -> NaiveDate {
    let current_week = calendar.start_of_week(today);
    calendar.add_weeks(current_week, -i64::from(weeks.saturating_sub(1)))
}

/// The range of whole weeks covered by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridWindow {
    /// First day of week column 0
    pub start: NaiveDate,
    /// Number of week columns
    pub weeks: u32,
}

impl GridWindow {
    /// Grid of `weeks` columns whose last column contains `today`.
    pub fn trailing(today: NaiveDate, weeks: u32, calendar: &HabitCalendar) -> Self {
        Self {
            start: grid_start_date(today, weeks, calendar),
            weeks,
        }
    }

    /// Grid anchored at an explicit start day.
    pub fn starting_at(start: NaiveDate, weeks: u32) -> Self {
        Self { start, weeks }
    }

    /// Last day of the final column.
    pub fn end(&self, calendar: &HabitCalendar) -> NaiveDate {
        calendar.add_days(self.start, i64::from(self.weeks) * i64::from(DAYS_IN_WEEK) - 1)
    }

    /// Day shown at `(week_index, day_index)`.
    pub fn date_for_cell(&self, week_index: u32, day_index: u32, calendar: &HabitCalendar) -> NaiveDate {
        let offset = week_index
            .checked_mul(DAYS_IN_WEEK)
            .and_then(|days| days.checked_add(day_index))
            .unwrap_or_else(|| panic!("grid cell ({week_index}, {day_index}) out of range"));
        calendar.add_days(self.start, i64::from(offset))
    }
}

/// Decides which grid weeks and months get a goal indicator.
#[derive(Debug, Clone, Copy)]
pub struct GoalIndicatorEvaluator<'a> {
    config: HabitConfig,
    history: &'a CompletionHistory,
    grid: GridWindow,
    today: NaiveDate,
    calendar: HabitCalendar,
    scanner: TotalsScanner<'a>,
}

impl<'a> GoalIndicatorEvaluator<'a> {
    pub fn new(
        config: HabitConfig,
        history: &'a CompletionHistory,
        grid: GridWindow,
        today: NaiveDate,
        calendar: HabitCalendar,
    ) -> Self {
        Self {
            config,
            history,
            grid,
            today,
            calendar,
            scanner: TotalsScanner::new(config, history, today, calendar),
        }
    }

    pub fn grid(&self) -> GridWindow {
        self.grid
    }

    /// Whether week column `week_index` shows a goal bar.
    pub fn week_qualifies(&self, week_index: u32) -> bool {
        self.week_qualification(week_index).is_some()
    }

    /// Whether the month starting at `month_start` shows a lit label.
    pub fn month_qualifies(&self, month_start: NaiveDate) -> bool {
        self.month_qualification(month_start).is_some()
    }

    /// First condition under which week column `week_index` qualifies.
    pub fn week_qualification(&self, week_index: u32) -> Option<QualifyingReason> {
        let week_start = self.grid.date_for_cell(week_index, 0, &self.calendar);
        let week_end = self.calendar.add_days(week_start, i64::from(DAYS_IN_WEEK) - 1);

        if self.config.is_quit() && !self.is_closed_week(week_start, week_end) {
            return None;
        }

        let reason = WEEK_CHECKS.into_iter().find(|reason| match reason {
            QualifyingReason::GoalMet => self.week_meets_goal(week_start),
            QualifyingReason::AllDaysMet => self.all_days_meet_target(week_start, DAYS_IN_WEEK),
            QualifyingReason::AllWeeksMet => false,
        });

        tracing::trace!(week_index, %week_start, ?reason, "week qualification");
        reason
    }

    /// First condition under which the month containing `month_start` qualifies.
    pub fn month_qualification(&self, month_start: NaiveDate) -> Option<QualifyingReason> {
        let month_start = self.calendar.start_of_month(month_start);
        let month_end = self.calendar.end_of_month(month_start);

        if self.config.is_quit() && month_end >= self.today {
            return None;
        }

        let length = self.calendar.days_in_month(month_start);
        let reason = MONTH_CHECKS.into_iter().find(|reason| match reason {
            QualifyingReason::GoalMet => self.month_meets_goal(month_start, length),
            QualifyingReason::AllDaysMet => self.all_days_meet_target(month_start, length),
            QualifyingReason::AllWeeksMet => self.month_all_weeks_meet_goal(month_start, month_end),
        });

        tracing::trace!(%month_start, ?reason, "month qualification");
        reason
    }

    /// Goal bar state for every week column, oldest first.
    pub fn week_indicators(&self) -> Vec<bool> {
        (0..self.grid.weeks)
            .map(|week_index| self.week_qualifies(week_index))
            .collect()
    }

    /// Months whose first day falls inside the grid and which qualify.
    pub fn qualifying_months(&self) -> Vec<NaiveDate> {
        let grid_end = self.grid.end(&self.calendar);
        let mut current = self.calendar.start_of_month(self.grid.start);
        if current < self.grid.start {
            current = self.calendar.add_months(current, 1);
        }

        let mut months = Vec::new();
        while current <= grid_end {
            if self.month_qualifies(current) {
                months.push(current);
            }
            current = self.calendar.add_months(current, 1);
        }
        months
    }

    fn is_closed_week(&self, week_start: NaiveDate, week_end: NaiveDate) -> bool {
        week_end < self.today && week_start >= self.config.habit_start_date()
    }

    fn week_meets_goal(&self, week_start: NaiveDate) -> bool {
        if self.config.streak_goal_period() != StreakPeriod::Week {
            return false;
        }
        let totals = self.scanner.totals(week_start, DAYS_IN_WEEK);
        self.scanner.meets_goal(&totals)
    }

    fn month_meets_goal(&self, month_start: NaiveDate, length: u32) -> bool {
        if self.config.streak_goal_period() != StreakPeriod::Month {
            return false;
        }
        let totals = self.scanner.totals(month_start, length);
        self.scanner.meets_goal(&totals)
    }

    /// Every tracked day in the range met its per-day target, future days
    /// included. A range entirely before the habit start never qualifies.
    fn all_days_meet_target(&self, start: NaiveDate, length_in_days: u32) -> bool {
        let mut has_active_day = false;
        for offset in 0..i64::from(length_in_days) {
            let day = self.calendar.add_days(start, offset);
            if day < self.config.habit_start_date() {
                continue;
            }
            has_active_day = true;
            if !self.config.day_meets_target(self.history.count_on(day)) {
                return false;
            }
        }
        has_active_day
    }

    /// Each calendar week overlapping the month, clipped to the month, must
    /// meet the weekly goal. Segments with no day on or after the habit start
    /// are ignored; a month with no such segment does not qualify.
    fn month_all_weeks_meet_goal(&self, month_start: NaiveDate, month_end: NaiveDate) -> bool {
        if self.config.streak_goal_period() != StreakPeriod::Week {
            return false;
        }

        let mut week_start = self.calendar.start_of_week(month_start);
        let mut has_active_week = false;

        while week_start <= month_end {
            let week_end = self.calendar.add_days(week_start, i64::from(DAYS_IN_WEEK) - 1);
            let segment_start = week_start.max(month_start);
            let segment_end = week_end.min(month_end);
            let length = self.calendar.days_between(segment_start, segment_end) + 1;

            let (totals, eligible_days) = self
                .scanner
                .totals_including_future(segment_start, length as u32);
            if eligible_days > 0 {
                has_active_week = true;
                if !self.scanner.meets_goal(&totals) {
                    return false;
                }
            }

            week_start = self.calendar.add_weeks(week_start, 1);
        }

        has_active_week
    }
}
