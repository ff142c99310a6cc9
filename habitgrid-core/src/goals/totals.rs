//! Period totals and the goal satisfaction rule.
//!
//! Every period-level decision in the engine reduces a contiguous day range to
//! a [`PeriodTotals`] and asks whether it meets the habit's streak goal.

use chrono::NaiveDate;

use crate::calendar::HabitCalendar;
use crate::types::{CompletionHistory, HabitConfig, HabitType, StreakGoalType};

/// Aggregates for one contiguous range of days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodTotals {
    /// Days with a count above zero
    pub active_day_count: u32,
    /// Days whose count reached the daily target
    pub days_meeting_per_day_goal: u32,
    /// Sum of all counts
    pub total_value: u64,
}

impl PeriodTotals {
    fn add_day(&mut self, count: u32, daily_target: u32) {
        if count > 0 {
            self.active_day_count += 1;
        }
        if count >= daily_target {
            self.days_meeting_per_day_goal += 1;
        }
        self.total_value += u64::from(count);
    }

    /// Whether these totals satisfy a streak goal.
    ///
    /// Build habits must reach the goal value; quit habits must stay at or
    /// under it. Day basis counts qualifying days (target-meeting days for
    /// build, violation days for quit); value basis sums raw counts.
    pub fn meets_goal(
        &self,
        streak_goal_value: u32,
        streak_goal_type: StreakGoalType,
        habit_type: HabitType,
    ) -> bool {
        let value = u64::from(streak_goal_value);
        match (habit_type, streak_goal_type) {
            (HabitType::Build, StreakGoalType::DayBasis) => {
                u64::from(self.days_meeting_per_day_goal) >= value
            }
            (HabitType::Build, StreakGoalType::ValueBasis) => self.total_value >= value,
            (HabitType::Quit, StreakGoalType::DayBasis) => u64::from(self.active_day_count) <= value,
            (HabitType::Quit, StreakGoalType::ValueBasis) => self.total_value <= value,
        }
    }

    /// Units still missing before a build goal is reached, never negative.
    pub fn remaining(&self, streak_goal_value: u32, streak_goal_type: StreakGoalType) -> u32 {
        let done = match streak_goal_type {
            StreakGoalType::DayBasis => u64::from(self.days_meeting_per_day_goal),
            StreakGoalType::ValueBasis => self.total_value,
        };
        u64::from(streak_goal_value).saturating_sub(done) as u32
    }
}

/// Sums a habit's history over day ranges, respecting its active lifetime.
#[derive(Debug, Clone, Copy)]
pub struct TotalsScanner<'a> {
    config: HabitConfig,
    history: &'a CompletionHistory,
    today: NaiveDate,
    calendar: HabitCalendar,
}

impl<'a> TotalsScanner<'a> {
    pub fn new(
        config: HabitConfig,
        history: &'a CompletionHistory,
        today: NaiveDate,
        calendar: HabitCalendar,
    ) -> Self {
        Self {
            config,
            history,
            today,
            calendar,
        }
    }

    /// Totals over `length_in_days` days from `start`, counting only days in
    /// `[habit_start_date, today]`.
    pub fn totals(&self, start: NaiveDate, length_in_days: u32) -> PeriodTotals {
        let mut totals = PeriodTotals::default();
        for day in self.days(start, length_in_days) {
            if day < self.config.habit_start_date() || day > self.today {
                continue;
            }
            totals.add_day(self.history.count_on(day), self.config.daily_target());
        }
        totals
    }

    /// Totals without the `today` bound, plus how many days in the range are
    /// on or after the habit start (whether or not anything was recorded).
    pub fn totals_including_future(
        &self,
        start: NaiveDate,
        length_in_days: u32,
    ) -> (PeriodTotals, u32) {
        let mut totals = PeriodTotals::default();
        let mut eligible_days = 0;
        for day in self.days(start, length_in_days) {
            if day < self.config.habit_start_date() {
                continue;
            }
            eligible_days += 1;
            totals.add_day(self.history.count_on(day), self.config.daily_target());
        }
        (totals, eligible_days)
    }

    /// Whether `totals` satisfies this habit's streak goal.
    pub fn meets_goal(&self, totals: &PeriodTotals) -> bool {
        totals.meets_goal(
            self.config.streak_goal_value(),
            self.config.streak_goal_type(),
            self.config.habit_type(),
        )
    }

    fn days(&self, start: NaiveDate, length_in_days: u32) -> impl Iterator<Item = NaiveDate> {
        let calendar = self.calendar;
        (0..i64::from(length_in_days)).map(move |offset| calendar.add_days(start, offset))
    }
}
