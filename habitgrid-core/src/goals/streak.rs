//! Current streak calculation.
//!
//! Streaks are counted in the unit of the habit's streak goal period:
//!
//! - **Day**: walk back from `today` while each day meets its per-day target.
//! - **Week / Month**: walk back over fully elapsed periods, starting with
//!   the one before the current period, while each meets the streak goal.
//!   For build habits the current period adds one more once it already meets
//!   the goal. Quit habits only count periods that are over.
//!
//! No walk goes before the habit start date.

use chrono::NaiveDate;
use serde::Serialize;

use super::totals::{PeriodTotals, TotalsScanner};
use crate::calendar::HabitCalendar;
use crate::types::{CompletionHistory, HabitConfig, StreakPeriod};

/// A run of consecutive qualifying periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub count: u32,
    pub period: StreakPeriod,
}

/// Computes streaks and period progress for one habit on one day.
#[derive(Debug, Clone, Copy)]
pub struct StreakCalculator<'a> {
    config: HabitConfig,
    history: &'a CompletionHistory,
    today: NaiveDate,
    calendar: HabitCalendar,
    scanner: TotalsScanner<'a>,
}

impl<'a> StreakCalculator<'a> {
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
            scanner: TotalsScanner::new(config, history, today, calendar),
        }
    }

    /// Current streak in the unit of the streak goal period, or `None`.
    pub fn current_streak(&self) -> Option<Streak> {
        let period = self.config.streak_goal_period();
        let count = match period {
            StreakPeriod::Day => self.daily_streak(),
            StreakPeriod::Week | StreakPeriod::Month => {
                let closed = self.closed_period_count(period);
                let current = u32::from(!self.config.is_quit() && self.current_period_meets_goal());
                closed + current
            }
        };

        tracing::trace!(count, period = period.as_str(), "current streak");
        (count > 0).then_some(Streak { count, period })
    }

    /// Streak over periods that are already over, ignoring the current
    /// week or month. Daily goals report the plain daily streak.
    pub fn closed_period_streak(&self) -> Option<Streak> {
        let period = self.config.streak_goal_period();
        let count = match period {
            StreakPeriod::Day => self.daily_streak(),
            StreakPeriod::Week | StreakPeriod::Month => self.closed_period_count(period),
        };
        (count > 0).then_some(Streak { count, period })
    }

    /// Whether the period containing `today` already meets the streak goal,
    /// counting days up to and including today.
    pub fn current_period_meets_goal(&self) -> bool {
        match self.config.streak_goal_period() {
            StreakPeriod::Day => self.config.day_meets_target(self.history.count_on(self.today)),
            StreakPeriod::Week | StreakPeriod::Month => {
                let totals = self.current_period_totals();
                self.scanner.meets_goal(&totals)
            }
        }
    }

    /// Units still needed this week or month; `None` for daily goals.
    pub fn left_this_period(&self) -> Option<u32> {
        if !self.config.has_larger_goal() {
            return None;
        }
        let totals = self.current_period_totals();
        Some(totals.remaining(
            self.config.streak_goal_value(),
            self.config.streak_goal_type(),
        ))
    }

    fn current_period_totals(&self) -> PeriodTotals {
        match self.config.streak_goal_period() {
            StreakPeriod::Day => self.scanner.totals(self.today, 1),
            StreakPeriod::Week => {
                let week_start = self.calendar.start_of_week(self.today);
                self.scanner.totals(week_start, 7)
            }
            StreakPeriod::Month => {
                let month_start = self.calendar.start_of_month(self.today);
                let length = self.calendar.days_in_month(month_start);
                self.scanner.totals(month_start, length)
            }
        }
    }

    fn daily_streak(&self) -> u32 {
        let mut count = 0;
        let mut day = self.today;
        while day >= self.config.habit_start_date()
            && self.config.day_meets_target(self.history.count_on(day))
        {
            count += 1;
            day = self.calendar.add_days(day, -1);
        }
        count
    }

    fn closed_period_count(&self, period: StreakPeriod) -> u32 {
        let mut count = 0;
        let mut start = self.previous_period_start(self.current_period_start(period), period);

        while start >= self.config.habit_start_date() {
            let totals = self.scanner.totals(start, self.period_length(start, period));
            if !self.scanner.meets_goal(&totals) {
                break;
            }
            count += 1;
            start = self.previous_period_start(start, period);
        }
        count
    }

    fn current_period_start(&self, period: StreakPeriod) -> NaiveDate {
        match period {
            StreakPeriod::Day => self.today,
            StreakPeriod::Week => self.calendar.start_of_week(self.today),
            StreakPeriod::Month => self.calendar.start_of_month(self.today),
        }
    }

    fn previous_period_start(&self, start: NaiveDate, period: StreakPeriod) -> NaiveDate {
        match period {
            StreakPeriod::Day => self.calendar.add_days(start, -1),
            StreakPeriod::Week => self.calendar.add_weeks(start, -1),
            StreakPeriod::Month => self.calendar.add_months(start, -1),
        }
    }

    fn period_length(&self, start: NaiveDate, period: StreakPeriod) -> u32 {
        match period {
            StreakPeriod::Day => 1,
            StreakPeriod::Week => 7,
            StreakPeriod::Month => self.calendar.days_in_month(start),
        }
    }
}
