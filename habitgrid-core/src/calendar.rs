//! Calendar arithmetic for habit evaluation
//!
//! Every computation in the engine is anchored to an explicit
//! [`HabitCalendar`] and an explicit `today`. Nothing in this crate reads the
//! wall clock except [`HabitCalendar::today`], which binaries use once to pick
//! the evaluation day.
//!
//! Days are plain [`NaiveDate`]s: a completion timestamp is truncated to its
//! calendar day in the calendar's fixed UTC offset, and from then on all
//! arithmetic is on whole days.
//!
//! Arithmetic that falls outside chrono's representable range panics.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, Offset, Utc, Weekday};

/// Week-start and timezone settings used to bucket days into weeks and months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitCalendar {
    /// First day of a calendar week
    pub first_weekday: Weekday,
    /// Offset used to truncate timestamps to calendar days
    pub utc_offset: FixedOffset,
}

impl Default for HabitCalendar {
    fn default() -> Self {
        Self::gregorian_utc()
    }
}

impl HabitCalendar {
    /// Sunday-first weeks in UTC.
    pub fn gregorian_utc() -> Self {
        Self {
            first_weekday: Weekday::Sun,
            utc_offset: Utc.fix(),
        }
    }

    /// Same calendar with a different first day of the week.
    pub fn with_first_weekday(mut self, first_weekday: Weekday) -> Self {
        self.first_weekday = first_weekday;
        self
    }

    /// Same calendar with a different UTC offset.
    pub fn with_offset(mut self, utc_offset: FixedOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    /// Calendar day a timestamp falls on.
    pub fn day_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(&self.utc_offset).date_naive()
    }

    /// Current calendar day according to the system clock.
    pub fn today(&self) -> NaiveDate {
        self.day_of(Utc::now())
    }

    /// First day of the calendar week containing `day`.
    pub fn start_of_week(&self, day: NaiveDate) -> NaiveDate {
        let weekday = day.weekday().num_days_from_monday();
        let first = self.first_weekday.num_days_from_monday();
        let back = (weekday + 7 - first) % 7;
        self.add_days(day, -i64::from(back))
    }

    /// First day of the month containing `day`.
    pub fn start_of_month(&self, day: NaiveDate) -> NaiveDate {
        day.with_day(1)
            .unwrap_or_else(|| panic!("no first day of month for {day}"))
    }

    /// Last day of the month containing `day`.
    pub fn end_of_month(&self, day: NaiveDate) -> NaiveDate {
        let start = self.start_of_month(day);
        self.add_days(self.add_months(start, 1), -1)
    }

    /// Number of days in the month containing `day`.
    pub fn days_in_month(&self, day: NaiveDate) -> u32 {
        let start = self.start_of_month(day);
        let next = self.add_months(start, 1);
        self.days_between(start, next) as u32
    }

    /// `day` shifted by `days` (negative goes back).
    pub fn add_days(&self, day: NaiveDate, days: i64) -> NaiveDate {
        day.checked_add_signed(Duration::days(days))
            .unwrap_or_else(|| panic!("date arithmetic out of range: {day} {days:+} days"))
    }

    /// `day` shifted by whole weeks.
    pub fn add_weeks(&self, day: NaiveDate, weeks: i64) -> NaiveDate {
        self.add_days(day, weeks * 7)
    }

    /// `day` shifted by whole months, clamping to the end of shorter months.
    pub fn add_months(&self, day: NaiveDate, months: i32) -> NaiveDate {
        let shifted = if months >= 0 {
            day.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            day.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.unwrap_or_else(|| panic!("date arithmetic out of range: {day} {months:+} months"))
    }

    /// Whole days from `from` to `to` (negative when `to` is earlier).
    pub fn days_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        to.signed_duration_since(from).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_of_week_sunday_first() {
        let cal = HabitCalendar::gregorian_utc();
        // 2026-01-15 is a Thursday
        assert_eq!(cal.start_of_week(date(2026, 1, 15)), date(2026, 1, 11));
        assert_eq!(cal.start_of_week(date(2026, 1, 11)), date(2026, 1, 11));
    }

    #[test]
    fn test_start_of_week_monday_first() {
        let cal = HabitCalendar::gregorian_utc().with_first_weekday(Weekday::Mon);
        assert_eq!(cal.start_of_week(date(2026, 1, 15)), date(2026, 1, 12));
        assert_eq!(cal.start_of_week(date(2026, 1, 11)), date(2026, 1, 5));
    }

    #[test]
    fn test_month_bounds() {
        let cal = HabitCalendar::default();
        assert_eq!(cal.start_of_month(date(2024, 2, 17)), date(2024, 2, 1));
        assert_eq!(cal.end_of_month(date(2024, 2, 17)), date(2024, 2, 29));
        assert_eq!(cal.days_in_month(date(2024, 2, 1)), 29);
        assert_eq!(cal.days_in_month(date(2025, 2, 1)), 28);
        assert_eq!(cal.days_in_month(date(2025, 12, 31)), 31);
    }

    #[test]
    fn test_add_months_crosses_year() {
        let cal = HabitCalendar::default();
        assert_eq!(cal.add_months(date(2026, 1, 1), -1), date(2025, 12, 1));
        assert_eq!(cal.add_months(date(2025, 12, 1), 1), date(2026, 1, 1));
    }

    #[test]
    fn test_day_of_uses_offset() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 15, 23, 30, 0).unwrap();
        let utc = HabitCalendar::gregorian_utc();
        let tokyo = utc.with_offset(FixedOffset::east_opt(9 * 3600).unwrap());
        assert_eq!(utc.day_of(ts), date(2026, 1, 15));
        assert_eq!(tokyo.day_of(ts), date(2026, 1, 16));
    }

    #[test]
    #[should_panic(expected = "date arithmetic out of range")]
    fn test_overflow_panics() {
        let cal = HabitCalendar::default();
        cal.add_days(NaiveDate::MAX, 1);
    }
}
