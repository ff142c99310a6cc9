//! Habit subtitle composition.
//!
//! A habit card shows a goal line ("8 a day", "Max 3 a day", "5 days a week")
//! followed by at most one secondary fragment. The fragment is picked by
//! priority from today's count and the current streak:
//!
//! 1. Quit habit over its daily limit: "Failed today" / "N over limit"
//! 2. Non-binary build habit not done today: "N left today"
//! 3. Binary build habit not done today: nothing
//! 4. A streak ("N day streak" only when N > 1; week and month streaks always)
//! 5. Build habit with a weekly or monthly goal, done today: "N left this week"
//! 6. Nothing

use chrono::NaiveDate;
use serde::Serialize;

use super::streak::StreakCalculator;
use crate::calendar::HabitCalendar;
use crate::types::{CompletionHistory, HabitConfig, StreakGoalType, StreakPeriod};

/// How the secondary fragment is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtitleStyle {
    /// Neutral progress text
    #[default]
    Normal,
    /// Daily limit exceeded
    Violation,
    /// Active streak
    Streak,
}

/// Final subtitle shown under a habit's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitSubtitle {
    pub goal_text: String,
    pub secondary_text: Option<String>,
    pub secondary_style: SubtitleStyle,
}

impl HabitSubtitle {
    pub fn has_secondary(&self) -> bool {
        self.secondary_text.is_some()
    }
}

/// Builds the subtitle for one habit on one day.
#[derive(Debug, Clone, Copy)]
pub struct SubtitleCalculator<'a> {
    config: HabitConfig,
    history: &'a CompletionHistory,
    today: NaiveDate,
    streaks: StreakCalculator<'a>,
}

impl<'a> SubtitleCalculator<'a> {
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
            streaks: StreakCalculator::new(config, history, today, calendar),
        }
    }

    pub fn calculate(&self) -> HabitSubtitle {
        let goal_text = self.goal_text();
        match self.streak_or_left_text() {
            Some((secondary, style)) => HabitSubtitle {
                goal_text,
                secondary_text: Some(secondary),
                secondary_style: style,
            },
            None => HabitSubtitle {
                goal_text,
                secondary_text: None,
                secondary_style: SubtitleStyle::Normal,
            },
        }
    }

    /// Goal line, e.g. "8 a day", "5 days a week", "Max 10 a week".
    pub fn goal_text(&self) -> String {
        let prefix = if self.config.is_quit() { "Max " } else { "" };

        if !self.config.has_larger_goal() {
            return format!("{}{} a day", prefix, self.config.daily_target());
        }

        let period = self.config.streak_goal_period().as_str();
        match self.config.streak_goal_type() {
            StreakGoalType::DayBasis => format!(
                "{}{} days a {}",
                prefix,
                self.config.streak_goal_value(),
                period
            ),
            StreakGoalType::ValueBasis => {
                format!("{}{} a {}", prefix, self.config.streak_goal_value(), period)
            }
        }
    }

    /// Secondary fragment and its style, by priority.
    pub fn streak_or_left_text(&self) -> Option<(String, SubtitleStyle)> {
        let today_count = self.history.count_on(self.today);
        let target = self.config.daily_target();

        if self.config.is_quit() && today_count > target {
            let text = if self.config.is_binary() {
                "Failed today".to_string()
            } else {
                format!("{} over limit", today_count - target)
            };
            return Some((text, SubtitleStyle::Violation));
        }

        if !self.config.is_quit() && today_count < target {
            if self.config.is_binary() {
                return None;
            }
            return Some((
                format!("{} left today", target - today_count),
                SubtitleStyle::Normal,
            ));
        }

        if let Some(streak) = self.streaks.current_streak() {
            if streak.period != StreakPeriod::Day || streak.count > 1 {
                return Some((
                    format!("{} {} streak", streak.count, streak.period.as_str()),
                    SubtitleStyle::Streak,
                ));
            }
        }

        // Build habits reaching this point are done for today
        if !self.config.is_quit() && self.config.has_larger_goal() {
            if let Some(left) = self.streaks.left_this_period().filter(|left| *left > 0) {
                return Some((
                    format!(
                        "{} left this {}",
                        left,
                        self.config.streak_goal_period().as_str()
                    ),
                    SubtitleStyle::Normal,
                ));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HabitType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subtitle(config: HabitConfig, history: &CompletionHistory, today: NaiveDate) -> HabitSubtitle {
        SubtitleCalculator::new(config, history, today, HabitCalendar::default()).calculate()
    }

    #[test]
    fn test_goal_text_variants() {
        let start = date(2026, 1, 1);
        let history = CompletionHistory::default();
        let today = date(2026, 1, 15);
        let goal = |config: HabitConfig| subtitle(config, &history, today).goal_text;

        assert_eq!(goal(HabitConfig::builder(start).daily_target(8).build()), "8 a day");
        assert_eq!(
            goal(
                HabitConfig::builder(start)
                    .streak_goal(StreakPeriod::Month, 20, StreakGoalType::DayBasis)
                    .build()
            ),
            "20 days a month"
        );
        assert_eq!(
            goal(
                HabitConfig::builder(start)
                    .daily_target(3)
                    .habit_type(HabitType::Quit)
                    .streak_goal(StreakPeriod::Week, 10, StreakGoalType::ValueBasis)
                    .build()
            ),
            "Max 10 a week"
        );
    }

    #[test]
    fn test_quit_at_limit_is_not_a_violation() {
        let config = HabitConfig::builder(date(2026, 1, 14))
            .daily_target(3)
            .habit_type(HabitType::Quit)
            .build();
        let today = date(2026, 1, 15);
        let history = CompletionHistory::from_counts([(today, 3)]);

        let result = subtitle(config, &history, today);
        assert_eq!(result.secondary_text.as_deref(), Some("2 day streak"));
        assert_eq!(result.secondary_style, SubtitleStyle::Streak);
    }

    #[test]
    fn test_binary_override_changes_violation_text() {
        let today = date(2026, 1, 15);
        let history = CompletionHistory::from_counts([(today, 3)]);
        let config = HabitConfig::builder(date(2026, 1, 1))
            .daily_target(2)
            .binary(true)
            .habit_type(HabitType::Quit)
            .build();

        assert_eq!(
            subtitle(config, &history, today).secondary_text.as_deref(),
            Some("Failed today")
        );
    }

    #[test]
    fn test_quit_weekly_goal_never_shows_left_this_period() {
        let config = HabitConfig::builder(date(2026, 1, 11))
            .habit_type(HabitType::Quit)
            .streak_goal(StreakPeriod::Week, 5, StreakGoalType::ValueBasis)
            .build();
        let today = date(2026, 1, 15);
        let history = CompletionHistory::default();

        let result = subtitle(config, &history, today);
        assert!(!result.has_secondary());
        assert_eq!(result.secondary_style, SubtitleStyle::Normal);
    }

    #[test]
    fn test_current_week_meeting_goal_shows_week_streak() {
        let config = HabitConfig::builder(date(2026, 1, 11))
            .streak_goal(StreakPeriod::Week, 2, StreakGoalType::DayBasis)
            .build();
        let today = date(2026, 1, 12);
        let history = CompletionHistory::from_counts([(date(2026, 1, 11), 1), (today, 1)]);

        assert_eq!(
            subtitle(config, &history, today).secondary_text.as_deref(),
            Some("1 week streak")
        );
    }
}
