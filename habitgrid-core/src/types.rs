//! Core domain types for habitgrid
//!
//! These types describe a habit and its completion history in the shape the
//! goal engine consumes. Loose, persisted records ([`HabitRecord`],
//! [`CompletionRecord`]) are resolved once into immutable evaluation inputs
//! ([`HabitConfig`], [`CompletionHistory`]) so that no consumer has to apply
//! defaults on its own.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Build habit** | Higher counts are better; a day succeeds at or above its target |
//! | **Quit habit** | Counts are violations; a day succeeds at or below its limit |
//! | **Binary habit** | A habit whose daily target is 1, completion is yes/no |
//! | **Daily target** | Completions (build) or allowed violations (quit) for one day |
//! | **Streak goal** | A target over a day, week or month, counted in days or in value |

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::HabitCalendar;

// ============================================
// Enumerations
// ============================================

/// Whether a habit is being built up or quit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitType {
    /// Higher counts are better
    #[default]
    Build,
    /// Counts are violations, lower is better
    Quit,
}

impl HabitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitType::Build => "build",
            HabitType::Quit => "quit",
        }
    }
}

impl std::str::FromStr for HabitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(HabitType::Build),
            "quit" => Ok(HabitType::Quit),
            _ => Err(format!("unknown habit type: {}", s)),
        }
    }
}

/// Period a streak goal is measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPeriod {
    #[default]
    Day,
    Week,
    Month,
}

impl StreakPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakPeriod::Day => "day",
            StreakPeriod::Week => "week",
            StreakPeriod::Month => "month",
        }
    }
}

impl std::str::FromStr for StreakPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(StreakPeriod::Day),
            "week" => Ok(StreakPeriod::Week),
            "month" => Ok(StreakPeriod::Month),
            _ => Err(format!("unknown streak period: {}", s)),
        }
    }
}

/// How a streak goal value is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakGoalType {
    /// Count qualifying days in the period
    DayBasis,
    /// Sum raw counts across the period
    #[default]
    ValueBasis,
}

impl StreakGoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakGoalType::DayBasis => "day_basis",
            StreakGoalType::ValueBasis => "value_basis",
        }
    }
}

impl std::str::FromStr for StreakGoalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day_basis" => Ok(StreakGoalType::DayBasis),
            "value_basis" => Ok(StreakGoalType::ValueBasis),
            _ => Err(format!("unknown streak goal type: {}", s)),
        }
    }
}

// ============================================
// Persisted records
// ============================================

/// A habit as stored upstream, with optional legacy fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitRecord {
    /// Display name
    pub name: String,
    /// When the habit was created
    pub created_at: DateTime<Utc>,
    /// Explicit tracking start day; falls back to the day of `created_at`
    #[serde(default)]
    pub habit_start_date: Option<NaiveDate>,
    /// Build or quit; records written before quit habits existed omit it
    #[serde(default)]
    pub habit_type: Option<HabitType>,
    /// Binary override; derived from the daily target when absent
    #[serde(default)]
    pub is_binary: Option<bool>,
    /// Daily target as stored (may be out of range in old records)
    #[serde(default = "default_completions_per_day")]
    pub completions_per_day: i64,
    /// Streak goal value; defaults to the daily target
    #[serde(default)]
    pub streak_goal_value: Option<i64>,
    /// Streak goal period; defaults to a daily goal
    #[serde(default)]
    pub streak_goal_period: Option<StreakPeriod>,
    /// Streak goal basis; defaults to value basis
    #[serde(default)]
    pub streak_goal_type: Option<StreakGoalType>,
}

fn default_completions_per_day() -> i64 {
    1
}

/// One stored completion entry for a habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Timestamp of the completion; truncated to its calendar day
    pub date: DateTime<Utc>,
    /// Completion (or violation) count for that day
    #[serde(default = "default_completion_count")]
    pub count: i64,
}

fn default_completion_count() -> i64 {
    1
}

// ============================================
// Evaluation inputs
// ============================================

/// Immutable habit configuration consumed by the goal engine.
///
/// Construct with [`HabitConfig::builder`] or [`HabitConfig::from_record`];
/// both guarantee `daily_target >= 1` and `streak_goal_value >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitConfig {
    habit_start_date: NaiveDate,
    daily_target: u32,
    habit_type: HabitType,
    is_binary: bool,
    streak_goal_period: StreakPeriod,
    streak_goal_value: u32,
    streak_goal_type: StreakGoalType,
}

impl HabitConfig {
    /// Start building a config for a habit tracked from `habit_start_date`.
    pub fn builder(habit_start_date: NaiveDate) -> HabitConfigBuilder {
        HabitConfigBuilder {
            habit_start_date,
            daily_target: 1,
            habit_type: None,
            is_binary: None,
            streak_goal_period: None,
            streak_goal_value: None,
            streak_goal_type: None,
        }
    }

    /// Resolve a stored record into an evaluation config.
    pub fn from_record(record: &HabitRecord, calendar: &HabitCalendar) -> Self {
        let start = record
            .habit_start_date
            .unwrap_or_else(|| calendar.day_of(record.created_at));

        HabitConfigBuilder {
            habit_start_date: start,
            daily_target: record.completions_per_day,
            habit_type: record.habit_type,
            is_binary: record.is_binary,
            streak_goal_period: record.streak_goal_period,
            streak_goal_value: record.streak_goal_value,
            streak_goal_type: record.streak_goal_type,
        }
        .build()
    }

    /// First day that counts toward any goal.
    pub fn habit_start_date(&self) -> NaiveDate {
        self.habit_start_date
    }

    /// Completions (build) or allowed violations (quit) for one day.
    pub fn daily_target(&self) -> u32 {
        self.daily_target
    }

    pub fn habit_type(&self) -> HabitType {
        self.habit_type
    }

    pub fn is_quit(&self) -> bool {
        self.habit_type == HabitType::Quit
    }

    pub fn is_binary(&self) -> bool {
        self.is_binary
    }

    pub fn streak_goal_period(&self) -> StreakPeriod {
        self.streak_goal_period
    }

    pub fn streak_goal_value(&self) -> u32 {
        self.streak_goal_value
    }

    pub fn streak_goal_type(&self) -> StreakGoalType {
        self.streak_goal_type
    }

    /// Whether the streak goal spans more than a single day.
    pub fn has_larger_goal(&self) -> bool {
        self.streak_goal_period != StreakPeriod::Day
    }

    /// Whether one day's count satisfies the per-day target.
    ///
    /// Build: `count >= target`. Quit: `count <= target`.
    pub fn day_meets_target(&self, count: u32) -> bool {
        match self.habit_type {
            HabitType::Build => count >= self.daily_target,
            HabitType::Quit => count <= self.daily_target,
        }
    }

    /// Whether the day shows as fully done.
    ///
    /// Stricter than [`day_meets_target`](Self::day_meets_target) for quit
    /// habits: only a day with zero violations is complete.
    pub fn is_day_complete(&self, count: u32) -> bool {
        match self.habit_type {
            HabitType::Build => count >= self.daily_target,
            HabitType::Quit => count == 0,
        }
    }
}

/// Builder for [`HabitConfig`]; unset fields take the habit defaults.
#[derive(Debug, Clone)]
pub struct HabitConfigBuilder {
    habit_start_date: NaiveDate,
    daily_target: i64,
    habit_type: Option<HabitType>,
    is_binary: Option<bool>,
    streak_goal_period: Option<StreakPeriod>,
    streak_goal_value: Option<i64>,
    streak_goal_type: Option<StreakGoalType>,
}

impl HabitConfigBuilder {
    /// Daily target; values below 1 are raised to 1.
    pub fn daily_target(mut self, target: i64) -> Self {
        self.daily_target = target;
        self
    }

    pub fn habit_type(mut self, habit_type: HabitType) -> Self {
        self.habit_type = Some(habit_type);
        self
    }

    /// Override the binary flag instead of deriving it from the target.
    pub fn binary(mut self, is_binary: bool) -> Self {
        self.is_binary = Some(is_binary);
        self
    }

    /// Set the streak goal; the value is raised to 1 if lower.
    pub fn streak_goal(mut self, period: StreakPeriod, value: i64, basis: StreakGoalType) -> Self {
        self.streak_goal_period = Some(period);
        self.streak_goal_value = Some(value);
        self.streak_goal_type = Some(basis);
        self
    }

    pub fn build(self) -> HabitConfig {
        let daily_target = clamp_positive(self.daily_target);
        let streak_goal_value = self
            .streak_goal_value
            .map(clamp_positive)
            .unwrap_or(daily_target);

        HabitConfig {
            habit_start_date: self.habit_start_date,
            daily_target,
            habit_type: self.habit_type.unwrap_or_default(),
            is_binary: self.is_binary.unwrap_or(daily_target == 1),
            streak_goal_period: self.streak_goal_period.unwrap_or_default(),
            streak_goal_value,
            streak_goal_type: self.streak_goal_type.unwrap_or_default(),
        }
    }
}

fn clamp_positive(value: i64) -> u32 {
    u32::try_from(value.max(1)).unwrap_or(u32::MAX)
}

/// Sparse per-day completion counts. Absent days count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionHistory {
    counts: BTreeMap<NaiveDate, u32>,
}

impl CompletionHistory {
    /// Flatten stored completion records into per-day counts.
    ///
    /// Timestamps are truncated to their calendar day. Negative counts become
    /// zero, and when two records share a day the later one wins.
    pub fn from_records(records: &[CompletionRecord], calendar: &HabitCalendar) -> Self {
        let counts = records
            .iter()
            .map(|record| {
                let count = u32::try_from(record.count.max(0)).unwrap_or(u32::MAX);
                (calendar.day_of(record.date), count)
            })
            .collect();
        Self { counts }
    }

    /// Build a history from day/count pairs.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, u32)>,
    {
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    /// Count recorded on `day`, zero when nothing was recorded.
    pub fn count_on(&self, day: NaiveDate) -> u32 {
        self.counts.get(&day).copied().unwrap_or(0)
    }

    /// Number of days with an entry (including explicit zeros).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in day order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.counts.iter().map(|(day, count)| (*day, *count))
    }
}

impl FromIterator<(NaiveDate, u32)> for CompletionHistory {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, u32)>>(iter: I) -> Self {
        Self::from_counts(iter)
    }
}
