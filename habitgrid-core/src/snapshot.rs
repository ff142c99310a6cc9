//! Habit snapshot files
//!
//! A snapshot is one habit and its completions, stored as TOML:
//!
//! ```toml
//! [habit]
//! name = "Read"
//! created_at = "2026-01-01T08:00:00Z"
//! completions_per_day = 1
//! streak_goal_period = "week"
//! streak_goal_value = 3
//! streak_goal_type = "day_basis"
//!
//! [[completions]]
//! date = "2026-01-04T09:30:00Z"
//! count = 1
//! ```
//!
//! Timestamps and dates are quoted RFC 3339 strings. This is the only place
//! the crate rejects input; once [`HabitSnapshot::evaluation_inputs`]
//! succeeds the engine accepts whatever it is given.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calendar::HabitCalendar;
use crate::error::{Error, Result};
use crate::types::{CompletionHistory, CompletionRecord, HabitConfig, HabitRecord};

/// One habit with its stored completions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitSnapshot {
    pub habit: HabitRecord,
    #[serde(default)]
    pub completions: Vec<CompletionRecord>,
}

impl HabitSnapshot {
    /// Read and parse a snapshot file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Snapshot {
            path: path.to_path_buf(),
            message: format!("failed to read file: {}", e),
        })?;

        let snapshot = Self::from_toml_str(&content).map_err(|e| Error::Snapshot {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            path = %path.display(),
            habit = %snapshot.habit.name,
            completions = snapshot.completions.len(),
            "Loaded habit snapshot"
        );

        Ok(snapshot)
    }

    /// Parse a snapshot from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check the stored values against the supported domain.
    pub fn validate(&self) -> Result<()> {
        let habit = &self.habit;

        if habit.completions_per_day < 1 {
            return Err(Error::InvalidHabit(format!(
                "{}: completions_per_day must be at least 1, got {}",
                habit.name, habit.completions_per_day
            )));
        }

        if let Some(value) = habit.streak_goal_value.filter(|value| *value < 1) {
            return Err(Error::InvalidHabit(format!(
                "{}: streak_goal_value must be at least 1, got {}",
                habit.name, value
            )));
        }

        if let Some(record) = self.completions.iter().find(|record| record.count < 0) {
            return Err(Error::InvalidHabit(format!(
                "{}: negative completion count {} on {}",
                habit.name,
                record.count,
                record.date.to_rfc3339()
            )));
        }

        Ok(())
    }

    /// Validate, then resolve the habit and its history for evaluation.
    pub fn evaluation_inputs(
        &self,
        calendar: &HabitCalendar,
    ) -> Result<(HabitConfig, CompletionHistory)> {
        self.validate()?;

        let config = HabitConfig::from_record(&self.habit, calendar);
        let history = CompletionHistory::from_records(&self.completions, calendar);
        Ok((config, history))
    }
}
