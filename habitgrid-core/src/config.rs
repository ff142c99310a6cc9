//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/habitgrid/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/habitgrid/` (~/.config/habitgrid/)
//! - State/Logs: `$XDG_STATE_HOME/habitgrid/` (~/.local/state/habitgrid/)

use crate::calendar::HabitCalendar;
use crate::error::{Error, Result};
use crate::goals::DEFAULT_GRID_WEEKS;
use chrono::{FixedOffset, Weekday};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Largest grid the CLI will render (ten years of weeks).
pub const MAX_GRID_WEEKS: u32 = 520;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Week start and timezone used to turn timestamps into days
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Contribution grid settings
    #[serde(default)]
    pub grid: GridConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Calendar configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CalendarConfig {
    /// First day of the week ("sunday", "monday", "mon", ...)
    #[serde(default = "default_first_weekday")]
    pub first_weekday: String,

    /// Offset from UTC in minutes, east positive
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_weekday: default_first_weekday(),
            utc_offset_minutes: 0,
        }
    }
}

fn default_first_weekday() -> String {
    "sunday".to_string()
}

impl CalendarConfig {
    /// Build the calendar every evaluation runs against.
    pub fn to_calendar(&self) -> Result<HabitCalendar> {
        let first_weekday: Weekday = self.first_weekday.trim().parse().map_err(|_| {
            Error::Config(format!(
                "calendar.first_weekday is not a weekday: {:?}",
                self.first_weekday
            ))
        })?;

        let offset = self
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                Error::Config(format!(
                    "calendar.utc_offset_minutes out of range: {}",
                    self.utc_offset_minutes
                ))
            })?;

        Ok(HabitCalendar::default()
            .with_first_weekday(first_weekday)
            .with_offset(offset))
    }
}

/// Contribution grid configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GridConfig {
    /// Number of week columns shown
    #[serde(default = "default_grid_weeks")]
    pub weeks: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            weeks: default_grid_weeks(),
        }
    }
}

fn default_grid_weeks() -> u32 {
    DEFAULT_GRID_WEEKS
}

impl GridConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        validate_grid_weeks(self.weeks)
    }
}

/// Check a grid width from config or the command line.
pub fn validate_grid_weeks(weeks: u32) -> Result<()> {
    if weeks == 0 || weeks > MAX_GRID_WEEKS {
        return Err(Error::Config(format!(
            "grid.weeks must be between 1 and {}",
            MAX_GRID_WEEKS
        )));
    }
    Ok(())
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.grid.validate()?;
        config.calendar.to_calendar()?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/habitgrid/config.toml` (~/.config/habitgrid/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("habitgrid").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/habitgrid/` (~/.local/state/habitgrid/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("habitgrid")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/habitgrid/habitgrid.log` (~/.local/state/habitgrid/habitgrid.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("habitgrid.log")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// For CLI binaries that want stable path behavior before anything else
    /// reads these variables.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}
