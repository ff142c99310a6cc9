//! # habitgrid-core
//!
//! Core library for habitgrid - goal and streak evaluation for habit trackers.
//!
//! This library provides:
//! - Domain types for habits and their completion history
//! - An explicit calendar (week start and timezone) threaded through every computation
//! - The goal engine: grid indicators, streaks, subtitles and day cells
//! - Habit snapshot files, configuration and logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through two layers:
//! - **Records:** loose stored shapes ([`HabitRecord`], [`CompletionRecord`]), validated on load
//! - **Evaluation inputs:** [`HabitConfig`] and [`CompletionHistory`] with every default
//!   resolved, consumed by the pure functions in [`goals`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use habitgrid_core::goals;
//! use habitgrid_core::snapshot::HabitSnapshot;
//! use habitgrid_core::Config;
//!
//! let config = Config::load().expect("failed to load config");
//! let calendar = config.calendar.to_calendar().expect("invalid calendar");
//!
//! let snapshot = HabitSnapshot::load_from(std::path::Path::new("habit.toml")).expect("failed to load habit");
//! let (habit, history) = snapshot.evaluation_inputs(&calendar).expect("invalid habit");
//!
//! let today = calendar.today();
//! let subtitle = goals::compose_subtitle(&habit, &history, today, &calendar);
//! println!("{}", subtitle.goal_text);
//! ```

// Re-export commonly used items at the crate root
pub use calendar::HabitCalendar;
pub use config::Config;
pub use error::{Error, Result};
pub use snapshot::HabitSnapshot;
pub use types::*;

// Public modules
pub mod calendar;
pub mod config;
pub mod error;
pub mod goals;
pub mod logging;
pub mod snapshot;
pub mod types;
