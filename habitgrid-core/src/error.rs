//! Error types for habitgrid-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the habitgrid-core library
///
/// Only the loading edges (config, snapshot files) produce errors. The goal
/// engine itself is total over its inputs and never returns one.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Habit definition outside the supported domain
    #[error("invalid habit: {0}")]
    InvalidHabit(String),

    /// Snapshot file could not be used
    #[error("snapshot error in {path:?}: {message}")]
    Snapshot { path: PathBuf, message: String },
}

/// Result type alias for habitgrid-core
pub type Result<T> = std::result::Result<T, Error>;
