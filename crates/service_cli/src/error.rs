//! CLI error types

use payment_schedules::schedules::ScheduleError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI-specific result type
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is malformed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Schedule generation or review failed
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `check` found problems with the configuration or its schedule
    #[error("{0} issue(s) found")]
    IssuesFound(usize),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV rendering error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML rendering error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}
