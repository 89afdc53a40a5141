//! Error types for the scheduler.

use thiserror::Error;

/// Errors that can occur in scheduler operations.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Invalid date '{0}'. Expected YYYYMMDD")]
    BadDateFormat(String),

    #[error("Repeat rule is empty")]
    EmptyRule,

    #[error("Invalid day interval: {0}")]
    InvalidInterval(String),

    #[error("Unsupported repeat rule: {0}")]
    UnsupportedRule(String),

    #[error("Date out of range while advancing from {0}")]
    DateOutOfRange(String),

    #[error("Task title is required")]
    MissingTitle,

    #[error("Task id is required")]
    MissingId,

    #[error("Field '{field}' is longer than {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchedulerError {
    /// Whether the error was caused by the caller's input rather than by
    /// the storage layer or the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SchedulerError::BadDateFormat(_)
                | SchedulerError::EmptyRule
                | SchedulerError::InvalidInterval(_)
                | SchedulerError::UnsupportedRule(_)
                | SchedulerError::DateOutOfRange(_)
                | SchedulerError::MissingTitle
                | SchedulerError::MissingId
                | SchedulerError::FieldTooLong { .. }
        )
    }
}

impl From<rusqlite::Error> for SchedulerError {
    fn from(err: rusqlite::Error) -> Self {
        SchedulerError::Store(err.to_string())
    }
}

/// Result type alias for scheduler operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;
