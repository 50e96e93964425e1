//! quizterm - terminal quiz application
//!
//! Users register or log in, pick a category, answer timed multiple-choice
//! questions and get a score. Session logic and screen flow are independent
//! of both the terminal surface and the SQLite store.

// Public re-exports
pub mod app;
pub mod auth;
pub mod config;
pub mod logging;
pub mod models;
pub mod quiz;
pub mod store;

use thiserror::Error;

// Common error types
#[derive(Debug, Error)]
pub enum QuizError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Configuration validation or parsing error
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Underlying database failure
    #[error("Store error: {0}")]
    StoreError(#[from] rusqlite::Error),
    /// Registration attempted for a username that is already taken
    #[error("User already exists: {0}")]
    UserExists(String),
    /// Username or password rejected before reaching the store
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
    /// Stored question that cannot be played as-is
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
    /// Password hashing or verification failure
    #[error("Password hashing error: {0}")]
    HashError(String),
    /// Results persistence error
    #[error("Results persistence error: {0}")]
    PersistenceError(String),
    /// TUI rendering or interaction error
    #[error("TUI error: {0}")]
    TuiError(String),
    /// Selected option does not exist on the current question
    #[error("Invalid option {index} for a question with {count} options")]
    InvalidOption { index: usize, count: usize },
    /// Session already reached its terminal state
    #[error("Quiz session already completed")]
    SessionCompleted,
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for QuizError {
    fn from(err: toml::de::Error) -> Self {
        QuizError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for QuizError {
    fn from(err: toml::ser::Error) -> Self {
        QuizError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for quizterm operations
pub type Result<T> = std::result::Result<T, QuizError>;

/// Error handling utilities
pub mod error {
    use super::QuizError;

    /// Message shown to the user when a store call fails.
    pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

    /// Convert error to user-friendly message
    pub fn user_friendly_message(error: &QuizError) -> String {
        match error {
            QuizError::StoreError(_) | QuizError::IoError(_) | QuizError::HashError(_) => {
                GENERIC_FAILURE.to_string()
            }
            QuizError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            QuizError::PersistenceError(_) => {
                "Failed to save quiz result. Check disk space and permissions.".to_string()
            }
            QuizError::SessionCompleted => "This quiz is already finished.".to_string(),
            QuizError::InvalidCredentials(msg) => format!("{}.", msg),
            _ => error.to_string(),
        }
    }

    /// Whether the error is an infrastructure failure rather than a
    /// rejected request (taken username, invalid input)
    pub fn is_store_failure(error: &QuizError) -> bool {
        matches!(
            error,
            QuizError::StoreError(_) | QuizError::IoError(_) | QuizError::HashError(_)
        )
    }
}

// Common types and constants
pub const APP_NAME: &str = "quizterm";
pub const CONFIG_FILE: &str = "quizterm.toml";
pub const DATABASE_FILE: &str = "quiz.db";
pub const RESULTS_FILE: &str = "results.json";
pub const LOG_FILE: &str = "quizterm.log";
pub const MAX_RESULTS_HISTORY: usize = 100;
pub const DEFAULT_QUESTION_SECONDS: u32 = 15;
pub const DEFAULT_WARNING_THRESHOLD: u32 = 5;
