//! Quiz result data model
//!
//! A finished session's outcome, persisted to the results history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one completed quiz session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    /// When the session completed
    pub timestamp: DateTime<Utc>,
    /// Player who took the quiz
    pub username: String,
    /// Category the questions came from
    pub category: String,
    /// Number of correctly answered questions
    pub score: usize,
    /// Number of questions in the session
    pub total: usize,
}

impl QuizResult {
    /// Create a result stamped with the current time
    pub fn new(
        username: impl Into<String>,
        category: impl Into<String>,
        score: usize,
        total: usize,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            username: username.into(),
            category: category.into(),
            score,
            total,
        }
    }

    /// Fraction of correct answers, 0.0 for an empty quiz
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64
        }
    }
}
