//! Question data model
//!
//! A multiple-choice question as loaded from the question store.

use crate::{QuizError, Result};
use serde::{Deserialize, Serialize};

/// Smallest number of options a playable question can have
pub const MIN_OPTIONS: usize = 2;
/// Largest number of options the store schema can hold
pub const MAX_OPTIONS: usize = 4;

/// Immutable multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text
    pub text: String,
    /// Options in display order
    pub options: Vec<String>,
    /// Zero-based index into `options` of the right answer
    pub correct_option: usize,
}

impl Question {
    /// Create a question, rejecting option lists the session cannot play
    pub fn new(text: impl Into<String>, options: Vec<String>, correct_option: usize) -> Result<Self> {
        let question = Self {
            text: text.into(),
            options,
            correct_option,
        };
        question.validate()?;
        Ok(question)
    }

    /// Validate option count and correct index
    pub fn validate(&self) -> Result<()> {
        if self.options.len() < MIN_OPTIONS || self.options.len() > MAX_OPTIONS {
            return Err(QuizError::InvalidQuestion(format!(
                "Question '{}' has {} options (expected {}..={})",
                self.text,
                self.options.len(),
                MIN_OPTIONS,
                MAX_OPTIONS
            )));
        }

        if self.correct_option >= self.options.len() {
            return Err(QuizError::InvalidOption {
                index: self.correct_option,
                count: self.options.len(),
            });
        }

        Ok(())
    }

    /// Check whether the given option index is the right answer
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_option
    }

    /// Text of the right answer
    pub fn correct_option_text(&self) -> &str {
        self.options
            .get(self.correct_option)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_question_creation() {
        let q = Question::new("2 + 2?", options(&["3", "4", "5"]), 1).unwrap();
        assert_eq!(q.option_count(), 3);
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
        assert_eq!(q.correct_option_text(), "4");
    }

    #[test]
    fn test_correct_index_out_of_range() {
        let err = Question::new("?", options(&["a", "b"]), 2).unwrap_err();
        assert!(matches!(err, QuizError::InvalidOption { index: 2, count: 2 }));
    }

    #[test]
    fn test_option_count_bounds() {
        assert!(Question::new("?", options(&["only"]), 0).is_err());
        assert!(Question::new("?", options(&["a", "b", "c", "d", "e"]), 0).is_err());
        assert!(Question::new("?", options(&["a", "b", "c", "d"]), 3).is_ok());
    }
}
