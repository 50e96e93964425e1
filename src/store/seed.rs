//! Built-in question bank
//!
//! Loaded into an empty database so a fresh install has something to play.

use crate::models::Question;
use crate::Result;
use serde::Deserialize;

const DEFAULT_BANK: &str = include_str!("../../data/questions.json");

/// Questions of one category as laid out in the bank file
#[derive(Debug, Clone, Deserialize)]
pub struct SeedCategory {
    pub category: String,
    pub questions: Vec<Question>,
}

/// Parse the question bank shipped with the binary
pub fn default_question_bank() -> Result<Vec<SeedCategory>> {
    parse_question_bank(DEFAULT_BANK)
}

/// Parse and validate a question bank in the JSON bank format
pub fn parse_question_bank(json: &str) -> Result<Vec<SeedCategory>> {
    let bank: Vec<SeedCategory> = serde_json::from_str(json)?;
    for category in &bank {
        for question in &category.questions {
            question.validate()?;
        }
    }
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bank_is_valid() {
        let bank = default_question_bank().unwrap();
        let names: Vec<&str> = bank.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Maths", "Java", "Python"]);
        assert!(bank.iter().all(|c| !c.questions.is_empty()));
    }

    #[test]
    fn test_invalid_bank_rejected() {
        let json = r#"[{"category": "X", "questions": [
            {"text": "?", "options": ["a", "b"], "correct_option": 5}
        ]}]"#;
        assert!(parse_question_bank(json).is_err());
    }
}
