//! Configuration management module
//!
//! Handles loading, saving, and validation of application settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    QuizError, Result, APP_NAME, CONFIG_FILE, DATABASE_FILE, DEFAULT_QUESTION_SECONDS,
    DEFAULT_WARNING_THRESHOLD, LOG_FILE,
};

pub mod persistence;

/// Longest time limit a question may be given, in seconds
pub const MAX_QUESTION_SECONDS: u32 = 300;

/// Application settings read from `quizterm.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// SQLite database holding users and questions
    pub database_path: PathBuf,
    /// Seconds allowed per question
    pub question_seconds: u32,
    /// Countdown value at which the timer is highlighted
    pub warning_threshold: u32,
    /// Shuffle question order when a quiz starts
    pub shuffle_questions: bool,
    /// Log output file
    pub log_file: PathBuf,
}

impl Default for QuizConfig {
    fn default() -> Self {
        let data_dir = data_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            database_path: data_dir.join(DATABASE_FILE),
            question_seconds: DEFAULT_QUESTION_SECONDS,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            shuffle_questions: false,
            log_file: data_dir.join(LOG_FILE),
        }
    }
}

impl QuizConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(QuizError::ConfigError(
                "Database path must not be empty".to_string(),
            ));
        }

        if self.question_seconds == 0 || self.question_seconds > MAX_QUESTION_SECONDS {
            return Err(QuizError::ConfigError(format!(
                "Question time must be between 1 and {} seconds",
                MAX_QUESTION_SECONDS
            )));
        }

        if self.warning_threshold >= self.question_seconds {
            return Err(QuizError::ConfigError(format!(
                "Warning threshold ({}s) must be below the question time ({}s)",
                self.warning_threshold, self.question_seconds
            )));
        }

        Ok(())
    }

    /// Set the database path
    pub fn with_database_path(mut self, path: PathBuf) -> Self {
        self.database_path = path;
        self
    }

    /// Set the time limit per question
    pub fn with_question_seconds(mut self, seconds: u32) -> Self {
        self.question_seconds = seconds;
        self
    }

    /// Set the timer warning threshold
    pub fn with_warning_threshold(mut self, seconds: u32) -> Self {
        self.warning_threshold = seconds;
        self
    }

    /// Set whether questions are shuffled
    pub fn with_shuffle_questions(mut self, shuffle: bool) -> Self {
        self.shuffle_questions = shuffle;
        self
    }

    /// Load configuration from the standard config file location,
    /// writing the defaults there on first start
    pub fn load() -> Result<Self> {
        Self::load_or_create(&Self::config_file_path()?)
    }

    /// Load configuration from `config_path`, creating it with defaults if missing
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            return Self::load_from(config_path);
        }
        let config = Self::default();
        config.save_to(config_path)?;
        Ok(config)
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/quizterm/quizterm.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            QuizError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

/// Application data directory ($DATA_HOME/quizterm)
pub fn data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        QuizError::ConfigError("Unable to determine data directory".to_string())
    })?;

    Ok(data_dir.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = QuizConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.question_seconds, 15);
        assert_eq!(config.warning_threshold, 5);
        assert!(!config.shuffle_questions);
        assert!(config.database_path.ends_with(DATABASE_FILE));
    }

    #[test]
    fn test_validation_rejects_bad_timer() {
        assert!(QuizConfig::new().with_question_seconds(0).validate().is_err());
        assert!(QuizConfig::new()
            .with_question_seconds(MAX_QUESTION_SECONDS + 1)
            .validate()
            .is_err());
        assert!(QuizConfig::new()
            .with_question_seconds(10)
            .with_warning_threshold(10)
            .validate()
            .is_err());
        assert!(QuizConfig::new()
            .with_database_path(PathBuf::new())
            .validate()
            .is_err());
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("conf").join(CONFIG_FILE);
        let config = QuizConfig::new()
            .with_question_seconds(20)
            .with_shuffle_questions(true)
            .with_database_path(temp_dir.path().join("quiz.db"));

        config.save_to(&path).unwrap();
        let loaded = QuizConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "question_seconds = 30\n").unwrap();

        let loaded = QuizConfig::load_from(&path).unwrap();
        assert_eq!(loaded.question_seconds, 30);
        assert_eq!(loaded.warning_threshold, DEFAULT_WARNING_THRESHOLD);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = QuizConfig::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, QuizConfig::default());
    }

    #[test]
    fn test_first_start_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(APP_NAME).join(CONFIG_FILE);

        let created = QuizConfig::load_or_create(&path).unwrap();
        assert_eq!(created, QuizConfig::default());
        assert!(path.exists());

        fs::write(&path, "question_seconds = 42\n").unwrap();
        let edited = QuizConfig::load_or_create(&path).unwrap();
        assert_eq!(edited.question_seconds, 42);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "question_seconds = \"soon\"\n").unwrap();
        assert!(matches!(
            QuizConfig::load_from(&path),
            Err(QuizError::ConfigError(_))
        ));
    }

    #[test]
    fn test_config_file_path() {
        let path = QuizConfig::config_file_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("quizterm"));
        assert!(path.to_string_lossy().contains("quizterm.toml"));
    }
}
