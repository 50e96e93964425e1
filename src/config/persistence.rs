//! Results persistence module
//!
//! Handles saving, loading, and rotation of completed quiz results.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::data_dir;
use crate::models::QuizResult;
use crate::{QuizError, Result, MAX_RESULTS_HISTORY, RESULTS_FILE};

/// Results storage manager
#[derive(Debug, Clone)]
pub struct ResultsStorage {
    results_path: PathBuf,
}

/// Results file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
struct ResultsFile {
    version: u32,
    results: Vec<QuizResult>,
}

impl ResultsStorage {
    /// Create a results storage manager at the standard location
    pub fn new() -> Result<Self> {
        Ok(Self::at(Self::results_file_path()?))
    }

    /// Create a results storage manager backed by an explicit file
    pub fn at(results_path: impl Into<PathBuf>) -> Self {
        Self {
            results_path: results_path.into(),
        }
    }

    /// Get the standard results file path
    /// Uses $DATA_HOME/quizterm/results.json
    pub fn results_file_path() -> Result<PathBuf> {
        Ok(data_dir()?.join(RESULTS_FILE))
    }

    /// Load all results from the results file, oldest first
    pub fn load_results(&self) -> Result<Vec<QuizResult>> {
        if !self.results_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.results_path).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to read results file {}: {}",
                self.results_path.display(),
                e
            ))
        })?;

        let results_file: ResultsFile = serde_json::from_str(&content).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to parse results file {}: {}",
                self.results_path.display(),
                e
            ))
        })?;

        Ok(results_file.results)
    }

    /// Append a new result to the results file
    /// Drops the oldest results once MAX_RESULTS_HISTORY is exceeded
    pub fn append_result(&self, result: QuizResult) -> Result<()> {
        let mut results = self.load_results()?;
        results.push(result);

        if results.len() > MAX_RESULTS_HISTORY {
            let skip_count = results.len() - MAX_RESULTS_HISTORY;
            results.drain(..skip_count);
        }

        self.save_results(results)
    }

    fn save_results(&self, results: Vec<QuizResult>) -> Result<()> {
        if let Some(parent) = self.results_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::PersistenceError(format!(
                    "Failed to create results directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let results_file = ResultsFile {
            version: 1,
            results,
        };

        let content = serde_json::to_string_pretty(&results_file)?;

        fs::write(&self.results_path, content).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to write results file {}: {}",
                self.results_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Most recent `count` results of one user, newest first
    pub fn recent_for_user(&self, username: &str, count: usize) -> Result<Vec<QuizResult>> {
        Ok(self
            .load_results()?
            .into_iter()
            .rev()
            .filter(|r| r.username == username)
            .take(count)
            .collect())
    }

    /// Best score ratio a user reached in a category
    pub fn best_for(&self, username: &str, category: &str) -> Result<Option<QuizResult>> {
        Ok(self
            .load_results()?
            .into_iter()
            .filter(|r| r.username == username && r.category == category)
            .max_by(|a, b| a.ratio().total_cmp(&b.ratio())))
    }

    pub fn path(&self) -> &Path {
        &self.results_path
    }
}
