//! File logging setup
//!
//! The terminal belongs to the UI, so tracing output goes to a log file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{QuizError, Result};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "quizterm=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to `path` (appending)
pub fn init_file_logger(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| QuizError::ConfigError(format!("Failed to install logger: {}", e)))?;

    info!(path = %path.display(), "file logger initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_logger_writes_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("quizterm.log");

        init_file_logger(&path).unwrap();
        tracing::warn!(target: "quizterm", "hello from the test");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("file logger initialized"));
        assert!(content.contains("hello from the test"));

        // second global install is refused
        assert!(init_file_logger(&path).is_err());
    }
}
