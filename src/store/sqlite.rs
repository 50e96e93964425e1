//! SQLite-backed user and question store

use std::path::Path;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::{debug, info, warn};

use super::seed::{default_question_bank, SeedCategory};
use super::{QuestionStore, UserStore};
use crate::auth::{hash_password, validate_credentials, verify_password};
use crate::models::question::MAX_OPTIONS;
use crate::models::{Question, User};
use crate::{QuizError, Result};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY NOT NULL,
    password TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL,
    text TEXT NOT NULL,
    option1 TEXT NOT NULL,
    option2 TEXT NOT NULL,
    option3 TEXT,
    option4 TEXT,
    correct_option INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category);
";

/// Raw question row before option trimming and validation
type QuestionRow = (String, [Option<String>; MAX_OPTIONS], i64);

/// Log row-parse errors instead of silently discarding them.
fn log_and_skip_err<T>(result: std::result::Result<T, rusqlite::Error>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(error = %e, "question row parse error (skipped)");
            None
        }
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

/// User and question store over a single SQLite database
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database file and ensure the schema
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened quiz database");
        Self::with_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert one question under a category
    pub fn insert_question(&self, category: &str, question: &Question) -> Result<()> {
        question.validate()?;
        let option = |i: usize| question.options.get(i).map(String::as_str);
        self.conn.execute(
            "INSERT INTO questions
                (category, text, option1, option2, option3, option4, correct_option)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                category,
                question.text,
                option(0),
                option(1),
                option(2),
                option(3),
                question.correct_option as i64,
            ],
        )?;
        Ok(())
    }

    /// Insert every question of a bank inside one transaction
    pub fn import_bank(&self, bank: &[SeedCategory]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        for category in bank {
            for question in &category.questions {
                self.insert_question(&category.category, question)?;
                inserted += 1;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Load the built-in bank when the questions table is empty
    pub fn seed_defaults(&self) -> Result<usize> {
        if self.question_count()? > 0 {
            return Ok(0);
        }
        let inserted = self.import_bank(&default_question_bank()?)?;
        info!(inserted, "seeded default question bank");
        Ok(inserted)
    }

    /// Total number of stored questions
    pub fn question_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn find_user(&self, username: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT username, password FROM users WHERE username = ?1",
                params![username],
                |row| Ok(User::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        Ok(user)
    }

    fn row_to_question(row: QuestionRow) -> Result<Question> {
        let (text, columns, correct) = row;
        let mut slots: Vec<Option<String>> = columns
            .into_iter()
            .map(|column| column.filter(|option| !option.trim().is_empty()))
            .collect();
        // only trailing columns may be left empty
        while matches!(slots.last(), Some(None)) {
            slots.pop();
        }
        let options: Vec<String> = slots.into_iter().collect::<Option<_>>().ok_or_else(|| {
            QuizError::InvalidQuestion(format!("'{}' has an empty option before a filled one", text))
        })?;
        let count = options.len();
        let correct_option = usize::try_from(correct)
            .map_err(|_| QuizError::InvalidOption { index: usize::MAX, count })?;
        Question::new(text, options, correct_option)
    }
}

impl UserStore for SqliteStore {
    fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        match self.find_user(username)? {
            Some(user) => verify_password(password, &user.password_hash),
            None => {
                debug!(username, "no such user");
                Ok(false)
            }
        }
    }

    fn register(&self, username: &str, password: &str) -> Result<()> {
        validate_credentials(username, password)?;
        let hash = hash_password(password)?;
        self.conn
            .execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2)",
                params![username, hash],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    QuizError::UserExists(username.to_string())
                } else {
                    QuizError::StoreError(e)
                }
            })?;
        Ok(())
    }
}

impl QuestionStore for SqliteStore {
    fn categories(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category FROM questions GROUP BY category ORDER BY MIN(id)")?;
        let categories = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .filter_map(log_and_skip_err)
            .collect();
        Ok(categories)
    }

    fn questions_for(&self, category: &str) -> Result<Vec<Question>> {
        let mut stmt = self.conn.prepare(
            "SELECT text, option1, option2, option3, option4, correct_option
             FROM questions WHERE category = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![category], |row| {
            Ok((
                row.get::<_, String>(0)?,
                [
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ],
                row.get::<_, i64>(5)?,
            ))
        })?;

        let mut questions = Vec::new();
        for row in rows.filter_map(log_and_skip_err) {
            match Self::row_to_question(row) {
                Ok(question) => questions.push(question),
                Err(e) => warn!(category, error = %e, "skipping unplayable question"),
            }
        }
        debug!(category, count = questions.len(), "loaded questions");
        Ok(questions)
    }
}
