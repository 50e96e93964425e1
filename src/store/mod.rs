//! Storage module
//!
//! Repository traits for users and questions, injected into the screen
//! flow controller, and the SQLite implementation behind them.

use crate::models::Question;
use crate::Result;

pub mod seed;
pub mod sqlite;

pub use sqlite::SqliteStore;

/// Credential lookup and registration
pub trait UserStore {
    /// Return `Ok(true)` when the username exists and the password matches
    fn authenticate(&self, username: &str, password: &str) -> Result<bool>;

    /// Insert a new user; fails when the username is already taken
    fn register(&self, username: &str, password: &str) -> Result<()>;
}

/// Question retrieval by category
pub trait QuestionStore {
    /// Distinct categories in display order
    fn categories(&self) -> Result<Vec<String>>;

    /// Questions of one category in stored order
    fn questions_for(&self, category: &str) -> Result<Vec<Question>>;
}

impl<T: UserStore + ?Sized> UserStore for &T {
    fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        (**self).authenticate(username, password)
    }

    fn register(&self, username: &str, password: &str) -> Result<()> {
        (**self).register(username, password)
    }
}

impl<T: QuestionStore + ?Sized> QuestionStore for &T {
    fn categories(&self) -> Result<Vec<String>> {
        (**self).categories()
    }

    fn questions_for(&self, category: &str) -> Result<Vec<Question>> {
        (**self).questions_for(category)
    }
}
