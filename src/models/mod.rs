//! Data models module
//!
//! Contains question, user and quiz result definitions.

pub mod question;
pub mod result;
pub mod user;

// Re-export commonly used types
pub use question::Question;
pub use result::QuizResult;
pub use user::User;
