//! TUI screen components
//!
//! One component per flow screen plus the modal notice dialog. Screens
//! hold only cursor state; everything they show comes from the flow
//! controller.

pub mod category;
pub mod dialog;
pub mod history;
pub mod login;
pub mod quiz;

pub use category::CategoryScreen;
pub use dialog::render_notice;
pub use history::HistoryScreen;
pub use login::{LoginAction, LoginField, LoginScreen};
pub use quiz::QuizScreen;
