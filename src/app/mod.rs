//! TUI application module
//!
//! Contains the screen flow controller, the terminal user interface
//! components, and keyboard event mapping.

pub mod app;
pub mod flow;
pub mod screens;
pub mod state;
pub mod tui;

pub use app::App;
pub use flow::{FlowController, FlowSettings};
pub use screens::{CategoryScreen, HistoryScreen, LoginAction, LoginScreen, QuizScreen};
pub use state::{NavigationAction, Notice, NoticeKind, Screen};
pub use tui::Tui;
