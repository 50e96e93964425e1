//! Application state definitions
//!
//! View states the screen flow controller moves between, user notices, and
//! keyboard event mapping for the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::quiz::QuizSession;

/// Application screens/states
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Username/password form with Login and Register actions
    Login,
    /// Category list for a logged-in user
    CategorySelection { username: String },
    /// Active quiz
    Quiz(QuizSession),
    /// Past results of a logged-in user
    History { username: String },
}

impl Screen {
    /// Logged-in user, if any
    pub fn username(&self) -> Option<&str> {
        match self {
            Screen::Login => None,
            Screen::CategorySelection { username } | Screen::History { username } => {
                Some(username)
            }
            Screen::Quiz(session) => Some(session.username()),
        }
    }

    /// Short label for logs and titles
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Login => "login",
            Screen::CategorySelection { .. } => "category-selection",
            Screen::Quiz(_) => "quiz",
            Screen::History { .. } => "history",
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::Login
    }
}

/// Severity of a notice, used for dialog styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Modal message queued for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, message)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, message)
    }

    fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Confirm selection (Enter, Space)
    Select,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Next item (Tab)
    Next,
    /// Previous item (Shift+Tab)
    Previous,
    /// Pick the option with this zero-based index (1-9)
    Choose(usize),
    /// Open the results history (h)
    History,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

impl NavigationAction {
    /// Convert keyboard event to navigation action
    pub fn from_key(key: KeyEvent) -> Self {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            // Tab navigation
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    NavigationAction::Previous
                } else {
                    NavigationAction::Next
                }
            }
            KeyCode::BackTab => NavigationAction::Previous,

            KeyCode::Char('h') | KeyCode::Char('H') => NavigationAction::History,
            KeyCode::Char(c @ '1'..='9') => NavigationAction::Choose(c as usize - '1' as usize),

            _ => NavigationAction::None,
        }
    }

    /// Ctrl+C quits even while typing into a text field
    pub fn is_force_quit(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_screen_is_login() {
        assert_eq!(Screen::default(), Screen::Login);
        assert!(Screen::Login.username().is_none());
    }

    #[test]
    fn test_screen_username() {
        let screen = Screen::CategorySelection {
            username: "alice".to_string(),
        };
        assert_eq!(screen.username(), Some("alice"));
        assert_eq!(screen.name(), "category-selection");

        let quiz = Screen::Quiz(QuizSession::new("Maths", "bob", Vec::new()));
        assert_eq!(quiz.username(), Some("bob"));
    }

    #[test]
    fn test_key_to_navigation() {
        // Test quit keys
        assert_eq!(NavigationAction::from_key(key(KeyCode::Char('q'))), NavigationAction::Quit);
        assert_eq!(NavigationAction::from_key(key(KeyCode::Char('Q'))), NavigationAction::Quit);
        assert_eq!(
            NavigationAction::from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            NavigationAction::Quit
        );

        // Test navigation keys
        assert_eq!(NavigationAction::from_key(key(KeyCode::Up)), NavigationAction::Up);
        assert_eq!(NavigationAction::from_key(key(KeyCode::Char('k'))), NavigationAction::Up);
        assert_eq!(NavigationAction::from_key(key(KeyCode::Down)), NavigationAction::Down);
        assert_eq!(NavigationAction::from_key(key(KeyCode::Char('j'))), NavigationAction::Down);

        // Test selection keys
        assert_eq!(NavigationAction::from_key(key(KeyCode::Enter)), NavigationAction::Select);
        assert_eq!(NavigationAction::from_key(key(KeyCode::Char(' '))), NavigationAction::Select);

        // Test back keys
        assert_eq!(NavigationAction::from_key(key(KeyCode::Esc)), NavigationAction::Back);

        // Test tab navigation
        assert_eq!(NavigationAction::from_key(key(KeyCode::Tab)), NavigationAction::Next);
        assert_eq!(
            NavigationAction::from_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)),
            NavigationAction::Previous
        );
        assert_eq!(NavigationAction::from_key(key(KeyCode::BackTab)), NavigationAction::Previous);
    }

    #[test]
    fn test_option_digits() {
        assert_eq!(NavigationAction::from_key(key(KeyCode::Char('1'))), NavigationAction::Choose(0));
        assert_eq!(NavigationAction::from_key(key(KeyCode::Char('4'))), NavigationAction::Choose(3));
        assert_eq!(NavigationAction::from_key(key(KeyCode::Char('0'))), NavigationAction::None);
        assert_eq!(NavigationAction::from_key(key(KeyCode::Char('h'))), NavigationAction::History);
    }

    #[test]
    fn test_force_quit() {
        assert!(NavigationAction::is_force_quit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!NavigationAction::is_force_quit(&key(KeyCode::Char('q'))));
    }
}
