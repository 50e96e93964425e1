//! Login screen implementation
//!
//! Username and password fields with Login and Register buttons.
//! The password is masked on screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Focusable element of the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
    LoginButton,
    RegisterButton,
}

impl LoginField {
    fn all() -> [Self; 4] {
        [
            Self::Username,
            Self::Password,
            Self::LoginButton,
            Self::RegisterButton,
        ]
    }

    fn position(self) -> usize {
        Self::all().iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        let all = Self::all();
        all[(self.position() + 1) % all.len()]
    }

    fn previous(self) -> Self {
        let all = Self::all();
        all[(self.position() + all.len() - 1) % all.len()]
    }

    fn is_text(self) -> bool {
        matches!(self, Self::Username | Self::Password)
    }
}

/// What the user asked the login form to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    Login { username: String, password: String },
    Register { username: String, password: String },
    Quit,
}

/// Login screen component
#[derive(Debug)]
pub struct LoginScreen {
    username: String,
    password: String,
    focus: LoginField,
}

impl LoginScreen {
    /// Create an empty login form focused on the username
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            focus: LoginField::Username,
        }
    }

    pub fn focus(&self) -> LoginField {
        self.focus
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Clear the form, e.g. after a successful login
    pub fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
        self.focus = LoginField::Username;
    }

    /// Handle key events for the login form
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<LoginAction> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Esc => return Some(LoginAction::Quit),
            KeyCode::Enter => return self.submit(),
            KeyCode::Backspace => {
                if let Some(field) = self.active_text_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.active_text_mut() {
                    field.push(c);
                } else if c == 'q' || c == 'Q' {
                    return Some(LoginAction::Quit);
                }
            }
            _ => {}
        }
        None
    }

    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            LoginField::Username => Some(&mut self.username),
            LoginField::Password => Some(&mut self.password),
            _ => None,
        }
    }

    fn submit(&mut self) -> Option<LoginAction> {
        let username = self.username.clone();
        let password = self.password.clone();
        match self.focus {
            LoginField::Username => {
                self.focus = LoginField::Password;
                None
            }
            LoginField::Password | LoginField::LoginButton => {
                Some(LoginAction::Login { username, password })
            }
            LoginField::RegisterButton => Some(LoginAction::Register { username, password }),
        }
    }

    /// Render the login screen
    pub fn render(&self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Min(12),   // Form
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_form(f, chunks[1]);
        self.render_help(f, chunks[2]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        let title = Paragraph::new("QUIZTERM")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(title, title_chunks[0]);

        let subtitle = Paragraph::new("Login or register to start a quiz")
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    fn field_style(&self, field: LoginField) -> Style {
        if self.focus == field {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let form = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(50),
                Constraint::Percentage(25),
            ])
            .split(area)[1];

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(form);

        let masked = "*".repeat(self.password.chars().count());
        for (value, field, label, row) in [
            (self.username.as_str(), LoginField::Username, "Username", rows[0]),
            (masked.as_str(), LoginField::Password, "Password", rows[1]),
        ] {
            let input = Paragraph::new(value).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(label)
                    .border_style(self.field_style(field)),
            );
            f.render_widget(input, row);
        }

        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);

        for (field, label, area) in [
            (LoginField::LoginButton, "Login", buttons[0]),
            (LoginField::RegisterButton, "Register", buttons[1]),
        ] {
            let style = if self.focus == field {
                Style::default().bg(Color::Cyan).fg(Color::Black)
            } else {
                Style::default()
            };
            let button = Paragraph::new(label)
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(button, area);
        }
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let help_text = Line::from(vec![
            Span::styled("Tab", key_style),
            Span::raw(" Next field  "),
            Span::styled("Enter", key_style),
            Span::raw(" Submit  "),
            Span::styled("Esc", key_style),
            Span::raw(" Quit"),
        ]);

        let help = Paragraph::new(help_text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );

        f.render_widget(help, area);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_focus_cycles() {
        let mut screen = LoginScreen::new();
        assert_eq!(screen.focus(), LoginField::Username);
        screen.handle_key_event(key(KeyCode::BackTab));
        assert_eq!(screen.focus(), LoginField::RegisterButton);
        screen.handle_key_event(key(KeyCode::Tab));
        assert_eq!(screen.focus(), LoginField::Username);
    }

    #[test]
    fn test_typing_q_does_not_quit() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "quinn");
        assert_eq!(screen.username(), "quinn");

        screen.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(screen.username(), "quin");
    }

    #[test]
    fn test_login_and_register_actions() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "alice");
        assert_eq!(screen.handle_key_event(key(KeyCode::Enter)), None);
        assert_eq!(screen.focus(), LoginField::Password);
        type_text(&mut screen, "pw");

        assert_eq!(
            screen.handle_key_event(key(KeyCode::Enter)),
            Some(LoginAction::Login {
                username: "alice".to_string(),
                password: "pw".to_string()
            })
        );

        screen.handle_key_event(key(KeyCode::Tab));
        screen.handle_key_event(key(KeyCode::Tab));
        assert_eq!(screen.focus(), LoginField::RegisterButton);
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Enter)),
            Some(LoginAction::Register {
                username: "alice".to_string(),
                password: "pw".to_string()
            })
        );
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('q'))),
            Some(LoginAction::Quit)
        );
    }

    #[test]
    fn test_password_is_masked() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "bob");
        screen.handle_key_event(key(KeyCode::Tab));
        type_text(&mut screen, "secret");

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| screen.render(f)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(text.contains("bob"));
        assert!(text.contains("******"));
        assert!(!text.contains("secret"));

        screen.reset();
        assert_eq!(screen.username(), "");
        assert_eq!(screen.focus(), LoginField::Username);
    }
}
