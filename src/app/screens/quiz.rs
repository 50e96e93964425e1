//! Quiz screen implementation
//!
//! Shows the current question, its options, a countdown gauge that turns
//! red near zero, and the running score.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::quiz::QuizSession;

/// Quiz screen component; keeps only the option cursor
#[derive(Debug, Default)]
pub struct QuizScreen {
    /// Question the cursor belongs to
    question_index: Option<usize>,
    selected_option: usize,
    list_state: ListState,
}

impl QuizScreen {
    /// Create a new quiz screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the cursor of a previous quiz
    pub fn reset(&mut self) {
        self.question_index = None;
        self.selected_option = 0;
        self.list_state.select(None);
    }

    /// Reset the cursor when the session moved to another question
    pub fn sync(&mut self, session: &QuizSession) {
        let current = session.current_index();
        if current != self.question_index {
            self.question_index = current;
            self.selected_option = 0;
        }
        let option_count = session.current_question().map_or(0, |q| q.option_count());
        if self.selected_option >= option_count {
            self.selected_option = 0;
        }
        self.list_state.select(current.map(|_| self.selected_option));
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    /// Move the option cursor up
    pub fn select_previous(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        if self.selected_option > 0 {
            self.selected_option -= 1;
        } else {
            self.selected_option = option_count - 1;
        }
        self.list_state.select(Some(self.selected_option));
    }

    /// Move the option cursor down
    pub fn select_next(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        if self.selected_option + 1 < option_count {
            self.selected_option += 1;
        } else {
            self.selected_option = 0;
        }
        self.list_state.select(Some(self.selected_option));
    }

    /// Render the quiz screen
    pub fn render(&mut self, f: &mut Frame, session: &QuizSession, warning_threshold: u32) {
        self.sync(session);
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Timer
                Constraint::Length(5), // Question text
                Constraint::Min(6),    // Options
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0], session);
        self.render_timer(f, chunks[1], session, warning_threshold);
        self.render_question(f, chunks[2], session);
        self.render_options(f, chunks[3], session);
        self.render_help(f, chunks[4]);
    }

    fn render_title(&self, f: &mut Frame, area: ratatui::layout::Rect, session: &QuizSession) {
        let position = session.current_index().map(|i| i + 1).unwrap_or(session.total());
        let title = format!(
            "{} - Question {}/{} - Score {}",
            session.category(),
            position,
            session.total(),
            session.score()
        );

        let title_widget = Paragraph::new(title)
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

        f.render_widget(title_widget, area);
    }

    fn render_timer(
        &self,
        f: &mut Frame,
        area: ratatui::layout::Rect,
        session: &QuizSession,
        warning_threshold: u32,
    ) {
        let color = if session.is_warning(warning_threshold) {
            Color::Red
        } else {
            Color::Green
        };
        let ratio = if session.time_limit() == 0 {
            0.0
        } else {
            f64::from(session.time_left()) / f64::from(session.time_limit())
        };

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .gauge_style(Style::default().fg(color))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(format!("Time left: {}s", session.time_left()));

        f.render_widget(gauge, area);
    }

    fn render_question(&self, f: &mut Frame, area: ratatui::layout::Rect, session: &QuizSession) {
        let text = session
            .current_question()
            .map(|q| q.text.as_str())
            .unwrap_or("Quiz completed");

        let question = Paragraph::new(text)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Question"));

        f.render_widget(question, area);
    }

    fn render_options(&mut self, f: &mut Frame, area: ratatui::layout::Rect, session: &QuizSession) {
        let items: Vec<ListItem> = session
            .current_question()
            .map(|q| {
                q.options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| ListItem::new(format!("{}. {}", i + 1, option)))
                    .collect()
            })
            .unwrap_or_default();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Options"))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let help_text = Line::from(vec![
            Span::styled("↑↓", key_style),
            Span::raw(" Navigate  "),
            Span::styled("Enter", key_style),
            Span::raw(" Submit  "),
            Span::styled("1-4", key_style),
            Span::raw(" Answer  "),
            Span::styled("Q", key_style),
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
