//! Category selection screen implementation
//!
//! Lists the quiz categories with the user's best score in each.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::QuizResult;

/// Category screen component
#[derive(Debug)]
pub struct CategoryScreen {
    selected_index: usize,
    list_state: ListState,
}

impl CategoryScreen {
    /// Create a new category screen
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
        }
    }

    /// Category under the cursor
    pub fn selected<'a>(&self, categories: &'a [String]) -> Option<&'a String> {
        categories.get(self.selected_index)
    }

    /// Move selection up
    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.selected_index > 0 && self.selected_index < len {
            self.selected_index -= 1;
        } else {
            self.selected_index = len - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection down
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Render the category screen
    pub fn render(
        &mut self,
        f: &mut Frame,
        username: &str,
        categories: &[String],
        best_scores: &[Option<&QuizResult>],
    ) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Min(8),    // Category list
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0], username);
        self.render_list(f, chunks[1], categories, best_scores);
        self.render_help(f, chunks[2]);
    }

    fn render_title(&self, f: &mut Frame, area: ratatui::layout::Rect, username: &str) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        let title = Paragraph::new("Select Category")
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

        let subtitle = Paragraph::new(format!("Logged in as {}", username))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    fn render_list(
        &mut self,
        f: &mut Frame,
        area: ratatui::layout::Rect,
        categories: &[String],
        best_scores: &[Option<&QuizResult>],
    ) {
        let items: Vec<ListItem> = if categories.is_empty() {
            vec![ListItem::new("No categories available")]
        } else {
            categories
                .iter()
                .enumerate()
                .map(|(i, category)| {
                    let best = match best_scores.get(i).copied().flatten() {
                        Some(r) => format!("best {}/{}", r.score, r.total),
                        None => "not played".to_string(),
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw(format!("{:<20}", category)),
                        Span::styled(best, Style::default().fg(Color::DarkGray)),
                    ]))
                })
                .collect()
        };

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Categories"))
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
            Span::raw(" Start quiz  "),
            Span::styled("H", key_style),
            Span::raw(" History  "),
            Span::styled("Esc", key_style),
            Span::raw(" Logout  "),
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

impl Default for CategoryScreen {
    fn default() -> Self {
        Self::new()
    }
}
