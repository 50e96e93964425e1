//! History screen implementation
//!
//! Table of the logged-in user's past quizzes, newest first, with their
//! overall average on top.

use crate::models::QuizResult;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

fn score_color(ratio: f64) -> Color {
    if ratio >= 0.8 {
        Color::Green
    } else if ratio >= 0.5 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// History screen component
#[derive(Debug, Default)]
pub struct HistoryScreen {
    results: Vec<QuizResult>,
    /// First table row shown
    offset: usize,
}

impl HistoryScreen {
    pub fn new(results: Vec<QuizResult>) -> Self {
        Self { results, offset: 0 }
    }

    /// Replace the listed results and scroll back to the newest
    pub fn set_results(&mut self, results: Vec<QuizResult>) {
        self.results = results;
        self.offset = 0;
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.offset + 1 < self.results.len() {
            self.offset += 1;
        }
    }

    /// Average score over quizzes that had questions
    pub fn average_ratio(&self) -> Option<f64> {
        let played: Vec<f64> = self
            .results
            .iter()
            .filter(|r| r.total > 0)
            .map(QuizResult::ratio)
            .collect();
        if played.is_empty() {
            None
        } else {
            Some(played.iter().sum::<f64>() / played.len() as f64)
        }
    }

    /// Render the history screen
    pub fn render(&mut self, f: &mut Frame, username: &str) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Totals
                Constraint::Min(0),    // Results table
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0], username);
        self.render_totals(f, chunks[1]);
        self.render_table(f, chunks[2]);
        self.render_help(f, chunks[3]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect, username: &str) {
        let title = Paragraph::new(format!("Results History - {}", username))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_totals(&self, f: &mut Frame, area: Rect) {
        let average = match self.average_ratio() {
            Some(ratio) => Span::styled(
                format!("{:.0}%", ratio * 100.0),
                Style::default().fg(score_color(ratio)),
            ),
            None => Span::raw("-"),
        };
        let totals = Paragraph::new(Line::from(vec![
            Span::raw(format!("Quizzes: {}    Average: ", self.results.len())),
            average,
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(totals, area);
    }

    fn render_table(&self, f: &mut Frame, area: Rect) {
        if self.results.is_empty() {
            let empty = Paragraph::new("No quizzes played yet")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(empty, area);
            return;
        }

        let header = Row::new(vec!["Date", "Category", "Score", "%"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let rows: Vec<Row> = self
            .results
            .iter()
            .skip(self.offset)
            .map(|r| {
                let ratio = r.ratio();
                Row::new(vec![
                    Cell::from(r.timestamp.format("%Y-%m-%d %H:%M").to_string()),
                    Cell::from(r.category.clone()),
                    Cell::from(format!("{}/{}", r.score, r.total)),
                    Cell::from(format!("{:.0}", ratio * 100.0))
                        .style(Style::default().fg(score_color(ratio))),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(18),
                Constraint::Min(12),
                Constraint::Length(8),
                Constraint::Length(5),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .column_spacing(2);

        f.render_widget(table, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let text = Paragraph::new("↑↓: Scroll  Esc: Back")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(text, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(screen: &mut HistoryScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| screen.render(f, "alice")).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_average_skips_empty_quizzes() {
        let mut screen = HistoryScreen::default();
        assert!(screen.average_ratio().is_none());

        screen.set_results(vec![
            QuizResult::new("alice", "Maths", 3, 4),
            QuizResult::new("alice", "Java", 1, 4),
            QuizResult::new("alice", "History", 0, 0),
        ]);
        assert_eq!(screen.average_ratio(), Some(0.5));
    }

    #[test]
    fn test_scroll_stays_in_bounds() {
        let mut screen = HistoryScreen::new(vec![
            QuizResult::new("alice", "Maths", 2, 3),
            QuizResult::new("alice", "Java", 1, 4),
        ]);
        screen.scroll_up();
        assert_eq!(screen.offset, 0);
        screen.scroll_down();
        screen.scroll_down();
        assert_eq!(screen.offset, 1);

        screen.set_results(Vec::new());
        assert_eq!(screen.offset, 0);
    }

    #[test]
    fn test_table_shows_score_columns() {
        let mut screen = HistoryScreen::new(vec![QuizResult::new("alice", "Python", 2, 3)]);
        let text = draw(&mut screen);

        assert!(text.contains("Results History - alice"));
        assert!(text.contains("Quizzes: 1"));
        assert!(text.contains("Python"));
        assert!(text.contains("2/3"));
        assert!(text.contains("67"));
    }

    #[test]
    fn test_empty_history_renders_placeholder() {
        let mut screen = HistoryScreen::default();
        let text = draw(&mut screen);
        assert!(text.contains("No quizzes played yet"));
        assert!(text.contains("Average: -"));
    }
}
