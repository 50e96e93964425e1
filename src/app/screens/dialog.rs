//! Modal notice dialog
//!
//! Drawn over whatever screen is active; the flow controller keeps
//! input away from the screen underneath until it is dismissed.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::state::{Notice, NoticeKind};

fn kind_color(kind: NoticeKind) -> Color {
    match kind {
        NoticeKind::Info => Color::Cyan,
        NoticeKind::Success => Color::Green,
        NoticeKind::Error => Color::Red,
    }
}

/// Render `notice` centered over `area`
pub fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let color = kind_color(notice.kind);
    let line_count = notice.message.lines().count().max(1) as u16;
    let height = (line_count + 4).min(area.height);
    let popup = centered_rect(60, height, area);

    let mut lines: Vec<Line> = notice
        .message
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: OK",
        Style::default().fg(Color::DarkGray),
    )));

    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(notice.title.as_str())
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(dialog, popup);
}

/// Rectangle of `percent_x` width and fixed `height`, centered in `r`
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
