//! Home screen rendering
//!
//! The landing screen: which account is configured, where the cache lives,
//! and how to get to the campaigns.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the home screen
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `app` - The application state
/// * `cache_path` - Where campaigns are cached, shown for reference
pub fn render(frame: &mut Frame, app: &App, cache_path: &str) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(9),
            Constraint::Min(0),
        ])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            "ADBOARD",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Active Meta ad campaigns",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Account  ", Style::default().fg(Color::DarkGray)),
            Span::styled(app.account_id.clone(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Cache    ", Style::default().fg(Color::DarkGray)),
            Span::styled(cache_path.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" view campaigns   "),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::raw(" refresh from API   "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" quit"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::NONE))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, chunks[1]);
}
