//! Help overlay listing the keys of the current screen
//!
//! The rows come from [`AppState::key_hints`], the same table the key handler
//! is documented and tested against, so the overlay only offers keys that do
//! something on the screen underneath it.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Row, Table},
    Frame,
};

use crate::app::AppState;

const OVERLAY_WIDTH: u16 = 56;
const KEY_COLUMN_WIDTH: u16 = 14;

/// Renders the help overlay for `state` on top of the current view
pub fn render(frame: &mut Frame, state: &AppState) {
    let mut rows: Vec<Row> = state
        .key_hints()
        .iter()
        .map(|(key, action)| key_row(key, action))
        .collect();
    rows.push(key_row("?", "Close this help"));

    // Rows plus borders and a blank line above the footer
    let height = rows.len() as u16 + 3;
    let overlay_area = centered(OVERLAY_WIDTH, height, frame.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" Keys: {} ", state.title()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            " Esc or ? to close ",
            Style::default().fg(Color::DarkGray),
        )));

    let table = Table::new(
        rows,
        [Constraint::Length(KEY_COLUMN_WIDTH), Constraint::Min(10)],
    )
    .block(block);

    frame.render_widget(Clear, overlay_area);
    frame.render_widget(table, overlay_area);
}

fn key_row<'a>(key: &'a str, action: &'a str) -> Row<'a> {
    Row::new(vec![
        Span::styled(format!(" {}", key), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(state: &AppState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_overlay_lists_keys_of_current_screen() {
        let content = render_to_string(&AppState::CampaignList, 80, 24);

        assert!(content.contains("Keys: Campaigns"));
        assert!(content.contains("Open campaign details"));
        assert!(content.contains("Back to home screen"));
        assert!(content.contains("Close this help"));
        assert!(!content.contains("Jump to top"), "detail-only key leaked into list help");
    }

    #[test]
    fn test_overlay_for_detail_screen() {
        let content = render_to_string(&AppState::CampaignDetail(3), 80, 24);

        assert!(content.contains("Keys: Campaign details"));
        assert!(content.contains("Jump to top / bottom"));
        assert!(content.contains("Back to campaign list"));
    }

    #[test]
    fn test_centered_fits_small_terminals() {
        let area = Rect::new(0, 0, 30, 5);
        let rect = centered(OVERLAY_WIDTH, 9, area);
        assert_eq!(rect, Rect::new(0, 0, 30, 5));

        let rect = centered(20, 4, Rect::new(0, 0, 80, 24));
        assert_eq!(rect, Rect::new(30, 10, 20, 4));
    }
}
