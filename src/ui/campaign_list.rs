//! Campaign list screen rendering
//!
//! Renders the main list of active campaigns with their objective, budgets and
//! how many ad-sets and ads run under each, plus any error from the last load.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::cache::unix_timestamp;
use crate::data::{CampaignRecord, NOT_AVAILABLE};

/// Column widths: name, objective, daily budget, lifetime budget, ad-sets, ads
const COLUMNS: [usize; 6] = [28, 20, 12, 12, 5, 5];

/// Renders the campaign list screen
pub fn render_campaign_list(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let error_height = if app.error_message.is_some() { 3 } else { 0 };

    // Header, optional error banner, list, and help text at bottom
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(error_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    if let Some(ref message) = app.error_message {
        render_error(frame, message, chunks[1]);
    }
    render_list(frame, app, chunks[2]);
    render_help(frame, chunks[3]);
}

/// Renders the title line, data freshness and column headings
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let freshness = app
        .fetched_label(unix_timestamp())
        .unwrap_or_else(|| "Not fetched".to_string());
    let freshness_color = if app.is_stale(unix_timestamp()) {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "ADBOARD",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(app.account_id.clone(), Style::default().fg(Color::White)),
            Span::raw("  "),
            Span::styled(
                format!("{} active", app.campaign_count()),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(Span::styled(freshness, Style::default().fg(freshness_color))),
        Line::from(Span::styled(
            format!(
                "  {:<w0$} {:<w1$} {:>w2$} {:>w3$} {:>w4$} {:>w5$}",
                "Campaign",
                "Objective",
                "Daily",
                "Lifetime",
                "Sets",
                "Ads",
                w0 = COLUMNS[0],
                w1 = COLUMNS[1],
                w2 = COLUMNS[2],
                w3 = COLUMNS[3],
                w4 = COLUMNS[4],
                w5 = COLUMNS[5],
            ),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the error from the last load
fn render_error(frame: &mut Frame, message: &str, area: Rect) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Red),
    )))
    .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Renders one row per campaign, keeping the selection in view
fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    if app.campaigns.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "  No active campaigns",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible = area.height as usize;
    let first = app.selected_index.saturating_sub(visible.saturating_sub(1));

    let lines: Vec<Line> = app
        .campaigns
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(index, campaign)| campaign_line(campaign, index == app.selected_index))
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Builds the row for one campaign
fn campaign_line(campaign: &CampaignRecord, is_selected: bool) -> Line<'static> {
    let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸ or space
    let name_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{:<w$}", truncate(&campaign.name, COLUMNS[0]), w = COLUMNS[0]),
            name_style,
        ),
        Span::raw(" "),
        Span::styled(
            format!(
                "{:<w$}",
                truncate(&campaign.objective, COLUMNS[1]),
                w = COLUMNS[1]
            ),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(" "),
        budget_span(&campaign.daily_budget, COLUMNS[2]),
        Span::raw(" "),
        budget_span(&campaign.lifetime_budget, COLUMNS[3]),
        Span::raw(" "),
        Span::raw(format!("{:>w$}", campaign.audience.len(), w = COLUMNS[4])),
        Span::raw(" "),
        Span::raw(format!("{:>w$}", campaign.ad_count(), w = COLUMNS[5])),
    ])
}

/// Right-aligned budget, dimmed when not set
fn budget_span(budget: &str, width: usize) -> Span<'static> {
    let color = if budget == NOT_AVAILABLE {
        Color::DarkGray
    } else {
        Color::Green
    };
    Span::styled(format!("{:>w$}", budget, w = width), Style::default().fg(color))
}

/// Shortens text to `width` characters, marking the cut with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}\u{2026}", kept)
}

/// Renders the key hints
fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        " ↑/↓ select  Enter details  r refresh  h home  ? help  q quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaigns::{CampaignsOutcome, Origin};
    use crate::data::AudienceRecord;
    use ratatui::{backend::TestBackend, Terminal};

    fn campaign(name: &str, daily_budget: &str) -> CampaignRecord {
        CampaignRecord {
            name: name.to_string(),
            objective: "Link Clicks".to_string(),
            status: "ACTIVE".to_string(),
            daily_budget: daily_budget.to_string(),
            lifetime_budget: "N/A".to_string(),
            spend_cap: "N/A".to_string(),
            start_time: "N/A".to_string(),
            stop_time: "N/A".to_string(),
            audience: vec![AudienceRecord {
                name: "All Users".to_string(),
                age_min: Some(18),
                age_max: Some(65),
                locations: vec!["MY".to_string()],
                interests: vec!["N/A".to_string()],
                ads: vec![],
            }],
            captions: vec![],
            headlines: vec![],
        }
    }

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(120, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_campaign_list(frame, app))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_list_renders_campaign_rows() {
        let mut app = App::new("act_1");
        app.apply_outcome(CampaignsOutcome {
            campaigns: vec![campaign("Promo", "$50.00"), campaign("Retargeting", "N/A")],
            error: None,
            origin: Origin::Api,
            fetched_at: Some(unix_timestamp()),
        });

        let content = render_to_string(&app);

        assert!(content.contains("ADBOARD"));
        assert!(content.contains("2 active"));
        assert!(content.contains("Promo"));
        assert!(content.contains("Retargeting"));
        assert!(content.contains("Link Clicks"));
        assert!(content.contains("$50.00"));
        assert!(content.contains("from API"));
    }

    #[test]
    fn test_list_renders_error_and_empty_state() {
        let mut app = App::new("act_1");
        app.apply_outcome(CampaignsOutcome {
            campaigns: vec![],
            error: Some("Error fetching Meta campaigns: token expired".to_string()),
            origin: Origin::Api,
            fetched_at: None,
        });

        let content = render_to_string(&app);

        assert!(content.contains("token expired"));
        assert!(content.contains("No active campaigns"));
        assert!(content.contains("Not fetched"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("this is far too long", 8), "this is\u{2026}");
    }
}
