//! Campaign detail screen UI
//!
//! Renders everything known about one campaign: budgets and schedule, each
//! ad-set's audience targeting, and the captions and headline of every ad.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::{display_age, AudienceRecord, CampaignRecord};

/// Color scheme shared by the detail sections
mod colors {
    use ratatui::style::Color;

    /// Section headers
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Field labels
    pub const LABEL: Color = Color::DarkGray;
    /// Money
    pub const BUDGET: Color = Color::Green;
    /// Ad-set names
    pub const AUDIENCE: Color = Color::Yellow;
}

/// Renders the campaign detail screen
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `app` - The application state; its scroll offset is clamped to the content
/// * `index` - Index of the campaign in `app.campaigns`
pub fn render(frame: &mut Frame, app: &mut App, index: usize) {
    let area = frame.area();

    let Some(campaign) = app.campaign(index) else {
        let paragraph = Paragraph::new("Campaign not found. Press Esc to go back.")
            .style(Style::default().fg(Color::Red));
        frame.render_widget(paragraph, area);
        return;
    };

    let title = format!(" {} ", campaign.name);
    let lines = campaign_lines(campaign);

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            title,
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));
    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner_area);

    let content = Paragraph::new(lines).wrap(Wrap { trim: false });

    // Clamp scroll offset to the wrapped content height
    let wrapped_height = u16::try_from(content.line_count(chunks[0].width)).unwrap_or(u16::MAX);
    let max_scroll = wrapped_height.saturating_sub(chunks[0].height);
    if app.detail_scroll_offset > max_scroll {
        app.detail_scroll_offset = max_scroll;
    }

    frame.render_widget(content.scroll((app.detail_scroll_offset, 0)), chunks[0]);

    let help = Paragraph::new(Line::from(Span::styled(
        "j/k scroll  g/G top/bottom  r refresh  Esc back  q quit",
        Style::default().fg(colors::LABEL),
    )));
    frame.render_widget(help, chunks[1]);
}

/// Builds every line of the detail view for a campaign
fn campaign_lines(campaign: &CampaignRecord) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Overview"),
        field("Objective", &campaign.objective, colors::PRIMARY),
        field("Status", &campaign.status, colors::PRIMARY),
        field("Daily budget", &campaign.daily_budget, colors::BUDGET),
        field("Lifetime budget", &campaign.lifetime_budget, colors::BUDGET),
        field("Spend cap", &campaign.spend_cap, colors::BUDGET),
        field("Starts", &campaign.start_time, colors::PRIMARY),
        field("Ends", &campaign.stop_time, colors::PRIMARY),
        Line::from(""),
        section(&format!("Audience ({} ad-sets)", campaign.audience.len())),
    ];

    if campaign.audience.is_empty() {
        lines.push(dim("  No active ad-sets"));
    }
    for audience in &campaign.audience {
        lines.extend(audience_lines(audience));
    }

    lines.push(Line::from(""));
    lines.push(section("Headlines"));
    lines.extend(bullets(&campaign.headlines));

    lines.push(Line::from(""));
    lines.push(section("Captions"));
    lines.extend(bullets(&campaign.captions));

    lines
}

/// Lines for one ad-set: targeting, then its ads
fn audience_lines(audience: &AudienceRecord) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("  {}", audience.name),
            Style::default()
                .fg(colors::AUDIENCE)
                .add_modifier(Modifier::BOLD),
        )),
        field(
            "  Ages",
            &format!(
                "{} - {}",
                display_age(audience.age_min),
                display_age(audience.age_max)
            ),
            colors::PRIMARY,
        ),
        field("  Locations", &audience.locations.join(", "), colors::PRIMARY),
        field("  Interests", &audience.interests.join(", "), colors::PRIMARY),
    ];

    for ad in &audience.ads {
        lines.push(Line::from(vec![
            Span::styled("    \u{2022} ", Style::default().fg(colors::LABEL)),
            Span::styled(ad.name.clone(), Style::default().fg(colors::PRIMARY)),
            Span::styled(
                format!("  \"{}\"", ad.headline),
                Style::default().fg(colors::HEADER),
            ),
        ]));
        for caption in &ad.captions {
            lines.push(dim(&format!("        {}", caption)));
        }
    }

    lines
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(colors::HEADER)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", label), Style::default().fg(colors::LABEL)),
        Span::styled(value.to_string(), Style::default().fg(color)),
    ])
}

fn bullets(items: &[String]) -> Vec<Line<'static>> {
    if items.is_empty() {
        return vec![dim("  None")];
    }
    items
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::styled("  \u{2022} ", Style::default().fg(colors::LABEL)),
                Span::styled(item.clone(), Style::default().fg(colors::PRIMARY)),
            ])
        })
        .collect()
}

fn dim(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(colors::LABEL),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaigns::{CampaignsOutcome, Origin};
    use crate::data::AdRecord;
    use ratatui::{backend::TestBackend, Terminal};

    fn promo() -> CampaignRecord {
        CampaignRecord {
            name: "Promo".to_string(),
            objective: "Reach".to_string(),
            status: "ACTIVE".to_string(),
            daily_budget: "$50.00".to_string(),
            lifetime_budget: "N/A".to_string(),
            spend_cap: "N/A".to_string(),
            start_time: "2024-07-01T00:00:00+0800".to_string(),
            stop_time: "N/A".to_string(),
            audience: vec![AudienceRecord {
                name: "All Users".to_string(),
                age_min: Some(18),
                age_max: Some(65),
                locations: vec!["MY".to_string(), "Selangor".to_string()],
                interests: vec!["N/A".to_string()],
                ads: vec![AdRecord {
                    name: "Summer ad".to_string(),
                    captions: vec!["Buy now".to_string(), "Limited offer".to_string()],
                    headline: "Big Sale".to_string(),
                }],
            }],
            captions: vec!["Buy now".to_string(), "Limited offer".to_string()],
            headlines: vec!["Big Sale".to_string()],
        }
    }

    fn app_with(campaign: CampaignRecord) -> App {
        let mut app = App::new("act_1");
        app.apply_outcome(CampaignsOutcome {
            campaigns: vec![campaign],
            error: None,
            origin: Origin::Cache,
            fetched_at: Some(0.0),
        });
        app
    }

    fn render_to_string(app: &mut App, index: usize, height: u16) -> String {
        let backend = TestBackend::new(100, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app, index)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_detail_renders_all_sections() {
        let mut app = app_with(promo());

        let content = render_to_string(&mut app, 0, 50);

        assert!(content.contains("Promo"));
        assert!(content.contains("$50.00"));
        assert!(content.contains("All Users"));
        assert!(content.contains("18 - 65"));
        assert!(content.contains("MY, Selangor"));
        assert!(content.contains("Big Sale"));
        assert!(content.contains("Limited offer"));
    }

    #[test]
    fn test_detail_clamps_scroll_offset() {
        let mut app = app_with(promo());
        app.detail_scroll_offset = 200;

        render_to_string(&mut app, 0, 10);

        let total = campaign_lines(&promo()).len() as u16;
        // 10 rows minus two borders minus the help line
        assert_eq!(app.detail_scroll_offset, total - 7);
    }

    #[test]
    fn test_detail_scrolls_to_end_of_wrapped_captions() {
        let mut campaign = promo();
        campaign.captions = (0..6)
            .map(|i| format!("Caption {} runs well past the width of a narrow terminal window", i))
            .collect();
        campaign.captions.push("Final caption ends here".to_string());
        let mut app = app_with(campaign);
        app.detail_scroll_offset = u16::MAX;

        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, &mut app, 0))
            .unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(content.contains("ends here"), "last caption should be reachable");
        assert!(app.detail_scroll_offset as usize > campaign_lines(&promo()).len());
    }

    #[test]
    fn test_detail_missing_campaign() {
        let mut app = app_with(promo());
        let content = render_to_string(&mut app, 5, 10);
        assert!(content.contains("Campaign not found"));
    }

    #[test]
    fn test_audience_lines_show_placeholder_ages() {
        let mut audience = promo().audience.remove(0);
        audience.age_min = None;
        audience.age_max = None;

        let text: String = audience_lines(&audience)
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();

        assert!(text.contains("N/A - N/A"));
    }
}
