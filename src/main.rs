//! adboard - Browse active Meta ad campaigns from the terminal
//!
//! A terminal UI application that lists the active campaigns of an ad account
//! together with their budgets, audience targeting and ad creatives. Results
//! are cached on disk and reused until a refresh is requested.

mod app;
mod cache;
mod campaigns;
mod cli;
mod config;
mod data;
mod ui;

use std::fs::{self, File};
use std::io::{self, Write};
use std::panic;
use std::path::Path;
use std::process;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, AppState};
use campaigns::CampaignService;
use cli::{Cli, StartupConfig};
use config::Config;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Sends log records to a file, since stdout belongs to the TUI.
///
/// `RUST_LOG` overrides the default `info` level.
fn init_logging(log_file: &Path) -> io::Result<()> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(log_file)?;

    let env = env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info");
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.module_path().unwrap_or("<unnamed>"),
                &record.args()
            )
        })
        .init();

    Ok(())
}

/// Resolves CLI arguments and environment into a Config, exiting on failure
fn load_config() -> Config {
    let cli = Cli::parse();

    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    match Config::from_env(startup) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    }
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &mut App, cache_path: &str) {
    match app.state.clone() {
        AppState::Home => {
            ui::render_home(frame, app, cache_path);
        }
        AppState::Loading => {
            render_loading(frame);
        }
        AppState::CampaignList => {
            ui::render_campaign_list(frame, app);
        }
        AppState::CampaignDetail(index) => {
            ui::render_campaign_detail(frame, app, index);
        }
    }

    if app.show_help {
        ui::render_help_overlay(frame, &app.state);
    }
}

/// Renders a loading message while campaigns are being fetched
fn render_loading(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Loading campaigns...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();

    if let Err(e) = init_logging(&config.log_file()) {
        eprintln!(
            "warning: could not open log file {}: {}",
            config.log_file().display(),
            e
        );
    }
    log::info!("starting adboard: {:?}", config);

    let service = CampaignService::from_config(&config);
    let cache_path = service.cache().path().display().to_string();
    let mut app = App::with_config(&config);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    loop {
        if let Some(request) = app.take_load_request() {
            // Show the loading screen while the load runs
            terminal.draw(|f| render_ui(f, &mut app, &cache_path))?;

            match service
                .get_campaigns(&config.account_id, request.force_refresh())
                .await
            {
                Ok(outcome) => app.apply_outcome(outcome),
                Err(e) => {
                    log::error!("campaign cache unusable: {}", e);
                    app.apply_cache_error(&e);
                }
            }
        }

        // Render UI
        terminal.draw(|f| render_ui(f, &mut app, &cache_path))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    log::info!("adboard exiting");
    Ok(())
}
