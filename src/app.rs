//! Application state management for adboard
//!
//! This module contains the main application state, handling keyboard input,
//! load requests, and state transitions between the home, list and detail views.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};

use crate::cache::{self, CacheError};
use crate::campaigns::{CampaignsOutcome, Origin};
use crate::config::Config;
use crate::data::CampaignRecord;

/// Upper bound for the detail view scroll offset; the renderer clamps it to
/// the content height
const MAX_SCROLL: u16 = u16::MAX;

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Landing screen shown before anything is loaded
    Home,
    /// Waiting on the cache or the API
    Loading,
    /// List view showing all active campaigns
    CampaignList,
    /// Detail view for the campaign at this index
    CampaignDetail(usize),
}

impl AppState {
    /// Screen name shown in the help overlay title
    pub fn title(&self) -> &'static str {
        match self {
            AppState::Home => "Home",
            AppState::Loading => "Loading",
            AppState::CampaignList => "Campaigns",
            AppState::CampaignDetail(_) => "Campaign details",
        }
    }

    /// Keys [`App::handle_key`] acts on in this state, as (key, action) pairs
    ///
    /// `?` is handled everywhere except while loading and is not listed.
    pub fn key_hints(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            AppState::Home => &[
                ("Enter", "Load campaigns, cached if present"),
                ("r", "Fetch fresh from the API"),
                ("q, Esc", "Quit"),
            ],
            AppState::Loading => &[("q", "Quit")],
            AppState::CampaignList => &[
                ("\u{2191}/k, \u{2193}/j", "Move selection"),
                ("Enter", "Open campaign details"),
                ("r", "Refresh from the API"),
                ("h", "Back to home screen"),
                ("q, Esc", "Quit"),
            ],
            AppState::CampaignDetail(_) => &[
                ("\u{2191}/k, \u{2193}/j", "Scroll"),
                ("g, G", "Jump to top / bottom"),
                ("r", "Refresh from the API"),
                ("Esc", "Back to campaign list"),
                ("q", "Quit"),
            ],
        }
    }
}

/// A pending request to load campaigns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadRequest {
    /// Use the cache if there is one
    Cached,
    /// Always go to the API
    Refresh,
}

impl LoadRequest {
    /// Whether this request bypasses the cache
    pub fn force_refresh(self) -> bool {
        self == LoadRequest::Refresh
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Ad account being displayed
    pub account_id: String,
    /// Index of currently selected campaign in list view
    pub selected_index: usize,
    /// Campaigns from the last load
    pub campaigns: Vec<CampaignRecord>,
    /// Error from the last load, shown above the list
    pub error_message: Option<String>,
    /// Where the current campaigns came from
    pub origin: Option<Origin>,
    /// When the current campaigns were fetched, in seconds since the Unix epoch
    pub fetched_at: Option<f64>,
    /// Load waiting to be performed by the event loop
    pub load_request: Option<LoadRequest>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Scroll offset for campaign detail view
    pub detail_scroll_offset: u16,
}

impl App {
    /// Creates a new App on the home screen
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            state: AppState::Home,
            account_id: account_id.into(),
            selected_index: 0,
            campaigns: Vec::new(),
            error_message: None,
            origin: None,
            fetched_at: None,
            load_request: None,
            should_quit: false,
            show_help: false,
            detail_scroll_offset: 0,
        }
    }

    /// Creates a new App from startup configuration.
    ///
    /// With `--refresh` the home screen is skipped and a forced load is queued.
    pub fn with_config(config: &Config) -> Self {
        let mut app = Self::new(config.account_id.clone());
        if config.refresh_on_start {
            app.request_load(LoadRequest::Refresh);
        }
        app
    }

    /// Queues a load for the event loop to perform
    pub fn request_load(&mut self, request: LoadRequest) {
        self.load_request = Some(request);
    }

    /// Takes the queued load, switching to the loading screen
    pub fn take_load_request(&mut self) -> Option<LoadRequest> {
        let request = self.load_request.take()?;
        self.state = AppState::Loading;
        Some(request)
    }

    /// Applies the result of a load and shows the campaign list
    pub fn apply_outcome(&mut self, outcome: CampaignsOutcome) {
        self.campaigns = outcome.campaigns;
        self.error_message = outcome.error;
        self.origin = Some(outcome.origin);
        self.fetched_at = outcome.fetched_at;
        self.clamp_selection();
        self.reset_detail_view_state();
        self.state = AppState::CampaignList;
    }

    /// Shows a cache failure in place of the campaign list
    pub fn apply_cache_error(&mut self, error: &CacheError) {
        self.campaigns.clear();
        self.error_message = Some(error.to_string());
        self.origin = None;
        self.fetched_at = None;
        self.selected_index = 0;
        self.state = AppState::CampaignList;
    }

    /// Returns the total number of campaigns
    pub fn campaign_count(&self) -> usize {
        self.campaigns.len()
    }

    /// Returns the currently selected campaign, if any
    pub fn selected_campaign(&self) -> Option<&CampaignRecord> {
        self.campaigns.get(self.selected_index)
    }

    /// Returns the campaign at an index, if any
    pub fn campaign(&self, index: usize) -> Option<&CampaignRecord> {
        self.campaigns.get(index)
    }

    /// Whether the loaded data is older than the cache duration at `now`
    pub fn is_stale(&self, now: f64) -> bool {
        self.fetched_at
            .map(|t| cache::is_stale(t, now))
            .unwrap_or(false)
    }

    /// Describes where the data came from and when, for the list header
    pub fn fetched_label(&self, now: f64) -> Option<String> {
        let fetched_at = self.fetched_at?;
        let time = cache::fetched_time(fetched_at)?
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M");

        let source = match self.origin {
            Some(Origin::Cache) => "cache",
            _ => "API",
        };
        let stale = if self.is_stale(now) { ", stale" } else { "" };

        Some(format!("Fetched {} (from {}{})", time, source, stale))
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Arguments
    /// * `key_event` - The keyboard event to handle
    ///
    /// # Key Bindings
    /// - `Enter` (in Home): Load campaigns, from cache if present
    /// - `r`: Force a refresh from the API, then show the list
    /// - `q`: Quit the application
    /// - `Esc` (in Home or CampaignList): Quit the application
    /// - `Up`/`k`, `Down`/`j`: Move selection in list, scroll in detail
    /// - `Enter` (in CampaignList): Open the selected campaign
    /// - `h` (in CampaignList): Back to the home screen
    /// - `Esc` (in CampaignDetail): Go back to list view
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {} // Ignore other keys when help is shown
            }
            return;
        }

        match self.state {
            AppState::Home => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Enter => {
                    self.request_load(LoadRequest::Cached);
                }
                KeyCode::Char('r') => {
                    self.request_load(LoadRequest::Refresh);
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::CampaignList => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection_down();
                }
                KeyCode::Enter => {
                    if self.selected_campaign().is_some() {
                        self.state = AppState::CampaignDetail(self.selected_index);
                    }
                }
                KeyCode::Char('h') => {
                    self.state = AppState::Home;
                }
                KeyCode::Char('r') => {
                    self.request_load(LoadRequest::Refresh);
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::CampaignDetail(_) => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.reset_detail_view_state();
                    self.state = AppState::CampaignList;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.scroll_down();
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.scroll_up();
                }
                KeyCode::Char('g') => {
                    self.scroll_to_top();
                }
                KeyCode::Char('G') => {
                    self.scroll_to_bottom();
                }
                KeyCode::Char('r') => {
                    self.request_load(LoadRequest::Refresh);
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    /// Moves the selection up in the list, wrapping to bottom if at top
    fn move_selection_up(&mut self) {
        let count = self.campaign_count();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Moves the selection down in the list, wrapping to top if at bottom
    fn move_selection_down(&mut self) {
        let count = self.campaign_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Keeps the selection inside the list after it changes size
    fn clamp_selection(&mut self) {
        let count = self.campaign_count();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    /// Scrolls up in the detail view, stopping at 0
    pub fn scroll_up(&mut self) {
        self.detail_scroll_offset = self.detail_scroll_offset.saturating_sub(1);
    }

    /// Scrolls down in the detail view; the renderer clamps to content height
    pub fn scroll_down(&mut self) {
        if self.detail_scroll_offset < MAX_SCROLL {
            self.detail_scroll_offset += 1;
        }
    }

    /// Scrolls to the top of the detail view
    pub fn scroll_to_top(&mut self) {
        self.detail_scroll_offset = 0;
    }

    /// Scrolls to the bottom of the detail view
    pub fn scroll_to_bottom(&mut self) {
        self.detail_scroll_offset = MAX_SCROLL;
    }

    /// Resets detail view state when navigating away
    pub fn reset_detail_view_state(&mut self) {
        self.detail_scroll_offset = 0;
    }
}
