//! UI rendering module for adboard
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod campaign_detail;
pub mod campaign_list;
pub mod help_overlay;
pub mod home;

pub use campaign_detail::render as render_campaign_detail;
pub use campaign_list::render_campaign_list;
pub use help_overlay::render as render_help_overlay;
pub use home::render as render_home;
