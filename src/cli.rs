//! Command-line interface parsing for adboard
//!
//! This module handles parsing of CLI arguments using clap, including the ad
//! account selection and the --refresh flag for bypassing the cache on startup.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Prefix the Graph API expects on ad account ids
const ACCOUNT_PREFIX: &str = "act_";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// No account was given on the command line or in the environment
    #[error("No ad account given. Pass --account act_<ID> or set META_AD_ACCOUNT_ID")]
    MissingAccount,

    /// The account id contains characters the Graph API never uses
    #[error("Invalid account: '{0}'. Expected act_<digits> or just the digits")]
    InvalidAccount(String),
}

/// adboard - Active Meta ad campaigns, audiences and creatives in your terminal
#[derive(Parser, Debug)]
#[command(name = "adboard")]
#[command(about = "Active Meta ad campaigns, audiences and creatives in your terminal")]
#[command(version)]
pub struct Cli {
    /// Ad account to read
    ///
    /// Examples:
    ///   adboard --account act_1837837733021085
    ///   adboard --account 1837837733021085     # act_ prefix is added
    #[arg(long, env = "META_AD_ACCOUNT_ID", value_name = "ACCOUNT_ID")]
    pub account: Option<String>,

    /// Ignore the cache and fetch fresh data from the API on startup
    #[arg(long)]
    pub refresh: bool,

    /// Where to keep the campaign cache (defaults to the user cache directory)
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// Graph API host, for pointing at a local test server
    #[arg(long, value_name = "URL", hide = true)]
    pub api_base_url: Option<String>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Ad account to read, `act_`-prefixed
    pub account_id: String,
    /// Whether the first load should bypass the cache
    pub force_refresh: bool,
    /// Cache file override
    pub cache_file: Option<PathBuf>,
    /// Graph API host override
    pub api_base_url: Option<String>,
}

/// Parses an account argument into the `act_<digits>` form.
///
/// # Arguments
/// * `s` - The account string from CLI or environment
///
/// # Returns
/// * `Ok(String)` with the `act_` prefix present
/// * `Err(CliError::InvalidAccount)` if the id is empty or has stray characters
pub fn parse_account_arg(s: &str) -> Result<String, CliError> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix(ACCOUNT_PREFIX).unwrap_or(trimmed);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CliError::InvalidAccount(s.to_string()));
    }

    Ok(format!("{}{}", ACCOUNT_PREFIX, digits))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with a normalized account id
    /// * `Err(CliError)` if the account is missing or invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let account = cli.account.as_deref().ok_or(CliError::MissingAccount)?;

        Ok(StartupConfig {
            account_id: parse_account_arg(account)?,
            force_refresh: cli.refresh,
            cache_file: cli.cache_file.clone(),
            api_base_url: cli.api_base_url.clone(),
        })
    }
}
