//! Command-line interface parsing for the roster fetcher
//!
//! This module handles parsing of CLI arguments using clap, with environment
//! fallbacks for credentials, and turns them into a validated [`StartupConfig`].

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::cache::DEFAULT_MAX_AGE_MINUTES;
use crate::data::roster::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::data::CredentialSource;
use crate::output::DEFAULT_OUTPUT_FILE;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// Cache max age must be at least one minute
    #[error("Invalid max age: {0} minutes. Must be greater than zero")]
    InvalidMaxAge(i64),

    /// Request timeout must be at least one second
    #[error("Invalid timeout: {0} seconds. Must be greater than zero")]
    InvalidTimeout(u64),

    /// Output path is empty
    #[error("Output path must not be empty")]
    EmptyOutput,
}

/// Roster fetcher - download the enabled user roster from GeoVictoria
#[derive(Parser, Debug)]
#[command(name = "rosterfetch")]
#[command(about = "Download the enabled user roster from GeoVictoria and save it as JSON")]
#[command(version)]
pub struct Cli {
    /// Pre-issued API token; takes precedence over --user/--password
    #[arg(long, env = "ROSTER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Login user, exchanged for a token together with --password
    #[arg(long, env = "ROSTER_USER")]
    pub user: Option<String>,

    /// Login password
    #[arg(long, env = "ROSTER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Base URL of the GeoVictoria API
    #[arg(long, env = "ROSTER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Minutes a fetched roster is served from cache
    #[arg(long, value_name = "MINUTES", default_value_t = DEFAULT_MAX_AGE_MINUTES)]
    pub max_age_minutes: i64,

    /// HTTP request timeout
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// File the roster is written to
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Do not print the roster summary
    #[arg(short, long)]
    pub quiet: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Where the authorization token comes from
    pub credentials: CredentialSource,
    /// Base URL of the API
    pub base_url: String,
    /// Freshness window of the roster cache
    pub max_age: chrono::Duration,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Output file path
    pub output: PathBuf,
    /// Whether to print the summary
    pub show_summary: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            credentials: CredentialSource::None,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_age: chrono::Duration::minutes(DEFAULT_MAX_AGE_MINUTES),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            show_summary: true,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if a value is out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.max_age_minutes <= 0 {
            return Err(CliError::InvalidMaxAge(cli.max_age_minutes));
        }
        if cli.timeout_secs == 0 {
            return Err(CliError::InvalidTimeout(cli.timeout_secs));
        }
        if cli.output.as_os_str().is_empty() {
            return Err(CliError::EmptyOutput);
        }

        Ok(StartupConfig {
            credentials: CredentialSource::from_parts(
                cli.token.clone(),
                cli.user.clone(),
                cli.password.clone(),
            ),
            base_url: cli.base_url.clone(),
            max_age: chrono::Duration::minutes(cli.max_age_minutes),
            timeout: Duration::from_secs(cli.timeout_secs),
            output: cli.output.clone(),
            show_summary: !cli.quiet,
        })
    }
}
