//! GeoVictoria roster API client
//!
//! Issues the authenticated `User/ListComplete` call and decodes the response
//! into raw user records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use thiserror::Error;
use tracing::{debug, info};

use super::{CredentialSource, RawUserRecord};

/// Base URL for the GeoVictoria customer API
pub const DEFAULT_BASE_URL: &str = "https://customerapi.geovictoria.com/api/v1";

/// Path of the roster listing endpoint, relative to the base URL
const ROSTER_PATH: &str = "User/ListComplete";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest slice of an error body kept in error messages
const ERROR_BODY_LIMIT: usize = 200;

/// Errors that can occur when fetching the roster
///
/// All three are handled the same way by the fetch orchestrator; the variant
/// only tells the log reader what went wrong.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No usable authorization token
    #[error("Credential missing: {0}")]
    CredentialMissing(String),

    /// Network failure or non-success status
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Response body is not a list of records
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::UpstreamUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::MalformedResponse(e.to_string())
    }
}

/// Anything that can produce the raw roster
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Fetches every user record known upstream
    async fn fetch_raw(&self) -> Result<Vec<RawUserRecord>, FetchError>;
}

/// Client for the GeoVictoria roster endpoint
#[derive(Debug, Clone)]
pub struct RosterClient {
    client: Client,
    base_url: String,
    credentials: CredentialSource,
}

impl RosterClient {
    /// Creates a client against the default base URL
    ///
    /// # Errors
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(credentials: CredentialSource, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_BASE_URL, credentials, timeout)
    }

    /// Creates a client against a custom base URL
    pub fn with_base_url(
        base_url: impl Into<String>,
        credentials: CredentialSource,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn roster_url(&self) -> String {
        format!("{}/{}", self.base_url, ROSTER_PATH)
    }
}

#[async_trait]
impl RosterSource for RosterClient {
    async fn fetch_raw(&self) -> Result<Vec<RawUserRecord>, FetchError> {
        // Fails before any roster request is sent when no token is available
        let authorization = self
            .credentials
            .authorization(&self.client, &self.base_url)
            .await?;

        let url = self.roster_url();
        debug!(%url, credentials = self.credentials.kind(), "requesting roster");

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, authorization)
            .header(header::ACCEPT, "application/json")
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::UpstreamUnavailable(format!(
                "status {}: {}",
                status,
                truncate(&text, ERROR_BODY_LIMIT)
            )));
        }

        let records = parse_records(&text)?;
        info!(count = records.len(), "roster received");
        Ok(records)
    }
}

/// Decodes a response body as a JSON array of objects
fn parse_records(text: &str) -> Result<Vec<RawUserRecord>, FetchError> {
    Ok(serde_json::from_str::<Vec<RawUserRecord>>(text)?)
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
