//! Credential sources for the roster API
//!
//! The `Authorization` header value either comes from a pre-issued token or
//! from a login call made just before the roster request.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::roster::FetchError;

const BEARER_PREFIX: &str = "Bearer ";

/// Where the authorization token comes from
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// A token issued out of band, e.g. read from the environment
    Token(String),
    /// Username and password exchanged for a token at `/login`
    Login { user: String, password: String },
    /// Nothing configured
    None,
}

// Keep secrets out of logs and panic messages.
impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Token(_) => f.write_str("Token(***)"),
            CredentialSource::Login { user, .. } => f
                .debug_struct("Login")
                .field("user", user)
                .field("password", &"***")
                .finish(),
            CredentialSource::None => f.write_str("None"),
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "User")]
    user: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

impl CredentialSource {
    /// Picks a source from optional settings; a token takes precedence over a login
    pub fn from_parts(token: Option<String>, user: Option<String>, password: Option<String>) -> Self {
        match (non_empty(token), non_empty(user), non_empty(password)) {
            (Some(token), _, _) => CredentialSource::Token(token),
            (None, Some(user), Some(password)) => CredentialSource::Login { user, password },
            _ => CredentialSource::None,
        }
    }

    /// Short label for log output
    pub fn kind(&self) -> &'static str {
        match self {
            CredentialSource::Token(_) => "token",
            CredentialSource::Login { .. } => "login",
            CredentialSource::None => "none",
        }
    }

    /// Produces the `Authorization` header value
    ///
    /// Any failure, including a failed login, is reported as
    /// [`FetchError::CredentialMissing`].
    pub async fn authorization(&self, client: &Client, base_url: &str) -> Result<String, FetchError> {
        match self {
            CredentialSource::Token(token) => Ok(bearer(token)),
            CredentialSource::Login { user, password } => {
                let token = login(client, base_url, user, password).await?;
                Ok(bearer(&token))
            }
            CredentialSource::None => Err(FetchError::CredentialMissing(
                "no token or login credentials configured".to_string(),
            )),
        }
    }
}

/// Exchanges a username and password for a token
async fn login(client: &Client, base_url: &str, user: &str, password: &str) -> Result<String, FetchError> {
    let url = format!("{}/login", base_url.trim_end_matches('/'));
    debug!(%url, user, "authenticating");

    let response = client
        .post(&url)
        .json(&LoginRequest { user, password })
        .send()
        .await
        .map_err(|e| FetchError::CredentialMissing(format!("login request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::CredentialMissing(format!(
            "login rejected with status {}",
            status
        )));
    }

    let text = response
        .text()
        .await
        .map_err(|e| FetchError::CredentialMissing(format!("login response unreadable: {}", e)))?;
    let body: LoginResponse = serde_json::from_str(&text)
        .map_err(|e| FetchError::CredentialMissing(format!("login response is not valid JSON: {}", e)))?;

    match non_empty(body.token) {
        Some(token) => {
            info!(user, "authenticated");
            Ok(token)
        }
        None => Err(FetchError::CredentialMissing(
            "login response did not include a token".to_string(),
        )),
    }
}

fn bearer(token: &str) -> String {
    let token = token.trim();
    let has_scheme = token
        .get(..BEARER_PREFIX.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(BEARER_PREFIX));
    if has_scheme {
        token.to_string()
    } else {
        format!("{}{}", BEARER_PREFIX, token)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
