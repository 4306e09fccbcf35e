//! OAuth client-credentials token provider
//!
//! Holds the cached `{token, expires_at}` pair behind an async mutex and
//! refreshes it on demand. An instance is injected into whatever needs a
//! bearer token; there is no process-wide credential state. Credentials are
//! read from the environment variables named in config, at refresh time,
//! the same way the LLM API key is resolved.

use std::env;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::AuthConfig;

/// Errors from credential acquisition
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0} environment variable not set")]
    MissingCredentials(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("token endpoint returned {status}: {message}")]
    TokenEndpoint { status: u16, message: String },
}

#[derive(Debug, Default)]
struct TokenState {
    token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// Injected OAuth token provider with expiry-based refresh
pub struct TokenProvider {
    http: Client,
    token_url: String,
    client_id_env: String,
    client_secret_env: String,
    ttl: Duration,
    state: Mutex<TokenState>,
}

impl TokenProvider {
    /// Create a provider from configuration. No network traffic happens
    /// until the first [`get_token`](Self::get_token) call.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let http = Client::builder().build().map_err(AuthError::Network)?;

        Ok(Self {
            http,
            token_url: config.token_url.clone(),
            client_id_env: config.client_id_env.clone(),
            client_secret_env: config.client_secret_env.clone(),
            ttl: Duration::seconds(config.token_ttl_secs as i64),
            state: Mutex::new(TokenState::default()),
        })
    }

    /// Return a valid bearer token, refreshing it if the cached one has
    /// expired. Concurrent callers serialize on the internal lock, so at
    /// most one refresh is in flight at a time.
    pub async fn get_token(&self) -> Result<String, AuthError> {
        let mut state = self.state.lock().await;

        if let (Some(token), Some(expires_at)) = (&state.token, state.expires_at)
            && Utc::now() < expires_at
        {
            debug!("get_token: cache hit");
            return Ok(token.clone());
        }

        let token = self.refresh().await?;
        state.token = Some(token.clone());
        state.expires_at = Some(Utc::now() + self.ttl);
        Ok(token)
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        let client_id = env::var(&self.client_id_env)
            .map_err(|_| AuthError::MissingCredentials(self.client_id_env.clone()))?;
        let client_secret = env::var(&self.client_secret_env)
            .map_err(|_| AuthError::MissingCredentials(self.client_secret_env.clone()))?;

        let encoded = BASE64.encode(format!("{client_id}:{client_secret}"));

        debug!(url = %self.token_url, "refresh: requesting token");
        let response = self
            .http
            .post(&self.token_url)
            .header("Authorization", format!("Basic {encoded}"))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenEndpoint { status, message });
        }

        let payload: TokenResponse = response.json().await?;
        info!("refresh: token acquired");
        Ok(payload.access_token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}
