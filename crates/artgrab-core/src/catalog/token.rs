//! Client-credentials token exchange with an expiry-aware, single-flight cache.
//!
//! The cached token sits behind an async mutex that stays locked for the
//! whole exchange, so at most one token request is in flight and callers that
//! queue behind it pick up the freshly stored token.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::error::CatalogError;
use crate::config::CatalogConfig;

/// Tokens are refreshed this long before the provider says they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Client id and secret for the provider's client-credentials grant.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Both values must be present and non-blank.
    pub fn from_config(cfg: &CatalogConfig) -> Result<Self, CatalogError> {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        match (present(&cfg.client_id), present(&cfg.client_secret)) {
            (Some(client_id), Some(client_secret)) => Ok(Self {
                client_id,
                client_secret,
            }),
            _ => Err(CatalogError::MissingCredentials),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.refresh_at
    }
}

/// Holds at most one access token and refreshes it on demand.
#[derive(Debug)]
pub struct TokenCache {
    http: Client,
    token_url: String,
    credentials: Credentials,
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(http: Client, token_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            credentials,
            slot: Mutex::new(None),
        }
    }

    /// Returns a valid access token, exchanging credentials only when the
    /// cached one is missing or about to expire.
    pub async fn access_token(&self) -> Result<String, CatalogError> {
        let mut slot = self.slot.lock().await;
        if let Some(token) = slot.as_ref().filter(|t| t.is_fresh(Instant::now())) {
            return Ok(token.value.clone());
        }

        let token = self.exchange().await?;
        let value = token.value.clone();
        *slot = Some(token);
        Ok(value)
    }

    /// Drops the cached token (e.g. after the API rejected it).
    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
    }

    async fn exchange(&self) -> Result<CachedToken, CatalogError> {
        tracing::debug!(url = %self.token_url, "requesting catalog access token");
        let requested_at = Instant::now();
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(CatalogError::Token)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::TokenRejected(status));
        }

        let body: TokenResponse = response.json().await.map_err(CatalogError::Token)?;
        if let Some(kind) = body.token_type.as_deref() {
            if !kind.eq_ignore_ascii_case("bearer") {
                tracing::warn!("unexpected token type {:?}", kind);
            }
        }
        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(EXPIRY_MARGIN);
        tracing::info!(
            expires_in = body.expires_in,
            "obtained catalog access token"
        );
        Ok(CachedToken {
            value: body.access_token,
            refresh_at: requested_at + lifetime,
        })
    }
}
