//! Catalog search client.

use std::future::Future;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::error::CatalogError;
use super::query::SearchQuery;
use super::token::{Credentials, TokenCache};
use super::types::SearchResponse;
use crate::config::CatalogConfig;

/// Anything that can run a catalog search. Implemented by [`CatalogClient`];
/// callers that record history take it as a generic so tests can swap it.
pub trait CatalogSearch {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchResponse, CatalogError>> + Send;
}

/// Searches the provider's web API with a cached client-credentials token.
///
/// Missing credentials do not prevent construction; every search then fails
/// with [`CatalogError::MissingCredentials`] before any network call.
#[derive(Debug)]
pub struct CatalogClient {
    http: Client,
    api_base: String,
    tokens: Option<TokenCache>,
}

impl CatalogClient {
    pub fn new(http: Client, cfg: &CatalogConfig) -> Self {
        let tokens = match Credentials::from_config(cfg) {
            Ok(credentials) => Some(TokenCache::new(http.clone(), &cfg.token_url, credentials)),
            Err(_) => {
                tracing::warn!("catalog credentials not configured; searches will fail");
                None
            }
        };
        Self {
            http,
            api_base: cfg.api_base.clone(),
            tokens,
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.tokens.is_some()
    }

    /// Typed results, for callers that render previews.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, CatalogError> {
        self.fetch(query).await
    }

    /// The provider's result set exactly as returned, paging fields included.
    pub async fn search_raw(&self, query: &SearchQuery) -> Result<serde_json::Value, CatalogError> {
        self.fetch(query).await
    }

    async fn fetch<T: DeserializeOwned>(&self, query: &SearchQuery) -> Result<T, CatalogError> {
        let tokens = self.tokens.as_ref().ok_or(CatalogError::MissingCredentials)?;
        let url = query.search_url(&self.api_base)?;
        let token = tokens.access_token().await?;

        tracing::debug!(
            query = %query.text,
            entity_type = %query.entity_type,
            limit = query.limit,
            "catalog search"
        );
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(CatalogError::Search)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // Revoked or expired early; next search will exchange again.
            tokens.invalidate().await;
        }
        if !status.is_success() {
            return Err(CatalogError::SearchRejected(status));
        }

        response.json().await.map_err(CatalogError::Search)
    }
}

impl CatalogSearch for CatalogClient {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchResponse, CatalogError>> + Send {
        CatalogClient::search(self, query)
    }
}
