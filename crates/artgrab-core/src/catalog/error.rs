//! Catalog client errors.

use reqwest::StatusCode;

use crate::config::{CLIENT_ID_ENV, CLIENT_SECRET_ENV};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Client id or secret absent; reported separately from search failures.
    #[error("catalog credentials not configured")]
    MissingCredentials,
    #[error("token request failed: {0}")]
    Token(#[source] reqwest::Error),
    #[error("token endpoint returned HTTP {0}")]
    TokenRejected(StatusCode),
    #[error("search request failed: {0}")]
    Search(#[source] reqwest::Error),
    #[error("search endpoint returned HTTP {0}")]
    SearchRejected(StatusCode),
    #[error("invalid catalog endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl CatalogError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, CatalogError::MissingCredentials)
    }

    /// What to tell the user for configuration problems.
    pub fn remediation_hint(&self) -> Option<String> {
        match self {
            CatalogError::MissingCredentials => Some(format!(
                "Set {} and {}",
                CLIENT_ID_ENV, CLIENT_SECRET_ENV
            )),
            _ => None,
        }
    }
}
