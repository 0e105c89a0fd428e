//! Mapping of domain errors to JSON error responses.

use artgrab_core::catalog::{CatalogError, QueryError};
use artgrab_core::proxy::ProxyError;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Params(#[from] QueryRejection),
    #[error(transparent)]
    Proxy(#[from] ProxyError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// `{"error": "...", "hint": "..."}`; `hint` only for configuration problems.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        let (status, error, hint) = match self {
            ApiError::Params(rejection) => (rejection.status(), rejection.body_text(), None),
            ApiError::Proxy(ProxyError::MissingUrl) => {
                (StatusCode::BAD_REQUEST, "Image URL is required".to_string(), None)
            }
            // Origin status and cause are logged by the proxy, never echoed.
            ApiError::Proxy(ProxyError::UpstreamFetchFailed(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to download image".to_string(),
                None,
            ),
            ApiError::Query(QueryError::EmptyQuery) => (
                StatusCode::BAD_REQUEST,
                "Query parameter is required".to_string(),
                None,
            ),
            ApiError::Query(e) => (StatusCode::BAD_REQUEST, e.to_string(), None),
            ApiError::Catalog(e) if e.is_configuration() => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Catalog credentials not configured".to_string(),
                e.remediation_hint(),
            ),
            ApiError::Catalog(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to search catalog".to_string(),
                None,
            ),
        };
        (status, ErrorBody { error, hint })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Catalog(e) = &self {
            tracing::error!("catalog search failed: {}", e);
        }
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}
