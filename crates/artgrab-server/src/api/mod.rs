//! HTTP API for artgrab.
//!
//! Provides:
//! - `GET /download?url=..&filename=..`: fetch artwork from its origin and
//!   return it as an attachment
//! - `GET /api/search?q=..&type=..&limit=..&market=..`: catalog search

mod error;
pub mod handlers;

use std::sync::Arc;

use artgrab_core::catalog::CatalogClient;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Shared state for API handlers.
#[derive(Debug)]
pub struct AppState {
    /// HTTP client for origin fetches.
    pub http: reqwest::Client,
    pub catalog: CatalogClient,
    /// Used when `/download` gets no `filename`.
    pub fallback_filename: String,
}

impl AppState {
    pub fn new(http: reqwest::Client, catalog: CatalogClient, fallback_filename: String) -> Self {
        Self {
            http,
            catalog,
            fallback_filename,
        }
    }
}

/// Build the API router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    // The browser client may be served from any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/download", get(handlers::download::download))
        .route("/api/search", get(handlers::search::search))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                // Only non-success responses are logged.
                .on_request(())
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        let status = response.status();
                        if !status.is_success() {
                            tracing::warn!(
                                status = %status,
                                latency_ms = latency.as_millis(),
                                "request failed"
                            );
                        }
                    },
                ),
        )
        .with_state(state)
}

/// Start the API server.
pub async fn serve(state: Arc<AppState>, bind_addr: &str) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    tracing::info!("artgrab listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
