//! Download proxy: fetch an artwork image from its origin and hand it back as
//! a named attachment.
//!
//! Lifecycle of one request: `Received -> Fetching -> {StreamingResponse | Failed}`.
//! One GET per request, never retried. The body is buffered whole: artwork is
//! small and bounded by the origin, so there is no streaming or backpressure.
//! The content type is always declared as `image/jpeg`; the origin's own
//! `Content-Type` is not inspected.

mod disposition;
mod error;

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;

pub use disposition::attachment_disposition;
pub use error::{classify_transport, FailureKind, FetchFailure, ProxyError};

/// Content type declared for every proxied image.
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Stage of a proxied download, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyStage {
    Received,
    Fetching,
    StreamingResponse,
    Failed,
}

impl fmt::Display for ProxyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProxyStage::Received => "received",
            ProxyStage::Fetching => "fetching",
            ProxyStage::StreamingResponse => "streaming_response",
            ProxyStage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// What the client asks the proxy for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub source_url: String,
    pub suggested_file_name: String,
}

impl DownloadRequest {
    pub fn new(source_url: impl Into<String>, suggested_file_name: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            suggested_file_name: suggested_file_name.into(),
        }
    }

    /// Builds a request from raw query parameters. A missing `url` becomes an
    /// empty source (rejected by [`proxy_download`]); a missing or blank
    /// `filename` becomes `fallback_name`.
    pub fn from_params(
        url: Option<String>,
        filename: Option<String>,
        fallback_name: &str,
    ) -> Self {
        let file_name = filename
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| fallback_name.to_string());
        Self::new(url.unwrap_or_default(), file_name)
    }
}

/// A fetched image ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct ProxiedImage {
    pub body: Bytes,
    pub file_name: String,
}

impl ProxiedImage {
    pub fn content_type(&self) -> &'static str {
        IMAGE_CONTENT_TYPE
    }

    /// `attachment; filename="<file_name>"`.
    pub fn content_disposition(&self) -> String {
        attachment_disposition(&self.file_name)
    }
}

/// HTTP client for origin and catalog calls.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("artgrab/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Fetches `request.source_url` once and returns the whole body.
///
/// A blank source URL fails with [`ProxyError::MissingUrl`] without touching
/// the network. Any other failure is [`ProxyError::UpstreamFetchFailed`],
/// logged here with its cause.
pub async fn proxy_download(
    http: &Client,
    request: &DownloadRequest,
) -> Result<ProxiedImage, ProxyError> {
    let url = request.source_url.trim();
    tracing::debug!(stage = %ProxyStage::Received, file_name = %request.suggested_file_name, "download requested");
    if url.is_empty() {
        return Err(ProxyError::MissingUrl);
    }

    tracing::debug!(stage = %ProxyStage::Fetching, url = %url, "fetching artwork from origin");
    match fetch_origin(http, url).await {
        Ok(body) => {
            tracing::debug!(
                stage = %ProxyStage::StreamingResponse,
                url = %url,
                bytes = body.len(),
                "artwork fetched"
            );
            Ok(ProxiedImage {
                body,
                file_name: request.suggested_file_name.clone(),
            })
        }
        Err(failure) => {
            tracing::warn!(
                stage = %ProxyStage::Failed,
                url = %url,
                kind = %failure.kind(),
                "artwork fetch failed: {}",
                failure
            );
            Err(ProxyError::UpstreamFetchFailed(failure))
        }
    }
}

async fn fetch_origin(http: &Client, url: &str) -> Result<Bytes, FetchFailure> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(FetchFailure::Transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchFailure::Status(status.as_u16()));
    }

    response.bytes().await.map_err(FetchFailure::Body)
}
