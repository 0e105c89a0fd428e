//! Proxy errors and origin failure classification.
//!
//! Every origin failure becomes one [`ProxyError::UpstreamFetchFailed`]; the
//! [`FetchFailure`] inside it carries the cause for server-side logs only.

use std::fmt;

/// Coarse cause of a failed origin fetch, for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connect or read timed out.
    Timeout,
    /// DNS, TLS, refused or reset connection.
    Connection,
    /// The URL or request could not be built.
    Request,
    /// Origin answered with a non-2xx status.
    Status(u16),
    /// Headers arrived but the body could not be read.
    Body,
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Connection => write!(f, "connection"),
            FailureKind::Request => write!(f, "request"),
            FailureKind::Status(code) => write!(f, "http {}", code),
            FailureKind::Body => write!(f, "body"),
            FailureKind::Other => write!(f, "other"),
        }
    }
}

/// Why an origin fetch failed.
#[derive(Debug)]
pub enum FetchFailure {
    /// The request never produced a response.
    Transport(reqwest::Error),
    /// Origin answered with a non-success status.
    Status(u16),
    /// The response body could not be read.
    Body(reqwest::Error),
}

impl FetchFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchFailure::Transport(e) => classify_transport(e),
            FetchFailure::Status(code) => FailureKind::Status(*code),
            FetchFailure::Body(_) => FailureKind::Body,
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Transport(e) => write!(f, "{}", e),
            FetchFailure::Status(code) => write!(f, "origin returned HTTP {}", code),
            FetchFailure::Body(e) => write!(f, "reading body: {}", e),
        }
    }
}

impl std::error::Error for FetchFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchFailure::Transport(e) | FetchFailure::Body(e) => Some(e),
            FetchFailure::Status(_) => None,
        }
    }
}

/// Classify a transport-level reqwest error.
pub fn classify_transport(e: &reqwest::Error) -> FailureKind {
    if e.is_timeout() {
        return FailureKind::Timeout;
    }
    if e.is_connect() {
        return FailureKind::Connection;
    }
    if e.is_builder() || e.is_request() || e.is_redirect() {
        return FailureKind::Request;
    }
    if e.is_body() || e.is_decode() {
        return FailureKind::Body;
    }
    FailureKind::Other
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// `url` missing or blank; detected before any network call.
    #[error("image URL is required")]
    MissingUrl,
    /// Any origin failure. Display stays generic; the cause is in `source()`.
    #[error("failed to download image")]
    UpstreamFetchFailed(#[source] FetchFailure),
}
