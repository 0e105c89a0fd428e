//! `GET /download`: artwork download proxy.

use std::sync::Arc;

use artgrab_core::proxy::{proxy_download, DownloadRequest};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::api::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub url: Option<String>,
    pub filename: Option<String>,
}

/// Fetch `url` once and return it as an `image/jpeg` attachment named `filename`.
pub async fn download(
    State(state): State<Arc<AppState>>,
    params: Result<Query<DownloadParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let request = DownloadRequest::from_params(params.url, params.filename, &state.fallback_filename);
    let image = proxy_download(&state.http, &request).await?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type().to_string()),
            (header::CONTENT_DISPOSITION, image.content_disposition()),
        ],
        image.body,
    ))
}
