//! `GET /api/search`: catalog search.

use std::sync::Arc;

use artgrab_core::catalog::SearchQuery;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::{ApiError, AppState};

/// Raw parameters; validated by [`SearchQuery::from_params`].
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    pub limit: Option<String>,
    pub market: Option<String>,
}

/// Answers with the provider's result set unchanged.
pub async fn search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Query(params) = params?;
    let query = SearchQuery::from_params(
        params.q.as_deref(),
        params.entity_type.as_deref(),
        params.limit.as_deref(),
        params.market.as_deref(),
    )?;
    let results = state.catalog.search_raw(&query).await?;
    Ok(Json(results))
}
