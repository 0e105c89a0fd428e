//! A search session: the catalog plus the history it records into.

use crate::catalog::{CatalogError, CatalogSearch, SearchQuery, SearchResponse};
use crate::history::{HistoryStore, RecentSearches};

/// Issues searches and remembers them. Both collaborators are passed in.
pub struct SearchSession<C, S: HistoryStore> {
    catalog: C,
    history: RecentSearches<S>,
}

impl<C: CatalogSearch, S: HistoryStore> SearchSession<C, S> {
    pub fn new(catalog: C, history: RecentSearches<S>) -> Self {
        Self { catalog, history }
    }

    /// Records the query, then searches. The query is remembered even when the
    /// search itself fails; a history write failure never fails the search.
    pub async fn search(&mut self, query: &SearchQuery) -> Result<SearchResponse, CatalogError> {
        if let Err(e) = self.history.add(&query.text) {
            tracing::warn!("could not record search history: {}", e);
        }
        self.catalog.search(query).await
    }

    pub fn history(&self) -> &RecentSearches<S> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut RecentSearches<S> {
        &mut self.history
    }
}
