//! Recent-search history: up to five distinct queries, most recent first.
//!
//! The list is owned by whoever issues searches (see [`crate::session`]) and
//! persisted through an injected [`HistoryStore`].

mod store;

pub use store::{HistoryStore, JsonFileStore, MemoryStore};

/// Maximum number of remembered queries.
pub const HISTORY_CAPACITY: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history io: {0}")]
    Io(#[from] std::io::Error),
    #[error("history format: {0}")]
    Json(#[from] serde_json::Error),
    #[error("history location: {0}")]
    Location(#[from] xdg::BaseDirectoriesError),
    #[error("history store lock poisoned")]
    Poisoned,
}

#[derive(Debug)]
pub struct RecentSearches<S: HistoryStore> {
    entries: Vec<String>,
    store: S,
}

impl<S: HistoryStore> RecentSearches<S> {
    /// Loads the stored list. Unreadable history is logged and replaced by an
    /// empty list rather than blocking searches.
    pub fn open(store: S) -> Self {
        let entries = match store.load() {
            Ok(entries) => normalize(entries),
            Err(e) => {
                tracing::warn!("ignoring unreadable search history: {}", e);
                Vec::new()
            }
        };
        Self { entries, store }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves `query` to the front (inserting it if new) and drops the oldest
    /// entry past capacity. Blank queries are ignored.
    pub fn add(&mut self, query: &str) -> Result<(), HistoryError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }
        let mut next = Vec::with_capacity(HISTORY_CAPACITY);
        next.push(query.to_string());
        next.extend(self.entries.iter().filter(|q| *q != query).cloned());
        next.truncate(HISTORY_CAPACITY);
        self.commit(next)
    }

    /// Removes `query` if present. Returns whether anything was removed.
    pub fn remove(&mut self, query: &str) -> Result<bool, HistoryError> {
        let query = query.trim();
        if !self.entries.iter().any(|q| q == query) {
            return Ok(false);
        }
        let next = self.entries.iter().filter(|q| *q != query).cloned().collect();
        self.commit(next)?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.store.clear()?;
        self.entries.clear();
        Ok(())
    }

    /// Persists `next`, then adopts it; on a store error memory is untouched.
    fn commit(&mut self, next: Vec<String>) -> Result<(), HistoryError> {
        self.store.save(&next)?;
        self.entries = next;
        Ok(())
    }
}

/// Trims, drops blanks and duplicates (keeping the first), and caps length.
fn normalize(entries: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(HISTORY_CAPACITY);
    for e in entries {
        let e = e.trim();
        if !e.is_empty() && !out.iter().any(|q| q == e) {
            out.push(e.to_string());
        }
        if out.len() == HISTORY_CAPACITY {
            break;
        }
    }
    out
}
