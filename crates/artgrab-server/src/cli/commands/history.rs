//! `artgrab history` – list, remove or clear recent searches.

use anyhow::{Context, Result};
use artgrab_core::history::{HistoryStore, JsonFileStore, RecentSearches};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    List,
    Remove(String),
    Clear,
}

pub fn run_history(action: HistoryAction) -> Result<()> {
    let store = JsonFileStore::open_default().context("locating search history")?;
    let mut history = RecentSearches::open(store);
    print!("{}", apply(&mut history, action)?);
    Ok(())
}

fn apply<S: HistoryStore>(history: &mut RecentSearches<S>, action: HistoryAction) -> Result<String> {
    let out = match action {
        HistoryAction::List if history.is_empty() => "No recent searches.\n".to_string(),
        HistoryAction::List => history
            .entries()
            .iter()
            .enumerate()
            .map(|(i, q)| format!("{}. {}\n", i + 1, q))
            .collect::<String>(),
        HistoryAction::Remove(q) => {
            if history.remove(&q)? {
                format!("Removed \"{}\".\n", q.trim())
            } else {
                format!("\"{}\" is not in recent searches.\n", q.trim())
            }
        }
        HistoryAction::Clear => {
            history.clear()?;
            "Cleared recent searches.\n".to_string()
        }
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use artgrab_core::history::MemoryStore;

    fn history(entries: &[&str]) -> RecentSearches<MemoryStore> {
        RecentSearches::open(MemoryStore::with_entries(
            entries.iter().map(|s| s.to_string()).collect(),
        ))
    }

    #[test]
    fn list_numbers_entries() {
        let mut h = history(&["b", "a"]);
        assert_eq!(apply(&mut h, HistoryAction::List).unwrap(), "1. b\n2. a\n");
    }

    #[test]
    fn list_empty() {
        let mut h = history(&[]);
        assert_eq!(
            apply(&mut h, HistoryAction::List).unwrap(),
            "No recent searches.\n"
        );
    }

    #[test]
    fn remove_and_clear() {
        let mut h = history(&["b", "a"]);
        assert_eq!(
            apply(&mut h, HistoryAction::Remove("a".into())).unwrap(),
            "Removed \"a\".\n"
        );
        assert_eq!(
            apply(&mut h, HistoryAction::Remove("zz".into())).unwrap(),
            "\"zz\" is not in recent searches.\n"
        );
        apply(&mut h, HistoryAction::Clear).unwrap();
        assert!(h.is_empty());
    }
}
