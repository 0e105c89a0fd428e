//! Persistence backends for recent searches.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::HistoryError;

/// Where recent searches are persisted. Injected into [`super::RecentSearches`].
pub trait HistoryStore {
    /// Previously saved entries, most recent first. Missing storage is an empty list.
    fn load(&self) -> Result<Vec<String>, HistoryError>;
    fn save(&self, entries: &[String]) -> Result<(), HistoryError>;
    /// Removes the stored list entirely.
    fn clear(&self) -> Result<(), HistoryError>;
}

/// JSON array in a file, e.g. `~/.local/share/artgrab/recent-searches.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default XDG data location.
    pub fn open_default() -> Result<Self, HistoryError> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("artgrab")?;
        let path = xdg_dirs.place_data_file("recent-searches.json")?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<String>, HistoryError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, entries: &[String]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<String>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<String>, HistoryError> {
        Ok(self.entries.lock().map_err(|_| HistoryError::Poisoned)?.clone())
    }

    fn save(&self, entries: &[String]) -> Result<(), HistoryError> {
        *self.entries.lock().map_err(|_| HistoryError::Poisoned)? = entries.to_vec();
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        self.entries.lock().map_err(|_| HistoryError::Poisoned)?.clear();
        Ok(())
    }
}
