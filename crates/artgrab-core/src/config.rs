use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding `catalog.client_id`.
pub const CLIENT_ID_ENV: &str = "SPOTIFY_CLIENT_ID";
/// Environment variable overriding `catalog.client_secret`.
pub const CLIENT_SECRET_ENV: &str = "SPOTIFY_CLIENT_SECRET";

/// Download proxy parameters (`[download]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Name sent in Content-Disposition when the client omits `filename`.
    pub fallback_filename: String,
    /// Whole-request timeout for the origin GET, in seconds.
    pub timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            fallback_filename: "album-art.jpg".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Catalog provider endpoints and client credentials (`[catalog]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    /// OAuth client-credentials token endpoint.
    pub token_url: String,
    /// Base of the catalog web API; `/search` is appended.
    pub api_base: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token_url: "https://accounts.spotify.com/api/token".to_string(),
            api_base: "https://api.spotify.com/v1".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Replace credentials with `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET` when set.
    pub fn apply_env(&mut self) {
        if let Some(id) = non_empty_env(CLIENT_ID_ENV) {
            self.client_id = Some(id);
        }
        if let Some(secret) = non_empty_env(CLIENT_SECRET_ENV) {
            self.client_secret = Some(secret);
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Global configuration loaded from `~/.config/artgrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtgrabConfig {
    /// Address the HTTP service binds to.
    pub bind_addr: String,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Default for ArtgrabConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            download: DownloadConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("artgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
/// Credential environment variables are applied on top of the file.
pub fn load_or_init() -> Result<ArtgrabConfig> {
    let mut cfg = load_or_init_at(&config_path()?)?;
    cfg.catalog.apply_env();
    Ok(cfg)
}

/// Like [`load_or_init`] for an explicit path, without environment overrides.
pub fn load_or_init_at(path: &Path) -> Result<ArtgrabConfig> {
    if !path.exists() {
        let default_cfg = ArtgrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: ArtgrabConfig = toml::from_str(&data)?;
    Ok(cfg)
}
