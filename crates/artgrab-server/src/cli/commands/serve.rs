//! `artgrab serve` – run the HTTP service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use artgrab_core::catalog::CatalogClient;
use artgrab_core::config::ArtgrabConfig;
use artgrab_core::proxy;

use crate::api::{self, AppState};

pub async fn run_serve(cfg: &ArtgrabConfig, bind: Option<&str>) -> Result<()> {
    let http = proxy::build_client(Duration::from_secs(cfg.download.timeout_secs))
        .context("building HTTP client")?;
    let catalog = CatalogClient::new(http.clone(), &cfg.catalog);
    let state = Arc::new(AppState::new(
        http,
        catalog,
        cfg.download.fallback_filename.clone(),
    ));

    let bind_addr = bind.unwrap_or(&cfg.bind_addr);
    api::serve(state, bind_addr).await
}
