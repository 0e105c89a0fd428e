//! `artgrab search <query>` – search the catalog and list artwork per result.

use std::time::Duration;

use anyhow::{Context, Result};
use artgrab_core::artwork::{PreviewArtwork, Previewable};
use artgrab_core::catalog::{CatalogClient, EntityType, Market, SearchQuery, SearchResponse};
use artgrab_core::config::ArtgrabConfig;
use artgrab_core::history::{JsonFileStore, RecentSearches};
use artgrab_core::proxy;
use artgrab_core::session::SearchSession;

pub async fn run_search(
    cfg: &ArtgrabConfig,
    text: &str,
    entity_type: EntityType,
    limit: u32,
    market: Option<&str>,
) -> Result<()> {
    let market = market.map(str::parse::<Market>).transpose()?;
    let query = SearchQuery::new(text, entity_type)?
        .with_limit(limit)
        .with_market(market);

    let http = proxy::build_client(Duration::from_secs(cfg.download.timeout_secs))
        .context("building HTTP client")?;
    let catalog = CatalogClient::new(http, &cfg.catalog);
    let history = RecentSearches::open(
        JsonFileStore::open_default().context("locating search history")?,
    );
    let mut session = SearchSession::new(catalog, history);

    let results = match session.search(&query).await {
        Ok(results) => results,
        Err(err) => match err.remediation_hint() {
            Some(hint) => anyhow::bail!("{}. {}", err, hint),
            None => return Err(err).context("catalog search failed"),
        },
    };

    print!("{}", render_results(&results));
    Ok(())
}

/// One block per result: title, owners, provider link, and the largest
/// artwork with its download file name followed by every available size.
pub(crate) fn render_results(results: &SearchResponse) -> String {
    let previews = previews(results);
    if previews.is_empty() {
        return "No results.\n".to_string();
    }
    previews.iter().map(render_preview).collect()
}

fn previews(results: &SearchResponse) -> Vec<PreviewArtwork> {
    let mut previews = Vec::new();
    if let Some(page) = &results.albums {
        previews.extend(page.items.iter().map(|a| Previewable::from(a).to_preview()));
    }
    if let Some(page) = &results.tracks {
        previews.extend(page.items.iter().map(|t| Previewable::from(t).to_preview()));
    }
    if let Some(page) = &results.playlists {
        previews.extend(page.items.iter().map(|p| Previewable::from(p).to_preview()));
    }
    if let Some(page) = &results.artists {
        previews.extend(page.items.iter().map(|a| Previewable::from(a).to_preview()));
    }
    previews
}

fn render_preview(p: &PreviewArtwork) -> String {
    let mut out = format!("{} - {}\n", p.owners_label(), p.title);
    if let Some(link) = &p.origin_url {
        out.push_str(&format!("  link:    {}\n", link));
    }
    let Some(req) = p.largest_download() else {
        out.push_str("  artwork: unavailable\n");
        return out;
    };
    out.push_str(&format!("  artwork: {}\n", req.source_url));
    out.push_str(&format!("  save as: {}\n", req.suggested_file_name));
    for option in p.download_options() {
        out.push_str(&format!(
            "    {:<6} {:>11}  {}\n",
            option.size.title(),
            option.dimensions,
            option.request.source_url
        ));
    }
    out
}
