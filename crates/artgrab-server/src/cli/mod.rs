//! CLI for artgrab: run the HTTP service, or search from the terminal.

mod commands;

use anyhow::Result;
use artgrab_core::catalog::EntityType;
use artgrab_core::config;
use clap::{Parser, Subcommand};

use commands::{run_history, run_search, run_serve, HistoryAction};

/// Top-level CLI for artgrab.
#[derive(Debug, Parser)]
#[command(name = "artgrab")]
#[command(about = "artgrab: search a music catalog and save artwork", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the HTTP service (download proxy and search API).
    Serve {
        /// Address to bind; overrides `bind_addr` from config.toml.
        #[arg(long, env = "ARTGRAB_BIND")]
        bind: Option<String>,
    },

    /// Search the catalog and print artwork for each result.
    Search {
        /// Free-text query.
        query: String,

        /// Entity type: album, artist, track or playlist.
        #[arg(long = "type", default_value = "album", value_parser = parse_entity_type)]
        entity_type: EntityType,

        /// Number of results (1-50).
        #[arg(long, default_value = "20")]
        limit: u32,

        /// Two-letter market (country) code.
        #[arg(long)]
        market: Option<String>,
    },

    /// Show or edit recent searches.
    History {
        /// Forget one query.
        #[arg(long, value_name = "QUERY", conflicts_with = "clear")]
        remove: Option<String>,

        /// Forget all queries.
        #[arg(long)]
        clear: bool,
    },
}

fn parse_entity_type(s: &str) -> Result<EntityType, String> {
    s.parse().map_err(|e: artgrab_core::catalog::QueryError| e.to_string())
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!(
            bind_addr = %cfg.bind_addr,
            has_credentials = cfg.catalog.client_id.is_some() && cfg.catalog.client_secret.is_some(),
            "loaded config"
        );

        match cli.command {
            CliCommand::Serve { bind } => run_serve(&cfg, bind.as_deref()).await?,
            CliCommand::Search {
                query,
                entity_type,
                limit,
                market,
            } => run_search(&cfg, &query, entity_type, limit, market.as_deref()).await?,
            CliCommand::History { remove, clear } => {
                let action = match (remove, clear) {
                    (Some(q), _) => HistoryAction::Remove(q),
                    (None, true) => HistoryAction::Clear,
                    (None, false) => HistoryAction::List,
                };
                run_history(action)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
