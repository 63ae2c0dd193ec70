//! The `serve` command.

use super::{open_store, openai_client};
use clap::Args;
use recap_core::config::BindMode;
use recap_core::Config;
use recap_pipeline::{backfill_embeddings, LiveSessionManager, MeetingPipeline};
use recap_server::{AppState, Server};
use std::sync::Arc;
use tracing::info;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Override the configured port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind to all interfaces instead of loopback
    #[arg(long)]
    pub lan: bool,

    /// Skip the startup embedding backfill
    #[arg(long)]
    pub no_backfill: bool,
}

/// Run the HTTP server.
pub async fn run(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.lan {
        config.server.bind = BindMode::Lan;
    }

    recap_core::paths::ensure_dirs()?;

    let client = openai_client(&config)?;
    let store = open_store(&config)?;

    if !args.no_backfill {
        let updated = backfill_embeddings(store.as_ref(), client.as_ref()).await?;
        if updated > 0 {
            info!(updated, "backfilled embeddings for stored meetings");
        }
    }

    let pipeline = Arc::new(MeetingPipeline::new(
        client.clone(),
        client.clone(),
        client.clone(),
        client.clone(),
        store.clone(),
    ));
    let live = Arc::new(LiveSessionManager::new(client.clone()));

    let state = AppState::new(config, store, pipeline, client.clone(), client, live);
    Server::new(state).run().await?;

    Ok(())
}
