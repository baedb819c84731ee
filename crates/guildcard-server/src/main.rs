use anyhow::Result;
use clap::Parser;
use guildcard_core::AppState;
use guildcard_discord::{DiscordClient, ImageFetcher};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("guildcard=info,tower_http=debug")),
        )
        .init();

    let args = cli::Args::parse();
    let mut config = config::Config::load(&args.config)?;
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    config.validate()?;

    let state = AppState {
        config: Arc::new(config.app_config()),
        discord: DiscordClient::new(config.discord_config())?,
        images: ImageFetcher::new(&config.image_config())?,
    };

    let app = guildcard_api::build_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(
        bind_address = %config.server.bind_address,
        discord_api = %config.discord.api_base_url,
        image_cache_ttl_secs = config.images.cache_ttl_secs,
        "guildcard listening"
    );

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Could not listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutting down (ctrl-c)...");
    };

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}
