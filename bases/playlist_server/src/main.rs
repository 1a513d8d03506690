// bases/playlist_server/src/main.rs
use clap::Parser;
use color_eyre::Result;
use playlist_manager::PlaylistManager;
use playlist_storage::JsonStorage;
use std::sync::Arc;

mod config;
mod error;
mod server;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "playlist_server=info,playlist_manager=info,tower_http=info".into()
            }),
        )
        .init();

    let args = config::CliArgs::parse();
    let config = config::Config::from_args(args);

    let manager = PlaylistManager::new(JsonStorage::new(&config.data_file));
    if let Err(e) = manager.load() {
        tracing::warn!("Could not load playlists: {}", e);
        tracing::warn!("   Starting with an empty playlist collection");
    }

    server::run(Arc::new(manager), config).await?;

    Ok(())
}
