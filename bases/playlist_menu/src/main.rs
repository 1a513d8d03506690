// bases/playlist_menu/src/main.rs
use clap::Parser;
use color_eyre::Result;
use playlist_manager::PlaylistManager;
use playlist_storage::JsonStorage;
use std::io;

mod config;
mod input;
mod menu;

fn main() -> Result<()> {
    color_eyre::install()?;

    // Logs go to stderr at warn so they stay out of the prompt
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = config::CliArgs::parse();
    let config = config::Config::from_args(args);

    let manager = PlaylistManager::new(JsonStorage::new(&config.data_file));
    if let Err(e) = manager.load() {
        tracing::warn!(
            "Could not load {}, starting with no playlists: {}",
            config.data_file.display(),
            e
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::Menu::new(&manager, stdin.lock(), stdout.lock()).run()?;

    Ok(())
}
