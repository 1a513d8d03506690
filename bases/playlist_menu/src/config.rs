// bases/playlist_menu/src/config.rs
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "playlists.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file playlists are loaded from and saved to
    pub data_file: PathBuf,
}

/// Interactive music playlist manager
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Playlist data file (defaults to playlists.json in the working directory)
    #[arg(short, long)]
    pub data_file: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: CliArgs) -> Self {
        Self {
            data_file: args
                .data_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
        }
    }
}
