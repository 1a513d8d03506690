// bases/playlist_server/src/config.rs
use clap::Parser;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// JSON file playlists are loaded from and saved to
    pub data_file: PathBuf,

    /// Directory served at `/`, if any
    pub static_dir: Option<PathBuf>,
}

/// Playlist manager web server
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Port to listen on (default 8080)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Playlist data file (default playlists.json)
    #[arg(short, long)]
    pub data_file: Option<PathBuf>,

    /// Serve a web frontend from this directory
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: CliArgs) -> Self {
        Self {
            port: args.port.unwrap_or(8080),
            data_file: args
                .data_file
                .unwrap_or_else(|| PathBuf::from("playlists.json")),
            static_dir: args.static_dir,
        }
    }
}
