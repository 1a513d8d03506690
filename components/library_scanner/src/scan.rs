use crate::metadata::{song_from_file_name, song_from_path};
use crate::ScanError;
use playlist_primitives::Song;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// File extensions treated as audio, compared case-insensitively
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["mp3", "wav", "flac", "ogg", "m4a"];

/// Duration given to scanned songs whose length cannot be probed
pub const DEFAULT_DURATION: Duration = Duration::from_secs(180);

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)))
}

/// Recursively collect every audio file under `root` as a `Song`, sorted by path
pub fn scan_music_folder(root: impl AsRef<Path>) -> Result<Vec<Song>, ScanError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    info!("Scanning {}", root.display());

    let mut paths = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_audio_file(entry.path()) {
            paths.push(entry.into_path());
        }
    }

    if paths.is_empty() {
        return Err(ScanError::NoSongsFound(root.to_path_buf()));
    }

    paths.sort();
    let songs: Vec<Song> = paths
        .iter()
        .map(|path| {
            song_from_path(path, DEFAULT_DURATION).unwrap_or_else(|e| {
                warn!("{}, falling back to file name", e);
                song_from_file_name(path, DEFAULT_DURATION)
            })
        })
        .inspect(|song| debug!("Scanned {}", song))
        .collect();

    info!("Found {} songs under {}", songs.len(), root.display());
    Ok(songs)
}
