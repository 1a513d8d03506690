use crossbeam::channel;
use playlist_primitives::{Playlist, PlaylistId, Song};
use serde::Serialize;
use std::fmt;
use std::thread;

/// A matching song and the playlist it was found in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub song: Song,
    pub playlist_name: String,
    pub playlist_id: PlaylistId,
}

impl SearchResult {
    fn new(playlist: &Playlist, song: &Song) -> Self {
        Self {
            song: song.clone(),
            playlist_name: playlist.name().to_string(),
            playlist_id: playlist.id().clone(),
        }
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (in playlist: {})", self.song, self.playlist_name)
    }
}

/// Scan every playlist on its own worker and gather the matches
///
/// Results arrive in whatever order the workers emit them. The function
/// returns only after every worker has finished.
pub(crate) fn fan_out(playlists: &[Playlist], query: &str) -> Vec<SearchResult> {
    let needle = query.to_lowercase();
    let (tx, rx) = channel::unbounded();

    thread::scope(|scope| {
        for playlist in playlists {
            let tx = tx.clone();
            let needle = needle.as_str();
            scope.spawn(move || {
                for song in playlist.songs() {
                    if song.matches_lowercase(needle) {
                        // rx lives until the scope ends, so send cannot fail
                        let _ = tx.send(SearchResult::new(playlist, song));
                    }
                }
            });
        }

        // Workers hold the remaining senders; the drain ends when the last one exits.
        drop(tx);
        rx.iter().collect()
    })
}
