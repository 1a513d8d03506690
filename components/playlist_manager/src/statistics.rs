use playlist_primitives::{duration, Playlist};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Aggregate counts over the whole collection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total_playlists: usize,
    pub total_songs: usize,
    #[serde(with = "duration::nanos")]
    pub total_duration: Duration,
    pub genre_counts: BTreeMap<String, usize>,
    pub artist_counts: BTreeMap<String, usize>,
}

impl Statistics {
    pub(crate) fn collect(playlists: &[Playlist]) -> Self {
        let mut stats = Statistics {
            total_playlists: playlists.len(),
            ..Default::default()
        };

        for playlist in playlists {
            stats.total_songs += playlist.len();
            stats.total_duration = stats.total_duration.saturating_add(playlist.total_duration());

            for song in playlist.songs() {
                *stats.genre_counts.entry(song.genre.clone()).or_insert(0) += 1;
                *stats.artist_counts.entry(song.artist.clone()).or_insert(0) += 1;
            }
        }

        stats
    }

    /// Genres, most common first
    pub fn genres_by_count(&self) -> Vec<(&str, usize)> {
        sorted_by_count(&self.genre_counts)
    }

    /// Artists, most common first
    pub fn artists_by_count(&self) -> Vec<(&str, usize)> {
        sorted_by_count(&self.artist_counts)
    }
}

fn sorted_by_count(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut sorted: Vec<_> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    // stable sort keeps alphabetical order between equal counts
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}
