use crate::duration::format_duration;
use crate::ids::{PlaylistId, SongId};
use crate::song::Song;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A named, ordered collection of songs
///
/// Song order is playback order. The id and creation time are fixed at
/// construction; `updated_at` moves forward on every song mutation and
/// never drops below `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    id: PlaylistId,
    name: String,
    description: String,
    #[serde(default)]
    songs: Vec<Song>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Playlist {
    /// Create an empty playlist with a fresh id
    ///
    /// The name is not validated here; input boundaries reject empty names.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            description: description.into(),
            songs: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &PlaylistId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn song(&self, id: &SongId) -> Option<&Song> {
        self.songs.iter().find(|song| &song.id == id)
    }

    /// Append a song; duplicate ids are the caller's problem
    pub fn add_song(&mut self, song: Song) {
        self.songs.push(song);
        self.touch();
    }

    pub fn add_songs(&mut self, songs: impl IntoIterator<Item = Song>) {
        self.songs.extend(songs);
        self.touch();
    }

    /// Remove the first song with `id`
    ///
    /// Returns `false` and leaves the playlist untouched when nothing matches.
    pub fn remove_song(&mut self, id: &SongId) -> bool {
        match self.songs.iter().position(|song| &song.id == id) {
            Some(index) => {
                self.songs.remove(index);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Uniformly permute the songs in place
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.songs.shuffle(rng);
        self.touch();
    }

    pub fn total_duration(&self) -> Duration {
        self.songs
            .iter()
            .fold(Duration::ZERO, |total, song| total.saturating_add(song.duration))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - {} songs ({} total)",
            self.id,
            self.name,
            self.songs.len(),
            format_duration(self.total_duration())
        )
    }
}
