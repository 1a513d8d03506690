use crate::duration::{self, format_duration};
use crate::ids::SongId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A single track's metadata plus its identity
///
/// Every constructor call produces a fresh id, so two songs built from the
/// same tags are still distinct playlist entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,

    /// Audio file this song was read from, if any
    #[serde(rename = "filePath", default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,

    pub title: String,
    pub artist: String,
    pub album: String,

    #[serde(with = "duration::nanos")]
    pub duration: Duration,

    pub genre: String,

    /// Release year, `0` when unknown
    pub year: u32,
}

impl Song {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: SongId::generate(),
            file_path: None,
            title: title.into(),
            artist: artist.into(),
            album: String::new(),
            duration,
            genre: String::new(),
            year: 0,
        }
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_year(mut self, year: u32) -> Self {
        self.year = year;
        self
    }

    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Case-insensitive substring match on title, artist, album or genre
    ///
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.title, &self.artist, &self.album, &self.genre]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - {} ({}) [{}] - {}",
            self.id,
            self.title,
            self.artist,
            self.album,
            self.genre,
            format_duration(self.duration)
        )
    }
}
