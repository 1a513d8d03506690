use crate::ScanError;
use lofty::{Accessor, AudioFile, Probe, TaggedFileExt};
use playlist_primitives::Song;
use std::path::Path;
use std::time::Duration;

/// Read a single audio file into a `Song`
///
/// Missing tags fall back to the file name for the title and empty strings
/// elsewhere. `fallback_duration` is used when the probed duration is zero.
pub fn song_from_path(
    path: impl AsRef<Path>,
    fallback_duration: Duration,
) -> Result<Song, ScanError> {
    let path = path.as_ref();
    std::fs::metadata(path).map_err(|e| ScanError::io(path, e))?;

    let tagged_file = Probe::open(path)
        .and_then(|probe| probe.read())
        .map_err(|e| ScanError::metadata(path, e))?;

    let duration = match tagged_file.properties().duration() {
        d if d.is_zero() => fallback_duration,
        d => d,
    };

    let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    else {
        return Ok(song_from_file_name(path, duration));
    };

    let title = tag
        .title()
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| file_name(path));
    let artist = tag.artist().map(|s| s.to_string()).unwrap_or_default();

    Ok(Song::new(title, artist, duration)
        .with_album(tag.album().map(|s| s.to_string()).unwrap_or_default())
        .with_genre(tag.genre().map(|s| s.to_string()).unwrap_or_default())
        .with_year(tag.year().unwrap_or(0))
        .with_file_path(path))
}

pub(crate) fn song_from_file_name(path: &Path, duration: Duration) -> Song {
    Song::new(file_name(path), "", duration).with_file_path(path)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
