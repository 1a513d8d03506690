//! Turns audio files on disk into `Song` records
//!
//! `scan_music_folder` walks a directory tree and reads tags from every
//! recognised audio file. `song_from_path` reads a single file.

mod error;
mod metadata;
mod scan;

pub use error::ScanError;
pub use metadata::song_from_path;
pub use scan::{is_audio_file, scan_music_folder, DEFAULT_DURATION, SUPPORTED_EXTENSIONS};
