//! Persistence backends for the playlist collection
//!
//! A backend loads and saves the whole collection at once. There is no
//! incremental write path: every save replaces what was stored before.

mod error;
mod json;
mod memory;

pub use error::StorageError;
pub use json::JsonStorage;
pub use memory::MemoryStorage;

use playlist_primitives::Playlist;

/// Whole-collection persistence
pub trait PlaylistStorage: Send + Sync {
    /// Load every stored playlist, or an empty list if nothing was saved yet
    fn load_playlists(&self) -> Result<Vec<Playlist>, StorageError>;

    /// Replace the stored collection with `playlists`
    fn save_playlists(&self, playlists: &[Playlist]) -> Result<(), StorageError>;
}
