//! The in-memory playlist collection
//!
//! `PlaylistManager` owns every playlist behind one reader/writer lock.
//! Callers get owned snapshots back and mutate songs through the manager,
//! so no caller ever holds an unguarded alias into the collection.

mod error;
mod manager;
mod search;
mod statistics;

pub use error::{ManagerError, Result};
pub use manager::PlaylistManager;
pub use search::SearchResult;
pub use statistics::Statistics;

pub use playlist_primitives::{Playlist, PlaylistId, Song, SongId};
pub use playlist_storage::{PlaylistStorage, StorageError};
