use crate::{PlaylistStorage, StorageError};
use parking_lot::Mutex;
use playlist_primitives::Playlist;

/// Keeps the "persisted" collection in process memory
#[derive(Default)]
pub struct MemoryStorage {
    playlists: Mutex<Vec<Playlist>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `playlists` already stored
    pub fn with_playlists(playlists: Vec<Playlist>) -> Self {
        Self {
            playlists: Mutex::new(playlists),
        }
    }

    /// Copy of what the last save stored
    pub fn stored(&self) -> Vec<Playlist> {
        self.playlists.lock().clone()
    }
}

impl PlaylistStorage for MemoryStorage {
    fn load_playlists(&self) -> Result<Vec<Playlist>, StorageError> {
        Ok(self.playlists.lock().clone())
    }

    fn save_playlists(&self, playlists: &[Playlist]) -> Result<(), StorageError> {
        *self.playlists.lock() = playlists.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_replaces_stored_collection() {
        let storage = MemoryStorage::with_playlists(vec![Playlist::new("old", "")]);

        let replacement = vec![Playlist::new("a", ""), Playlist::new("b", "")];
        storage.save_playlists(&replacement).unwrap();

        assert_eq!(storage.load_playlists().unwrap(), replacement);
        assert_eq!(storage.stored(), replacement);
    }
}
