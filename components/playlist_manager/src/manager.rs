use crate::error::{ManagerError, Result};
use crate::search::{self, SearchResult};
use crate::statistics::Statistics;
use parking_lot::RwLock;
use playlist_primitives::{Playlist, PlaylistId, Song, SongId};
use playlist_storage::PlaylistStorage;
use rand::Rng;
use tracing::{debug, info};

/// Owns the authoritative playlist collection
///
/// Structural changes and song mutations take the write lock; reads and
/// `save` take the read lock. Persistence is explicit: callers decide when
/// to `save` after a mutation.
pub struct PlaylistManager<S: PlaylistStorage> {
    playlists: RwLock<Vec<Playlist>>,
    storage: S,
}

impl<S: PlaylistStorage> PlaylistManager<S> {
    /// Create an empty manager; call `load` to pull in stored playlists
    pub fn new(storage: S) -> Self {
        Self {
            playlists: RwLock::new(Vec::new()),
            storage,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace the in-memory collection with whatever storage holds
    pub fn load(&self) -> Result<()> {
        let mut playlists = self.playlists.write();
        *playlists = self.storage.load_playlists()?;
        info!("Loaded {} playlists", playlists.len());
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let playlists = self.playlists.read();
        self.storage.save_playlists(&playlists)?;
        info!("Saved {} playlists", playlists.len());
        Ok(())
    }

    pub fn create_playlist(&self, name: &str, description: &str) -> Playlist {
        let playlist = Playlist::new(name, description);
        info!("Creating playlist {} ({})", playlist.name(), playlist.id());
        self.playlists.write().push(playlist.clone());
        playlist
    }

    pub fn get_playlist(&self, id: &PlaylistId) -> Result<Playlist> {
        self.playlists
            .read()
            .iter()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or_else(|| ManagerError::NotFound(id.clone()))
    }

    pub fn delete_playlist(&self, id: &PlaylistId) -> Result<()> {
        let mut playlists = self.playlists.write();
        let index = playlists
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| ManagerError::NotFound(id.clone()))?;

        let removed = playlists.remove(index);
        info!("Deleted playlist {} ({})", removed.name(), removed.id());
        Ok(())
    }

    /// Snapshot of every playlist in creation order
    pub fn list_playlists(&self) -> Vec<Playlist> {
        self.playlists.read().clone()
    }

    /// Append `song` to a playlist, returning the stored copy
    pub fn add_song(&self, playlist_id: &PlaylistId, song: Song) -> Result<Song> {
        self.with_playlist_mut(playlist_id, |playlist| {
            debug!("Adding song {} to {}", song.id, playlist.id());
            playlist.add_song(song.clone());
            song
        })
    }

    /// Append several songs at once, returning how many were added
    pub fn add_songs(&self, playlist_id: &PlaylistId, songs: Vec<Song>) -> Result<usize> {
        self.with_playlist_mut(playlist_id, |playlist| {
            let count = songs.len();
            playlist.add_songs(songs);
            info!("Added {} songs to {}", count, playlist.id());
            count
        })
    }

    /// Remove a song from a playlist
    ///
    /// Fails only when the playlist is missing; a missing song yields `false`.
    pub fn remove_song(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<bool> {
        self.with_playlist_mut(playlist_id, |playlist| {
            let removed = playlist.remove_song(song_id);
            debug!("Remove song {} from {}: {}", song_id, playlist.id(), removed);
            removed
        })
    }

    /// Shuffle a playlist with thread-local OS-seeded randomness
    pub fn shuffle_playlist(&self, playlist_id: &PlaylistId) -> Result<Playlist> {
        self.shuffle_playlist_with(playlist_id, &mut rand::thread_rng())
    }

    pub fn shuffle_playlist_with<R: Rng + ?Sized>(
        &self,
        playlist_id: &PlaylistId,
        rng: &mut R,
    ) -> Result<Playlist> {
        self.with_playlist_mut(playlist_id, |playlist| {
            playlist.shuffle(rng);
            debug!("Shuffled {}", playlist.id());
            playlist.clone()
        })
    }

    /// Case-insensitive search over title, artist, album and genre
    ///
    /// The read lock is held until every per-playlist worker has finished.
    /// Result order is unspecified.
    pub fn search_songs(&self, query: &str) -> Vec<SearchResult> {
        let playlists = self.playlists.read();
        let results = search::fan_out(&playlists, query);
        debug!(
            "Search {:?} over {} playlists: {} results",
            query,
            playlists.len(),
            results.len()
        );
        results
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::collect(&self.playlists.read())
    }

    fn with_playlist_mut<T>(
        &self,
        id: &PlaylistId,
        f: impl FnOnce(&mut Playlist) -> T,
    ) -> Result<T> {
        let mut playlists = self.playlists.write();
        let playlist = playlists
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| ManagerError::NotFound(id.clone()))?;
        Ok(f(playlist))
    }
}
