use crate::{PlaylistStorage, StorageError};
use playlist_primitives::Playlist;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Stores the collection as one pretty-printed JSON array
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl PlaylistStorage for JsonStorage {
    fn load_playlists(&self) -> Result<Vec<Playlist>, StorageError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No playlist file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::read(&self.path, e)),
        };

        let playlists: Vec<Playlist> = serde_json::from_slice(&data)?;
        debug!(
            "Read {} playlists from {}",
            playlists.len(),
            self.path.display()
        );
        Ok(playlists)
    }

    fn save_playlists(&self, playlists: &[Playlist]) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(playlists)?;

        // One temp file per save; the previous file stays intact until persist.
        let dir = self.parent_dir();
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| StorageError::write(dir, e))?;
        temp.write_all(&data)
            .and_then(|()| temp.flush())
            .map_err(|e| StorageError::write(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| StorageError::write(&self.path, e.error))?;

        debug!(
            "Wrote {} playlists to {}",
            playlists.len(),
            self.path.display()
        );
        Ok(())
    }
}
