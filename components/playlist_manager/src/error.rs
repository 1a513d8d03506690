use playlist_primitives::PlaylistId;
use playlist_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("playlist not found: {0}")]
    NotFound(PlaylistId),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ManagerError>;
