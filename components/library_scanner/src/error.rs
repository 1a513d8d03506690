use lofty::LoftyError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("no songs found in {}", .0.display())]
    NoSongsFound(PathBuf),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read tags from {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: LoftyError,
    },
}

impl ScanError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn metadata(path: impl Into<PathBuf>, source: LoftyError) -> Self {
        Self::Metadata {
            path: path.into(),
            source,
        }
    }
}
