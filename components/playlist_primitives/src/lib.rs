//! Song and playlist entities shared by every playlist crate
//!
//! The types here carry no locking and no persistence. Ownership of the
//! authoritative collection lives in `playlist-manager`; this crate only
//! knows how a single playlist keeps its song order and timestamps.

pub mod duration;
mod ids;
mod playlist;
mod song;

pub use duration::{checked_from_secs, format_duration, format_long_duration, MAX_DURATION};
pub use ids::{PlaylistId, SongId};
pub use playlist::Playlist;
pub use song::Song;
