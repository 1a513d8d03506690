// bases/playlist_server/src/server.rs
use crate::config::Config;
use crate::error::AppError;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use library_scanner::{scan_music_folder, song_from_path};
use playlist_manager::{
    Playlist, PlaylistId, PlaylistManager, SearchResult, Song, SongId, Statistics,
};
use playlist_primitives::checked_from_secs;
use playlist_storage::JsonStorage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

/// Manager shared across handlers
pub type AppState = Arc<PlaylistManager<JsonStorage>>;

type Payload<T> = Result<Json<T>, JsonRejection>;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    name: String,
    #[serde(default)]
    description: String,
}

/// Body for routes that address a single playlist
#[derive(Debug, Deserialize)]
pub struct PlaylistRequest {
    id: PlaylistId,
}

/// Add a song either from an audio file or from explicit fields
///
/// With `file_path`, tags are read from the file and any explicit field
/// given here overrides them; `duration` (seconds) is used when the file
/// does not report one. Without `file_path`, `title` is required.
#[derive(Debug, Deserialize)]
pub struct AddSongRequest {
    playlist_id: PlaylistId,
    file_path: Option<PathBuf>,
    duration: Option<u64>,
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    genre: Option<String>,
    year: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    playlist_id: PlaylistId,
    file_path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct RemoveSongRequest {
    playlist_id: PlaylistId,
    song_id: SongId,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct StatusResponse {
    status: &'static str,
}

impl StatusResponse {
    fn success() -> Json<Self> {
        Json(Self { status: "success" })
    }
}

/// Build the API router, optionally serving a frontend from `static_dir`
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api/playlists", get(list_playlists))
        .route("/api/playlists/create", post(create_playlist))
        .route("/api/playlists/delete", post(delete_playlist))
        .route("/api/playlists/shuffle", post(shuffle_playlist))
        .route("/api/songs/add", post(add_song))
        .route("/api/songs/scan", post(scan_songs))
        .route("/api/songs/remove", post(remove_song))
        .route("/api/songs/search", get(search_songs))
        .route("/api/statistics", get(statistics));

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Run the playlist HTTP server
pub async fn run(state: AppState, config: Config) -> color_eyre::Result<()> {
    let app = router(state, config.static_dir.as_deref());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Playlist server listening on http://localhost:{}", config.port);
    info!("   Data file: {}", config.data_file.display());
    if let Some(dir) = &config.static_dir {
        info!("   Serving frontend from {}", dir.display());
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Save on the blocking pool
async fn persist(state: &AppState) -> Result<(), AppError> {
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || state.save()).await??;
    Ok(())
}

async fn list_playlists(State(state): State<AppState>) -> Json<Vec<Playlist>> {
    Json(state.list_playlists())
}

async fn create_playlist(
    State(state): State<AppState>,
    payload: Payload<CreatePlaylistRequest>,
) -> Result<Json<Playlist>, AppError> {
    let Json(req) = payload?;
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("playlist name cannot be empty".into()));
    }

    let playlist = state.create_playlist(name, &req.description);
    persist(&state).await?;
    Ok(Json(playlist))
}

async fn delete_playlist(
    State(state): State<AppState>,
    payload: Payload<PlaylistRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let Json(req) = payload?;
    state.delete_playlist(&req.id)?;
    persist(&state).await?;
    Ok(StatusResponse::success())
}

async fn shuffle_playlist(
    State(state): State<AppState>,
    payload: Payload<PlaylistRequest>,
) -> Result<Json<Playlist>, AppError> {
    let Json(req) = payload?;
    let playlist = state.shuffle_playlist(&req.id)?;
    persist(&state).await?;
    Ok(Json(playlist))
}

async fn add_song(
    State(state): State<AppState>,
    payload: Payload<AddSongRequest>,
) -> Result<Json<Song>, AppError> {
    let Json(req) = payload?;
    let duration = requested_duration(&req)?;
    state.get_playlist(&req.playlist_id)?;

    let song = match req.file_path.clone() {
        Some(path) => {
            let song = tokio::task::spawn_blocking(move || song_from_path(path, duration)).await??;
            apply_overrides(song, &req)
        }
        None => song_from_fields(&req, duration)?,
    };

    let song = state.add_song(&req.playlist_id, song)?;
    persist(&state).await?;
    Ok(Json(song))
}

async fn scan_songs(
    State(state): State<AppState>,
    payload: Payload<ScanRequest>,
) -> Result<Json<Vec<Song>>, AppError> {
    let Json(req) = payload?;
    state.get_playlist(&req.playlist_id)?;

    let folder = req.file_path.clone();
    let songs = tokio::task::spawn_blocking(move || scan_music_folder(folder)).await??;

    state.add_songs(&req.playlist_id, songs.clone())?;
    persist(&state).await?;
    Ok(Json(songs))
}

async fn remove_song(
    State(state): State<AppState>,
    payload: Payload<RemoveSongRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let Json(req) = payload?;
    if !state.remove_song(&req.playlist_id, &req.song_id)? {
        return Err(AppError::SongNotFound(req.song_id));
    }
    persist(&state).await?;
    Ok(StatusResponse::success())
}

async fn search_songs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>, AppError> {
    let query = params.q.trim().to_string();
    if query.is_empty() {
        return Err(AppError::Validation("missing search query".into()));
    }

    // Search joins one OS thread per playlist
    let results = tokio::task::spawn_blocking(move || state.search_songs(&query)).await?;
    Ok(Json(results))
}

async fn statistics(State(state): State<AppState>) -> Json<Statistics> {
    Json(state.statistics())
}

/// Body `duration` in seconds, bounded by what storage can encode
fn requested_duration(req: &AddSongRequest) -> Result<Duration, AppError> {
    let seconds = req.duration.unwrap_or(0);
    checked_from_secs(seconds)
        .ok_or_else(|| AppError::Validation(format!("duration {} seconds is too long", seconds)))
}

fn song_from_fields(req: &AddSongRequest, duration: Duration) -> Result<Song, AppError> {
    let title = req
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| AppError::Validation("title or file_path is required".into()))?;

    let song = Song::new(title, req.artist.clone().unwrap_or_default(), duration);
    Ok(apply_overrides(song, req))
}

fn apply_overrides(mut song: Song, req: &AddSongRequest) -> Song {
    let non_empty = |field: &Option<String>| {
        field
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    if let Some(title) = non_empty(&req.title) {
        song.title = title;
    }
    if let Some(artist) = non_empty(&req.artist) {
        song.artist = artist;
    }
    if let Some(album) = non_empty(&req.album) {
        song.album = album;
    }
    if let Some(genre) = non_empty(&req.genre) {
        song.genre = genre;
    }
    if let Some(year) = req.year {
        song.year = year;
    }
    song
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use playlist_manager::ManagerError;
    use tempfile::TempDir;

    fn state_in(dir: &TempDir) -> AppState {
        Arc::new(PlaylistManager::new(JsonStorage::new(
            dir.path().join("playlists.json"),
        )))
    }

    fn reloaded(dir: &TempDir) -> Vec<Playlist> {
        let manager = PlaylistManager::new(JsonStorage::new(dir.path().join("playlists.json")));
        manager.load().unwrap();
        manager.list_playlists()
    }

    fn add_request(playlist_id: &PlaylistId) -> AddSongRequest {
        AddSongRequest {
            playlist_id: playlist_id.clone(),
            file_path: None,
            duration: None,
            title: None,
            artist: None,
            album: None,
            genre: None,
            year: None,
        }
    }

    fn status_of(result: Result<impl IntoResponse, AppError>) -> StatusCode {
        match result {
            Ok(response) => response.into_response().status(),
            Err(error) => error.into_response().status(),
        }
    }

    #[tokio::test]
    async fn create_persists_and_lists() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);

        let Json(created) = create_playlist(
            State(state.clone()),
            Ok(Json(CreatePlaylistRequest {
                name: "Road Trip".into(),
                description: "long drives".into(),
            })),
        )
        .await
        .unwrap();

        let Json(listed) = list_playlists(State(state)).await;
        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(reloaded(&dir), vec![created]);
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let dir = TempDir::new().unwrap();
        let result = create_playlist(
            State(state_in(&dir)),
            Ok(Json(CreatePlaylistRequest {
                name: "  ".into(),
                description: String::new(),
            })),
        )
        .await;

        assert_eq!(status_of(result), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_reports_success_then_not_found() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        let id = state.create_playlist("p", "").id().clone();

        let Json(response) = delete_playlist(
            State(state.clone()),
            Ok(Json(PlaylistRequest { id: id.clone() })),
        )
        .await
        .unwrap();
        assert_eq!(response, StatusResponse { status: "success" });
        assert!(reloaded(&dir).is_empty());

        let again = delete_playlist(State(state), Ok(Json(PlaylistRequest { id }))).await;
        assert_matches!(again, Err(AppError::Manager(ManagerError::NotFound(_))));
    }

    #[tokio::test]
    async fn add_song_from_fields() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        let id = state.create_playlist("p", "").id().clone();

        let req = AddSongRequest {
            title: Some(" Song A ".into()),
            artist: Some("Artist X".into()),
            genre: Some("Rock".into()),
            duration: Some(185),
            year: Some(1999),
            ..add_request(&id)
        };
        let Json(song) = add_song(State(state.clone()), Ok(Json(req))).await.unwrap();

        assert_eq!(song.title, "Song A");
        assert_eq!(song.artist, "Artist X");
        assert_eq!(song.duration, Duration::from_secs(185));
        assert_eq!(song.year, 1999);
        assert_eq!(state.get_playlist(&id).unwrap().songs(), &[song.clone()]);
        assert_eq!(reloaded(&dir)[0].songs(), &[song]);
    }

    #[tokio::test]
    async fn add_song_rejects_unencodable_duration() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        let id = state.create_playlist("p", "").id().clone();

        for duration in [u64::MAX, 18_446_744_074] {
            let req = AddSongRequest {
                title: Some("huge".into()),
                duration: Some(duration),
                ..add_request(&id)
            };
            let result = add_song(State(state.clone()), Ok(Json(req))).await;
            assert_eq!(status_of(result), StatusCode::BAD_REQUEST);
        }
        assert!(state.get_playlist(&id).unwrap().is_empty());

        let Json(stats) = statistics(State(state)).await;
        assert_eq!(stats.total_duration, Duration::ZERO);
    }

    #[tokio::test]
    async fn add_song_needs_title_or_file() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        let id = state.create_playlist("p", "").id().clone();

        let result = add_song(State(state.clone()), Ok(Json(add_request(&id)))).await;

        assert_eq!(status_of(result), StatusCode::BAD_REQUEST);
        assert!(state.get_playlist(&id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_song_to_unknown_playlist() {
        let dir = TempDir::new().unwrap();
        let req = AddSongRequest {
            title: Some("t".into()),
            ..add_request(&PlaylistId::new("missing"))
        };

        let result = add_song(State(state_in(&dir)), Ok(Json(req))).await;

        assert_eq!(status_of(result), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn add_song_from_unreadable_file_fails() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        let id = state.create_playlist("p", "").id().clone();
        let bogus = dir.path().join("bogus.wav");
        std::fs::write(&bogus, b"not a riff file").unwrap();

        let req = AddSongRequest {
            file_path: Some(bogus),
            ..add_request(&id)
        };
        let result = add_song(State(state.clone()), Ok(Json(req))).await;

        assert_eq!(status_of(result), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(state.get_playlist(&id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn scan_adds_every_audio_file() {
        let dir = TempDir::new().unwrap();
        let music = dir.path().join("music");
        std::fs::create_dir_all(music.join("nested")).unwrap();
        std::fs::write(music.join("a.mp3"), b"x").unwrap();
        std::fs::write(music.join("nested").join("b.flac"), b"x").unwrap();
        std::fs::write(music.join("cover.png"), b"x").unwrap();
        let state = state_in(&dir);
        let id = state.create_playlist("p", "").id().clone();

        let Json(songs) = scan_songs(
            State(state.clone()),
            Ok(Json(ScanRequest {
                playlist_id: id.clone(),
                file_path: music,
            })),
        )
        .await
        .unwrap();

        assert_eq!(songs.len(), 2);
        assert_eq!(state.get_playlist(&id).unwrap().songs(), songs.as_slice());
        assert_eq!(reloaded(&dir)[0].len(), 2);
    }

    #[tokio::test]
    async fn scan_errors_map_to_status() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        let id = state.create_playlist("p", "").id().clone();

        let not_a_dir = scan_songs(
            State(state.clone()),
            Ok(Json(ScanRequest {
                playlist_id: id,
                file_path: dir.path().join("nope"),
            })),
        )
        .await;
        assert_eq!(status_of(not_a_dir), StatusCode::INTERNAL_SERVER_ERROR);

        let unknown = scan_songs(
            State(state),
            Ok(Json(ScanRequest {
                playlist_id: PlaylistId::new("missing"),
                file_path: dir.path().to_path_buf(),
            })),
        )
        .await;
        assert_eq!(status_of(unknown), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn remove_song_then_missing() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        let id = state.create_playlist("p", "").id().clone();
        let song = state
            .add_song(&id, Song::new("a", "b", Duration::from_secs(1)))
            .unwrap();

        let request = || {
            Ok(Json(RemoveSongRequest {
                playlist_id: id.clone(),
                song_id: song.id.clone(),
            }))
        };

        let Json(response) = remove_song(State(state.clone()), request()).await.unwrap();
        assert_eq!(response, StatusResponse { status: "success" });

        let again = remove_song(State(state), request()).await;
        assert_matches!(again, Err(AppError::SongNotFound(_)));
    }

    #[tokio::test]
    async fn shuffle_keeps_songs() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        let id = state.create_playlist("p", "").id().clone();
        let songs: Vec<_> = (0..5)
            .map(|i| Song::new(format!("t{}", i), "a", Duration::from_secs(i)))
            .collect();
        state.add_songs(&id, songs.clone()).unwrap();

        let Json(shuffled) = shuffle_playlist(
            State(state.clone()),
            Ok(Json(PlaylistRequest { id: id.clone() })),
        )
        .await
        .unwrap();

        let mut titles: Vec<_> = shuffled.songs().iter().map(|s| s.title.clone()).collect();
        titles.sort();
        assert_eq!(titles, vec!["t0", "t1", "t2", "t3", "t4"]);

        let missing = shuffle_playlist(
            State(state),
            Ok(Json(PlaylistRequest {
                id: PlaylistId::new("missing"),
            })),
        )
        .await;
        assert_eq!(status_of(missing), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_requires_query() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        let id = state.create_playlist("Road Trip", "").id().clone();
        state
            .add_song(&id, Song::new("Song A", "Artist X", Duration::from_secs(185)))
            .unwrap();

        let empty = search_songs(State(state.clone()), Query(SearchParams { q: " ".into() })).await;
        assert_eq!(status_of(empty), StatusCode::BAD_REQUEST);

        let Json(results) = search_songs(
            State(state),
            Query(SearchParams {
                q: "artist x".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].playlist_name, "Road Trip");
    }

    #[tokio::test]
    async fn statistics_reflect_collection() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        let id = state.create_playlist("p", "").id().clone();
        state
            .add_song(&id, Song::new("a", "X", Duration::from_secs(60)).with_genre("Rock"))
            .unwrap();

        let Json(stats) = statistics(State(state)).await;

        assert_eq!(stats.total_playlists, 1);
        assert_eq!(stats.total_songs, 1);
        assert_eq!(stats.genre_counts["Rock"], 1);
    }

    #[tokio::test]
    async fn failed_save_is_server_error_but_keeps_change() {
        let dir = TempDir::new().unwrap();
        let state: AppState = Arc::new(PlaylistManager::new(JsonStorage::new(
            dir.path().join("missing").join("playlists.json"),
        )));

        let result = create_playlist(
            State(state.clone()),
            Ok(Json(CreatePlaylistRequest {
                name: "kept".into(),
                description: String::new(),
            })),
        )
        .await;

        assert_matches!(result, Err(AppError::Manager(ManagerError::Storage(_))));
        assert_eq!(state.list_playlists().len(), 1);
    }

    #[test]
    fn router_builds_with_and_without_static_dir() {
        let dir = TempDir::new().unwrap();
        let _ = router(state_in(&dir), None);
        let _ = router(state_in(&dir), Some(dir.path()));
    }
}
