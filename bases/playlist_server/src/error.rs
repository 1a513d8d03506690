//! HTTP-facing errors
//!
//! Each variant maps to one status code; the body is `{"error": message}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use library_scanner::ScanError;
use playlist_manager::{ManagerError, SongId};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("song not found: {0}")]
    SongNotFound(SongId),

    #[error(transparent)]
    Manager(#[from] ManagerError),

    #[error("error scanning: {0}")]
    Scan(#[from] ScanError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::SongNotFound(_) | AppError::Manager(ManagerError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Manager(ManagerError::Storage(_))
            | AppError::Scan(_)
            | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
