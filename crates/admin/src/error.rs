//! Unified error handling for admin.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pizzeti_core::EditorError;
use pizzeti_core::menu::LineError;
use serde_json::json;
use thiserror::Error;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Draft edit or menu persistence failed.
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Remote menu endpoint did not accept or return a menu.
    #[error("Menu sync failed")]
    Sync,

    /// Editor is locked or the PIN was wrong.
    #[error("{0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<pizzeti_core::StoreError> for AppError {
    fn from(err: pizzeti_core::StoreError) -> Self {
        Self::Editor(EditorError::Store(err))
    }
}

/// Result type alias for admin handlers.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Editor(EditorError::Line(LineError::NotFound { .. })) => StatusCode::NOT_FOUND,
            Self::Editor(EditorError::Line(LineError::FieldMismatch { .. })) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Editor(EditorError::Store(_)) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Sync => StatusCode::BAD_GATEWAY,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Editor(EditorError::Store(_)) => "could not save".to_string(),
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Sync => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
