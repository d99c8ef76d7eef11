//! Unlock extractor and draft storage for admin sessions.

use axum::{extract::FromRequestParts, http::request::Parts};
use pizzeti_core::{KeyValueStore, MenuEditor};
use tower_sessions::Session;

use crate::error::AppError;

/// Session keys used by the admin.
pub mod session_keys {
    /// Set to `true` once the PIN has been accepted.
    pub const UNLOCKED: &str = "unlocked";
    /// The draft menu under edit.
    pub const DRAFT: &str = "menu_draft";
}

/// Extractor that requires an unlocked session.
///
/// Rejects with `401` when the PIN has not been entered in this session.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireUnlocked(session): RequireUnlocked) -> impl IntoResponse {
///     // ...
/// }
/// ```
pub struct RequireUnlocked(pub Session);

impl<S> FromRequestParts<S> for RequireUnlocked
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let unlocked = session
            .get::<bool>(session_keys::UNLOCKED)
            .await?
            .unwrap_or(false);
        if !unlocked {
            return Err(AppError::Unauthorized("Unauthorized".to_string()));
        }

        Ok(Self(session))
    }
}

impl RequireUnlocked {
    /// The session's draft, starting from the persisted menu on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the session or the store cannot be read.
    pub async fn draft(&self, store: &impl KeyValueStore) -> Result<MenuEditor, AppError> {
        if let Some(editor) = self.0.get::<MenuEditor>(session_keys::DRAFT).await? {
            return Ok(editor);
        }
        Ok(MenuEditor::load(store)?)
    }

    /// Keep `editor` as the session's draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn keep_draft(&self, editor: &MenuEditor) -> Result<(), AppError> {
        self.0.insert(session_keys::DRAFT, editor).await?;
        Ok(())
    }
}
