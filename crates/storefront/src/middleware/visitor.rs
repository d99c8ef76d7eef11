//! Visitor identity extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;

/// Session key holding the visitor id.
pub const VISITOR_ID_KEY: &str = "visitor_id";

/// The visitor making the request.
///
/// A new id is minted and stored in the session on first contact, so every
/// handler that takes a `Visitor` also sets the session cookie.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(State(state): State<AppState>, Visitor(id): Visitor) -> Result<Json<Cart>> {
///     let cart = snapshots::load_cart(&state.visitor_store(id))?;
///     Ok(Json(cart))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visitor(pub Uuid);

impl<S> FromRequestParts<S> for Visitor
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

        if let Some(id) = session.get::<Uuid>(VISITOR_ID_KEY).await? {
            return Ok(Self(id));
        }

        let id = Uuid::new_v4();
        session.insert(VISITOR_ID_KEY, id).await?;
        tracing::debug!(visitor_id = %id, "New visitor");
        Ok(Self(id))
    }
}
