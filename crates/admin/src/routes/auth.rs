//! Unlock and lock route handlers.

use axum::{Json, extract::State};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::error::{AppError, Result};
use crate::middleware::session_keys;
use crate::state::AppState;

/// Message shown for a wrong PIN.
pub const WRONG_PIN: &str = "رمز الحماية غير صحيح";

/// Unlock form data.
#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    #[serde(default)]
    pub pin: String,
}

/// Accept the PIN and unlock the editor for this session.
#[instrument(skip_all)]
pub async fn unlock(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<UnlockRequest>,
) -> Result<Json<Value>> {
    if !pin_matches(&state.config().admin_pin, &request.pin) {
        warn!("Rejected admin unlock");
        return Err(AppError::Unauthorized(WRONG_PIN.to_string()));
    }

    // Rotate the session id on privilege change
    session.cycle_id().await?;
    session.insert(session_keys::UNLOCKED, true).await?;

    info!("Admin editor unlocked");
    Ok(Json(json!({ "unlocked": true })))
}

/// Lock the editor and drop any unsaved draft.
#[instrument(skip_all)]
pub async fn lock(session: Session) -> Result<Json<Value>> {
    session.flush().await?;
    info!("Admin editor locked");
    Ok(Json(json!({ "unlocked": false })))
}

fn pin_matches(expected: &SecretString, supplied: &str) -> bool {
    expected.expose_secret() == supplied.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_is_trimmed_and_case_sensitive() {
        let pin = SecretString::from("Pz2001");
        assert!(pin_matches(&pin, "Pz2001"));
        assert!(pin_matches(&pin, "  Pz2001\n"));
        assert!(!pin_matches(&pin, "pz2001"));
        assert!(!pin_matches(&pin, ""));
    }
}
