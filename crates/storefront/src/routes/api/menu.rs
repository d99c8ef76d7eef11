//! Remote menu endpoint.
//!
//! `GET` returns the published menu object (or `null`). `POST` replaces it
//! and requires the admin PIN in the `x-admin-pin` header or the `pin` query
//! parameter. When no PIN is configured every write is refused.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::HeaderMap,
};
use chrono::Utc;
use pizzeti_core::storage::snapshots;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Header carrying the admin PIN.
pub const ADMIN_PIN_HEADER: &str = "x-admin-pin";

const INVALID_BODY: &str = "Invalid body. Expected { menu: {...} }";

/// Optional `?pin=` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct PinQuery {
    pub pin: Option<String>,
}

/// Get the published menu.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<Value>> {
    let menu = snapshots::load_published_menu(state.store())?;
    Ok(Json(json!({ "menu": menu })))
}

/// Publish a menu.
#[instrument(skip_all)]
pub async fn publish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PinQuery>,
    body: Bytes,
) -> Result<Json<Value>> {
    let supplied = headers
        .get(ADMIN_PIN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .or(query.pin);

    if !pin_matches(state.config().admin_pin.as_ref(), supplied.as_deref()) {
        warn!("Rejected menu publish with missing or wrong PIN");
        return Err(AppError::Unauthorized);
    }

    let menu = extract_menu(&body)
        .ok_or_else(|| AppError::BadRequest(INVALID_BODY.to_string()))?;

    snapshots::publish_menu(state.store(), menu, Utc::now())?;
    state.invalidate_menu().await;

    info!("Published menu");
    Ok(Json(json!({ "ok": true })))
}

fn pin_matches(expected: Option<&secrecy::SecretString>, supplied: Option<&str>) -> bool {
    match (expected, supplied) {
        (Some(expected), Some(supplied)) => expected.expose_secret() == supplied,
        _ => false,
    }
}

/// Pull the `menu` object out of a `{ "menu": {...} }` body.
fn extract_menu(body: &[u8]) -> Option<Value> {
    let mut parsed: Value = serde_json::from_slice(body).ok()?;
    let menu = parsed.get_mut("menu")?.take();
    menu.is_object().then_some(menu)
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_pin_matches() {
        let pin = SecretString::from("2001");
        assert!(pin_matches(Some(&pin), Some("2001")));
        assert!(!pin_matches(Some(&pin), Some("2001 ")));
        assert!(!pin_matches(Some(&pin), None));
        assert!(!pin_matches(None, Some("2001")));
        assert!(!pin_matches(None, None));
    }

    #[test]
    fn test_extract_menu() {
        assert_eq!(
            extract_menu(br#"{"menu":{"juices":[]}}"#),
            Some(json!({"juices": []}))
        );
        assert_eq!(extract_menu(br#"{"menu":5}"#), None);
        assert_eq!(extract_menu(br#"{"menu":null}"#), None);
        assert_eq!(extract_menu(b"{}"), None);
        assert_eq!(extract_menu(b"not json"), None);
    }
}
