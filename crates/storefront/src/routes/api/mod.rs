//! Machine-facing API routes.

pub mod menu;

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::ALLOW},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Methods served under `/api`.
pub const ALLOWED_METHODS: &str = "GET, POST";

/// Fallback for methods an API route does not serve.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(ALLOW, HeaderValue::from_static(ALLOWED_METHODS))],
        Json(json!({ "error": "Method Not Allowed" })),
    )
        .into_response()
}
