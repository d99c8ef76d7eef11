//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Health check
//!
//! # Auth (shared PIN)
//! POST   /unlock                          - Unlock with the admin PIN
//! POST   /lock                            - Lock and drop the draft
//!
//! # Draft menu (unlocked sessions only)
//! GET    /menu                            - Current draft
//! POST   /menu/{category}/lines           - Append a placeholder line
//! PATCH  /menu/{category}/lines/{index}   - Change one field
//! DELETE /menu/{category}/lines/{index}   - Remove a line
//! POST   /menu/save                       - Persist draft as local override
//! POST   /menu/reset                      - Erase override, back to default
//! POST   /menu/publish                    - Send draft to the storefront
//! POST   /menu/pull                       - Replace draft with published menu
//! ```

pub mod auth;
pub mod menu;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the draft menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::show))
        .route("/save", post(menu::save))
        .route("/reset", post(menu::reset))
        .route("/publish", post(menu::publish))
        .route("/pull", post(menu::pull))
        .route("/{category}/lines", post(menu::add_line))
        .route(
            "/{category}/lines/{index}",
            patch(menu::update_line).delete(menu::delete_line),
        )
}

/// Create all routes for the admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/unlock", post(auth::unlock))
        .route("/lock", post(auth::lock))
        .nest("/menu", menu_routes())
}
