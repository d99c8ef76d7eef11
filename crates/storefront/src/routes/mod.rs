//! HTTP route handlers for storefront.
//!
//! All routes speak JSON.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Menu
//! GET  /menu?q=                - Menu categories with purchasable offers
//!
//! # Cart
//! GET  /cart                   - Cart contents and total
//! GET  /cart/count             - Cart badge count
//! POST /cart/add               - Add a menu product
//! POST /cart/update            - Set a line's quantity
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//!
//! # Checkout
//! GET  /checkout               - Last-used customer details
//! POST /checkout               - Validate, compose the order, hand off
//!
//! # Remote menu
//! GET  /api/menu               - Published menu
//! POST /api/menu               - Publish a menu (admin PIN)
//! ```

pub mod api;
pub mod cart;
pub mod checkout;
pub mod menu;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the remote API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/menu",
        get(api::menu::show)
            .post(api::menu::publish)
            .fallback(api::method_not_allowed),
    )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Menu
        .route("/menu", get(menu::index))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::submit))
        // Remote menu endpoint
        .nest("/api", api_routes())
}
