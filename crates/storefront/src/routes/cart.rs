//! Cart route handlers.
//!
//! The cart is loaded from the visitor's scoped store on every request and
//! written back after every mutation. Clients add products by id; the
//! product (and its price) always comes from the current menu.

use std::num::NonZeroU32;

use axum::{Json, extract::State};
use pizzeti_core::storage::snapshots;
use pizzeti_core::{Cart, CartLine, Price, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::Visitor;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub index: usize,
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub quantity: u32,
    pub notes: String,
    pub subtotal: Price,
}

/// Cart display data.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Price,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(index, line)| CartLineView::new(index, line))
                .collect(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

impl CartLineView {
    fn new(index: usize, line: &CartLine) -> Self {
        Self {
            index,
            product_id: line.product.id().clone(),
            name: line.product.name().to_string(),
            category: line.product.category().to_string(),
            price: line.product.price(),
            quantity: line.quantity.get(),
            notes: line.notes.clone(),
            subtotal: line.subtotal(),
        }
    }
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
    #[serde(default)]
    pub notes: String,
}

/// Update quantity request. Quantities below 1 are raised to 1.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub index: usize,
    pub quantity: i64,
}

/// Remove line request.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub index: usize,
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Visitor(visitor): Visitor) -> Result<Json<CartView>> {
    let cart = snapshots::load_cart(&state.visitor_store(visitor))?;
    Ok(Json(CartView::from(&cart)))
}

/// Cart badge count.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>, Visitor(visitor): Visitor) -> Result<Json<Value>> {
    let cart = snapshots::load_cart(&state.visitor_store(visitor))?;
    Ok(Json(json!({ "count": cart.item_count() })))
}

/// Add a menu product to the cart.
///
/// Adding a product already in the cart raises its quantity.
#[instrument(skip(state, request), fields(product_id = %request.product_id))]
pub async fn add(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let quantity = NonZeroU32::new(request.quantity.unwrap_or(1))
        .ok_or_else(|| AppError::BadRequest("quantity must be at least 1".to_string()))?;

    let menu = state.menu().await?;
    let product = menu
        .find_product(&request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let store = state.visitor_store(visitor);
    let mut cart = snapshots::load_cart(&store)?;
    cart.add(product, quantity, request.notes);
    snapshots::save_cart(&store, &cart)?;

    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", request.product_id.as_str())]));
    info!(item_count = cart.item_count(), "Cart updated");
    Ok(Json(CartView::from(&cart)))
}

/// Set the quantity of a cart line. Unknown indices leave the cart as is.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let store = state.visitor_store(visitor);
    let mut cart = snapshots::load_cart(&store)?;
    if cart.set_quantity(request.index, request.quantity) {
        snapshots::save_cart(&store, &cart)?;
    }
    Ok(Json(CartView::from(&cart)))
}

/// Remove a cart line. Unknown indices leave the cart as is.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let store = state.visitor_store(visitor);
    let mut cart = snapshots::load_cart(&store)?;
    if cart.remove(request.index).is_some() {
        snapshots::save_cart(&store, &cart)?;
    }
    Ok(Json(CartView::from(&cart)))
}

/// Empty the cart and erase its snapshot.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>, Visitor(visitor): Visitor) -> Result<Json<CartView>> {
    snapshots::clear_cart(&state.visitor_store(visitor))?;
    Ok(Json(CartView::from(&Cart::new())))
}
