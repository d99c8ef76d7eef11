//! Checkout route handlers.
//!
//! Submitting checkout validates the customer form, composes the order
//! message, remembers the customer details for next time, and empties the
//! cart. Opening the returned WhatsApp link is left to the client.

use axum::{Json, extract::State};
use pizzeti_core::storage::snapshots;
use pizzeti_core::{CustomerForm, Order, OrderType};
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::Visitor;
use crate::state::AppState;

/// A choice on the order type selector.
#[derive(Debug, Serialize)]
pub struct OrderTypeOption {
    pub value: OrderType,
    pub label: &'static str,
}

/// Checkout form defaults.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    /// Details from the visitor's previous order, if any.
    pub customer: Option<CustomerForm>,
    pub order_types: Vec<OrderTypeOption>,
}

impl CheckoutView {
    fn new(customer: Option<CustomerForm>) -> Self {
        let order_types = [OrderType::Delivery, OrderType::Pickup]
            .into_iter()
            .map(|value| OrderTypeOption {
                value,
                label: value.label(),
            })
            .collect();
        Self {
            customer,
            order_types,
        }
    }
}

/// Last-used customer details, to prefill the form.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
) -> Result<Json<CheckoutView>> {
    let customer = snapshots::load_customer(&state.visitor_store(visitor))?;
    Ok(Json(CheckoutView::new(customer.map(CustomerForm::from))))
}

/// Submit the order.
///
/// # Errors
///
/// - `400` if the cart is empty
/// - `422` with per-field errors if the form is invalid
/// - `500` if the customer profile or cart cannot be persisted
#[instrument(skip(state, form), fields(order_type = ?form.order_type))]
pub async fn submit(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    Json(form): Json<CustomerForm>,
) -> Result<Json<Order>> {
    let store = state.visitor_store(visitor);
    let cart = snapshots::load_cart(&store)?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let customer = form.validate()?;
    snapshots::save_customer(&store, &customer)?;

    let order = Order::compose(
        &cart,
        customer,
        &state.now(),
        &state.config().whatsapp_number,
    );

    snapshots::clear_cart(&store)?;

    add_breadcrumb("checkout", "Order submitted", None);
    info!(
        total = %order.total,
        item_count = cart.item_count(),
        "Order composed"
    );
    Ok(Json(order))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_view_lists_order_types() {
        let json = serde_json::to_value(CheckoutView::new(None)).unwrap();
        assert_eq!(json["customer"], serde_json::Value::Null);
        assert_eq!(json["order_types"][0]["value"], "delivery");
        assert_eq!(json["order_types"][0]["label"], "توصيل");
        assert_eq!(json["order_types"][1]["value"], "pickup");
        assert_eq!(json["order_types"][1]["label"], "استلام");
    }
}
