//! Core value types for Pizzeti.
//!
//! This module provides type-safe wrappers for prices, product ids, phone
//! numbers, and the order type.

pub mod id;
pub mod order_type;
pub mod phone;
pub mod price;

pub use id::ProductId;
pub use order_type::OrderType;
pub use phone::{Phone, PhoneError};
pub use price::Price;
