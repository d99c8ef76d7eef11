//! Pizzeti Core - domain types and logic for the Pizzeti ordering service.
//!
//! This crate is shared by both binaries:
//! - `storefront` - public menu, cart, and checkout API (port 3000)
//! - `admin` - PIN-gated menu editor (port 3001)
//!
//! # Architecture
//!
//! The core crate holds pure logic plus a synchronous key-value storage
//! abstraction. It has no HTTP server or client; persisted state is always
//! handed in as a [`storage::KeyValueStore`].
//!
//! # Modules
//!
//! - [`types`] - Newtypes for prices, product ids, phones, and order type
//! - [`menu`] - Menu categories, line records, and the default catalog
//! - [`product`] - Purchasable products
//! - [`cart`] - The visitor's cart
//! - [`customer`] - Checkout form validation
//! - [`order`] - Order message composition and the WhatsApp deep link
//! - [`editor`] - Draft editing of the menu override
//! - [`storage`] - Key-value stores and typed snapshots

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod customer;
pub mod editor;
pub mod menu;
pub mod order;
pub mod product;
pub mod storage;
pub mod types;

pub use cart::{Cart, CartLine};
pub use customer::{CustomerForm, CustomerProfile, Field, ValidationErrors, Violation, ViolationCode};
pub use editor::{EditorError, MenuEditor};
pub use menu::{LineField, MenuCatalog, MenuCategory, MenuLine, MenuOffer};
pub use order::Order;
pub use product::Product;
pub use storage::{FileStore, KeyValueStore, MemoryStore, Scoped, StoreError};
pub use types::*;
