//! Key-value persistence.
//!
//! Visitor state and the menu override live behind [`KeyValueStore`], a
//! synchronous `get`/`set`/`delete` interface over JSON values. Handlers
//! receive a store explicitly; nothing reaches for global storage.
//!
//! # Implementations
//!
//! - [`MemoryStore`] - process-local map, used by tests
//! - [`FileStore`] - one JSON file per key under a data directory
//! - [`Scoped`] - prefixes every key, used to isolate visitors
//!
//! # Keys
//!
//! Keys are `/`-separated segments of ASCII letters, digits, `_` and `-`.
//! The well-known keys are in [`keys`].

mod file;
mod memory;
pub mod snapshots;

use std::sync::Arc;

use serde_json::Value as JsonValue;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Well-known storage keys.
pub mod keys {
    /// Visitor cart.
    pub const CART: &str = "pizzeti_cart";
    /// Visitor's last-used checkout details.
    pub const CUSTOMER: &str = "pizzeti_customer";
    /// Menu override written by the admin editor.
    pub const MENU_OVERRIDE: &str = "pizzeti_menu_v1";
    /// Menu published through the remote menu endpoint.
    pub const PUBLISHED_MENU: &str = "site_config/menu";
}

/// Errors from a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous JSON key-value store.
///
/// Writes overwrite unconditionally. Deleting an absent key is not an error.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the key is invalid.
    fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the key is invalid.
    fn set(&self, key: &str, value: JsonValue) -> Result<(), StoreError>;

    /// Remove `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the key is invalid.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: JsonValue) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: JsonValue) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

/// Check that `key` is one or more non-empty segments of `[A-Za-z0-9_-]`
/// separated by `/`.
///
/// # Errors
///
/// Returns [`StoreError::InvalidKey`] otherwise.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        });
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_owned()))
    }
}

/// A view of a store with every key prefixed.
///
/// ```
/// use pizzeti_core::storage::{KeyValueStore, MemoryStore, Scoped};
///
/// let store = MemoryStore::new();
/// let visitor = Scoped::new(&store, "visitor/abc");
/// visitor.set("pizzeti_cart", serde_json::json!([])).unwrap();
/// assert!(store.get("visitor/abc/pizzeti_cart").unwrap().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Scoped<S> {
    inner: S,
    prefix: String,
}

impl<S: KeyValueStore> Scoped<S> {
    pub fn new(inner: S, prefix: impl Into<String>) -> Self {
        Self {
            inner,
            prefix: prefix.into(),
        }
    }

    /// Scope for one visitor: `visitor/<id>/`.
    pub fn visitor(inner: S, visitor_id: impl std::fmt::Display) -> Self {
        Self::new(inner, format!("visitor/{visitor_id}"))
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}/{key}", self.prefix)
    }
}

impl<S: KeyValueStore> KeyValueStore for Scoped<S> {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        self.inner.get(&self.full_key(key))
    }

    fn set(&self, key: &str, value: JsonValue) -> Result<(), StoreError> {
        self.inner.set(&self.full_key(key), value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.inner.delete(&self.full_key(key))
    }
}
