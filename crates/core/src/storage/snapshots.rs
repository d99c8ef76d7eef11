//! Typed load/save of persisted state.
//!
//! Absent keys mean "no data". Values that no longer deserialize are logged
//! and treated as absent, so a corrupt snapshot never blocks a visitor.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::warn;

use super::{KeyValueStore, StoreError, keys};
use crate::cart::Cart;
use crate::customer::CustomerProfile;
use crate::menu::MenuCatalog;

/// Read and decode `key`, discarding corrupt values.
///
/// # Errors
///
/// Returns [`StoreError`] if the backend itself fails.
pub fn load<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let value = match store.get(key) {
        Ok(Some(value)) => value,
        Ok(None) => return Ok(None),
        Err(StoreError::Serialization(e)) => {
            warn!(key, error = %e, "Discarding unreadable snapshot");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    match serde_json::from_value(value) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(e) => {
            warn!(key, error = %e, "Discarding malformed snapshot");
            Ok(None)
        }
    }
}

/// Encode and write `value` under `key`.
///
/// # Errors
///
/// Returns [`StoreError`] if encoding or the backend fails.
pub fn save<T: Serialize>(
    store: &impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    store.set(key, serde_json::to_value(value)?)
}

/// Load the visitor's cart; empty if none is stored.
///
/// # Errors
///
/// Returns [`StoreError`] if the backend fails.
pub fn load_cart(store: &impl KeyValueStore) -> Result<Cart, StoreError> {
    Ok(load(store, keys::CART)?.unwrap_or_default())
}

/// # Errors
///
/// Returns [`StoreError`] if the backend fails.
pub fn save_cart(store: &impl KeyValueStore, cart: &Cart) -> Result<(), StoreError> {
    save(store, keys::CART, cart)
}

/// Erase the persisted cart.
///
/// # Errors
///
/// Returns [`StoreError`] if the backend fails.
pub fn clear_cart(store: &impl KeyValueStore) -> Result<(), StoreError> {
    store.delete(keys::CART)
}

/// Last-used checkout details, if any.
///
/// # Errors
///
/// Returns [`StoreError`] if the backend fails.
pub fn load_customer(store: &impl KeyValueStore) -> Result<Option<CustomerProfile>, StoreError> {
    load(store, keys::CUSTOMER)
}

/// # Errors
///
/// Returns [`StoreError`] if the backend fails.
pub fn save_customer(
    store: &impl KeyValueStore,
    customer: &CustomerProfile,
) -> Result<(), StoreError> {
    save(store, keys::CUSTOMER, customer)
}

/// The admin's local menu override, with absent categories filled from the
/// default catalog.
///
/// # Errors
///
/// Returns [`StoreError`] if the backend fails.
pub fn load_menu_override(store: &impl KeyValueStore) -> Result<Option<MenuCatalog>, StoreError> {
    let Some(value) = load::<JsonValue>(store, keys::MENU_OVERRIDE)? else {
        return Ok(None);
    };
    match MenuCatalog::from_override(value) {
        Ok(catalog) => Ok(Some(catalog)),
        Err(e) => {
            warn!(error = %e, "Discarding malformed menu override");
            Ok(None)
        }
    }
}

/// Replace the menu override with `catalog`.
///
/// # Errors
///
/// Returns [`StoreError`] if the backend fails.
pub fn save_menu(store: &impl KeyValueStore, catalog: &MenuCatalog) -> Result<(), StoreError> {
    save(store, keys::MENU_OVERRIDE, catalog)
}

/// Erase the menu override so the default catalog applies again.
///
/// # Errors
///
/// Returns [`StoreError`] if the backend fails.
pub fn reset_menu(store: &impl KeyValueStore) -> Result<(), StoreError> {
    store.delete(keys::MENU_OVERRIDE)
}

/// Record stored by the remote menu endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedMenu {
    pub value: JsonValue,
    pub updated_at: DateTime<Utc>,
}

/// The raw menu object last published through the remote endpoint.
///
/// # Errors
///
/// Returns [`StoreError`] if the backend fails.
pub fn load_published_menu(store: &impl KeyValueStore) -> Result<Option<JsonValue>, StoreError> {
    Ok(load::<PublishedMenu>(store, keys::PUBLISHED_MENU)?.map(|record| record.value))
}

/// Upsert the published menu.
///
/// # Errors
///
/// Returns [`StoreError`] if the backend fails.
pub fn publish_menu(
    store: &impl KeyValueStore,
    value: JsonValue,
    updated_at: DateTime<Utc>,
) -> Result<(), StoreError> {
    save(store, keys::PUBLISHED_MENU, &PublishedMenu { value, updated_at })
}

/// The menu the storefront serves.
///
/// Resolution order: local override, then the published menu, then the
/// compiled-in default.
///
/// # Errors
///
/// Returns [`StoreError`] if the backend fails.
pub fn load_menu(store: &impl KeyValueStore) -> Result<MenuCatalog, StoreError> {
    if let Some(catalog) = load_menu_override(store)? {
        return Ok(catalog);
    }
    if let Some(value) = load_published_menu(store)? {
        match MenuCatalog::from_override(value) {
            Ok(catalog) => return Ok(catalog),
            Err(e) => warn!(error = %e, "Ignoring malformed published menu"),
        }
    }
    Ok(MenuCatalog::default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use serde_json::json;

    use super::*;
    use crate::menu::{MenuCategory, MenuLine, SingleLine};
    use crate::product::Product;
    use crate::storage::MemoryStore;
    use crate::types::Price;

    #[test]
    fn test_corrupt_cart_loads_empty() {
        let store = MemoryStore::new();
        store.set(keys::CART, json!({"not": "a cart"})).unwrap();
        assert!(load_cart(&store).unwrap().is_empty());
    }

    #[test]
    fn test_cart_round_trip_and_clear() {
        let store = MemoryStore::new();
        let mut cart = Cart::new();
        cart.add(
            Product::new("عصائر", "عصير منقة", Price::new(3000)),
            NonZeroU32::MIN,
            "",
        );
        save_cart(&store, &cart).unwrap();
        assert_eq!(load_cart(&store).unwrap(), cart);

        clear_cart(&store).unwrap();
        assert!(load_cart(&store).unwrap().is_empty());
    }

    #[test]
    fn test_menu_override_fills_missing_categories() {
        let store = MemoryStore::new();
        store
            .set(
                keys::MENU_OVERRIDE,
                json!({"juices": [{"name": "ليمون", "price": 500}]}),
            )
            .unwrap();

        let catalog = load_menu(&store).unwrap();
        assert_eq!(
            catalog.lines(MenuCategory::Juices),
            vec![MenuLine::Single(SingleLine::new("ليمون", 500))]
        );
        assert_eq!(
            catalog.lines(MenuCategory::Pizzas),
            MenuCatalog::default().lines(MenuCategory::Pizzas)
        );
    }

    #[test]
    fn test_reset_menu_restores_default() {
        let store = MemoryStore::new();
        let mut catalog = MenuCatalog::default();
        catalog.remove_line(MenuCategory::Broast, 0).unwrap();
        save_menu(&store, &catalog).unwrap();
        assert_eq!(load_menu(&store).unwrap(), catalog);

        reset_menu(&store).unwrap();
        assert_eq!(load_menu(&store).unwrap(), MenuCatalog::default());
    }

    #[test]
    fn test_published_menu_used_without_override() {
        let store = MemoryStore::new();
        publish_menu(
            &store,
            json!({"broast": [{"name": "ربع", "price": 9000}]}),
            Utc::now(),
        )
        .unwrap();

        let catalog = load_menu(&store).unwrap();
        assert_eq!(catalog.len(MenuCategory::Broast), 1);

        save_menu(&store, &MenuCatalog::default()).unwrap();
        assert_eq!(load_menu(&store).unwrap(), MenuCatalog::default());
    }

    #[test]
    fn test_malformed_published_menu_falls_back() {
        let store = MemoryStore::new();
        publish_menu(&store, json!({"pizzas": "nope"}), Utc::now()).unwrap();
        assert_eq!(load_menu(&store).unwrap(), MenuCatalog::default());
    }
}
