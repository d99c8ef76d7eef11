//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use moka::future::Cache;
use pizzeti_core::storage::{KeyValueStore, Scoped, snapshots};
use pizzeti_core::{MenuCatalog, StoreError};
use tower_sessions_sqlx_store::SqliteStore;
use tracing::debug;
use uuid::Uuid;

use crate::config::StorefrontConfig;

/// How long a resolved menu is served before the store is read again.
const MENU_CACHE_TTL: Duration = Duration::from_secs(30);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the key-value store, the session store, the menu cache, and
/// configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Arc<dyn KeyValueStore>,
    sessions: SqliteStore,
    menu_cache: Cache<(), Arc<MenuCatalog>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `store` - Backing store for carts, profiles, and menus
    /// * `sessions` - Session store mapping cookies to visitor ids
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        store: Arc<dyn KeyValueStore>,
        sessions: SqliteStore,
    ) -> Self {
        let menu_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(MENU_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                sessions,
                menu_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The global store (menus).
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.store
    }

    /// The session store.
    #[must_use]
    pub fn sessions(&self) -> &SqliteStore {
        &self.inner.sessions
    }

    /// The store as seen by one visitor.
    #[must_use]
    pub fn visitor_store(&self, visitor_id: Uuid) -> Scoped<Arc<dyn KeyValueStore>> {
        Scoped::visitor(Arc::clone(&self.inner.store), visitor_id)
    }

    /// The menu currently on offer.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the menu cannot be read.
    pub async fn menu(&self) -> Result<Arc<MenuCatalog>, StoreError> {
        if let Some(menu) = self.inner.menu_cache.get(&()).await {
            debug!("Cache hit for menu");
            return Ok(menu);
        }

        let menu = Arc::new(snapshots::load_menu(&self.inner.store)?);
        self.inner.menu_cache.insert((), Arc::clone(&menu)).await;
        Ok(menu)
    }

    /// Drop the cached menu so the next read goes to the store.
    pub async fn invalidate_menu(&self) {
        self.inner.menu_cache.invalidate(&()).await;
    }

    /// Current time in the shop's timezone.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.inner.config.store_offset)
    }
}
