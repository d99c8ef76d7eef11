//! Application state shared across handlers.

use std::sync::Arc;

use pizzeti_core::KeyValueStore;

use crate::config::AdminConfig;
use crate::sync::SyncClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: Arc<dyn KeyValueStore>,
    sync: SyncClient,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, store: Arc<dyn KeyValueStore>, sync: SyncClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                sync,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Store holding the persisted menu override.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.store
    }

    /// Client for the remote menu endpoint.
    #[must_use]
    pub fn sync(&self) -> &SyncClient {
        &self.inner.sync
    }
}
