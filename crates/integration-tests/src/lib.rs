//! Integration test harness for Pizzeti.
//!
//! Each [`TestContext`] runs a storefront and an admin on ephemeral loopback
//! ports, both backed by one temporary data directory. The admin publishes
//! to the storefront's own `/api/menu`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pizzeti-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use pizzeti_core::{FileStore, KeyValueStore};
use reqwest::Client;
use secrecy::SecretString;
use tempfile::TempDir;
use url::Url;

/// PIN configured on both servers.
pub const TEST_PIN: &str = "2001";

/// A running storefront and admin pair.
pub struct TestContext {
    pub storefront_url: String,
    pub admin_url: String,
    pub data_dir: TempDir,
}

impl TestContext {
    /// Start both servers.
    pub async fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create data dir");
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(data_dir.path()));

        let storefront_url = start_storefront(data_dir.path(), Arc::clone(&store)).await;

        let sync_url = Url::parse(&format!("{storefront_url}/api/menu"))
            .expect("Failed to build sync URL");
        let admin_config =
            pizzeti_admin::config::AdminConfig::for_tests(data_dir.path(), TEST_PIN, sync_url.clone());
        let sync = pizzeti_admin::sync::SyncClient::new(
            sync_url,
            SecretString::from(TEST_PIN),
            Duration::from_secs(5),
        )
        .expect("Failed to build sync client");
        let admin_state = pizzeti_admin::state::AppState::new(admin_config, store, sync);
        let admin_addr = spawn(pizzeti_admin::app(admin_state)).await;

        Self {
            storefront_url,
            admin_url: format!("http://{admin_addr}"),
            data_dir,
        }
    }

    /// Start a second storefront over the same data directory and point
    /// [`Self::storefront`] at it, as after a process restart.
    ///
    /// Cookies are scoped to the host, not the port, so a client keeps its
    /// session cookie across the switch.
    pub async fn restart_storefront(&mut self) {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(self.data_dir.path()));
        self.storefront_url = start_storefront(self.data_dir.path(), store).await;
    }

    /// A client that keeps cookies, so it acts as one visitor.
    pub fn client() -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }

    pub fn storefront(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url)
    }

    pub fn admin(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url)
    }

    /// First offer of the first line in a menu section: `(product_id, price)`.
    pub async fn first_offer(&self, client: &Client, section: &str) -> (String, u64) {
        let menu: serde_json::Value = client
            .get(self.storefront("/menu"))
            .send()
            .await
            .expect("Failed to fetch menu")
            .json()
            .await
            .expect("Menu is not JSON");
        let offer = menu["categories"]
            .as_array()
            .and_then(|sections| sections.iter().find(|c| c["key"] == section))
            .map(|c| c["lines"][0]["offers"][0].clone())
            .expect("Section missing from menu");
        (
            offer["product_id"].as_str().expect("product_id").to_string(),
            offer["price"].as_u64().expect("price"),
        )
    }
}

async fn start_storefront(data_dir: &Path, store: Arc<dyn KeyValueStore>) -> String {
    let config = pizzeti_storefront::config::StorefrontConfig::for_tests(data_dir, Some(TEST_PIN));
    let sessions = pizzeti_storefront::middleware::create_session_store(&config.session_db)
        .await
        .expect("Failed to open session database");
    let state = pizzeti_storefront::state::AppState::new(config, store, sessions);
    let addr = spawn(pizzeti_storefront::app(state)).await;
    format!("http://{addr}")
}

async fn spawn(app: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Test server failed");
    });
    addr
}
