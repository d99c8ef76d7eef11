//! HTTP client for the remote menu endpoint.

use std::time::Duration;

use pizzeti_core::MenuCatalog;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};
use url::Url;

use super::error::SyncError;

/// Header carrying the admin PIN.
const ADMIN_PIN_HEADER: &str = "x-admin-pin";

#[derive(Debug, Deserialize)]
struct MenuEnvelope {
    #[serde(default)]
    menu: Value,
}

/// Client for publishing and pulling the shared menu.
#[derive(Clone)]
pub struct SyncClient {
    client: Client,
    endpoint: Url,
    pin: SecretString,
}

impl std::fmt::Debug for SyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("pin", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl SyncClient {
    /// Create a client for `endpoint` that gives up on any call after
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Request`] if the HTTP client cannot be built.
    pub fn new(endpoint: Url, pin: SecretString, timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            pin,
        })
    }

    /// The remote endpoint this client talks to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `menu` to the remote endpoint. Returns whether it was accepted.
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    pub async fn publish(&self, menu: &MenuCatalog) -> bool {
        match self.try_publish(menu).await {
            Ok(()) => {
                debug!("Menu published");
                true
            }
            Err(e) => {
                warn!(error = %e, "Menu publish failed");
                false
            }
        }
    }

    /// Fetch the published menu.
    ///
    /// Categories the remote menu lacks are filled from the default
    /// catalog. Returns `None` when nothing is published or the call fails.
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    pub async fn pull(&self) -> Option<MenuCatalog> {
        match self.try_pull().await {
            Ok(menu) => menu,
            Err(e) => {
                warn!(error = %e, "Menu pull failed");
                None
            }
        }
    }

    async fn try_publish(&self, menu: &MenuCatalog) -> Result<(), SyncError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ADMIN_PIN_HEADER, self.pin.expose_secret())
            .json(&json!({ "menu": menu }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status));
        }
        Ok(())
    }

    async fn try_pull(&self) -> Result<Option<MenuCatalog>, SyncError> {
        let response = self.client.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status));
        }

        let body = response.bytes().await?;
        let envelope: MenuEnvelope = serde_json::from_slice(&body)?;
        if !envelope.menu.is_object() {
            return Ok(None);
        }
        Ok(Some(MenuCatalog::from_override(envelope.menu)?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> SyncClient {
        SyncClient::new(
            Url::parse(endpoint).unwrap(),
            SecretString::from("2001"),
            Duration::from_millis(500),
        )
        .unwrap()
    }

    #[test]
    fn test_debug_redacts_pin() {
        let debug_output = format!("{:?}", client("http://127.0.0.1:9/api/menu"));
        assert!(!debug_output.contains("2001"));
        assert!(debug_output.contains("127.0.0.1:9"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_collapses() {
        // Port 9 (discard) is not listening on loopback in test environments.
        let client = client("http://127.0.0.1:9/api/menu");
        assert!(!client.publish(&MenuCatalog::default()).await);
        assert!(client.pull().await.is_none());
    }
}
