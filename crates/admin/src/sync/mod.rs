//! Remote menu sync.
//!
//! Publishes the draft menu to the storefront's `/api/menu` endpoint and
//! pulls the published menu back. Each call is a single attempt; failures
//! are logged and reported as `false` or `None`.

mod client;
mod error;

pub use client::SyncClient;
pub use error::SyncError;
