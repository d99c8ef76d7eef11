//! Menu sync errors.

use thiserror::Error;

/// Errors that can occur when talking to the remote menu endpoint.
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("Menu sync request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Menu sync endpoint returned {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not a menu.
    #[error("Menu sync response error: {0}")]
    Decode(#[from] serde_json::Error),
}
