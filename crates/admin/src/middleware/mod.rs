//! HTTP middleware for admin.
//!
//! - Session layer (tower-sessions, in-memory store)
//! - Unlock extractor guarding every editor route

pub mod session;
pub mod unlock;

pub use session::create_session_layer;
pub use unlock::{RequireUnlocked, session_keys};
