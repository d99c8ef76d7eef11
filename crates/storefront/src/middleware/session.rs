//! Session middleware configuration.
//!
//! Sessions only carry the visitor id; carts and profiles live in the
//! key-value store under that id. Sessions are kept in a SQLite file so a
//! visitor's cookie still finds their cart after a restart.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "pizzeti_session";

/// Session expiry time in seconds (30 days).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// How often expired sessions are purged.
const EXPIRED_SESSION_SWEEP: Duration = Duration::from_secs(60 * 60);

/// Open (creating if needed) the session database at `path` and run the
/// session table migration.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the database cannot
/// be opened, or the migration fails.
pub async fn create_session_store(path: &Path) -> Result<SqliteStore, sqlx::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await?;

    let store = SqliteStore::new(pool);
    store.migrate().await?;
    Ok(store)
}

/// Purge expired sessions in the background for the life of the process.
pub fn spawn_expired_session_sweep(store: SqliteStore) {
    tokio::spawn(async move {
        if let Err(e) = store
            .continuously_delete_expired(EXPIRED_SESSION_SWEEP)
            .await
        {
            tracing::error!(error = %e, "Expired session sweep stopped");
        }
    });
}

/// Create the session layer over `store`.
#[must_use]
pub fn create_session_layer(
    store: SqliteStore,
    config: &StorefrontConfig,
) -> SessionManagerLayer<SqliteStore> {
    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_sessions::session::{Id, Record};
    use tower_sessions::session_store::SessionStore;

    use super::*;

    #[tokio::test]
    async fn test_sessions_survive_reopening_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sessions.db");

        let record = Record {
            id: Id::default(),
            data: [("visitor_id".to_string(), serde_json::json!("abc"))].into(),
            expiry_date: tower_sessions::cookie::time::OffsetDateTime::now_utc()
                + tower_sessions::cookie::time::Duration::hours(1),
        };

        let first = create_session_store(&path).await.unwrap();
        first.save(&record).await.unwrap();

        let second = create_session_store(&path).await.unwrap();
        let loaded = second.load(&record.id).await.unwrap().unwrap();
        assert_eq!(loaded.data["visitor_id"], "abc");
    }
}
