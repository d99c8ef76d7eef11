//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `PIZZETI_DATA_DIR` - Directory for persisted carts, profiles, and menus (default: data)
//! - `STOREFRONT_SESSION_DB` - SQLite file holding visitor sessions (default: `<data dir>/sessions.db`)
//! - `WHATSAPP_NUMBER` - Number that receives orders (default: +249900318100)
//! - `STORE_UTC_OFFSET_MINUTES` - Shop timezone for order stamps (default: 120)
//! - `ADMIN_PIN` - Secret accepted by `POST /api/menu`; when unset, writes are refused
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Session database file name inside the data directory.
const SESSION_DB_FILE: &str = "sessions.db";

/// Default recipient of order messages.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "+249900318100";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Root of the file-backed key-value store
    pub data_dir: PathBuf,
    /// SQLite database holding sessions, so visitors keep their id across
    /// restarts
    pub session_db: PathBuf,
    /// Order recipient, as configured (normalized when the link is built)
    pub whatsapp_number: String,
    /// Timezone used to stamp orders
    pub store_offset: FixedOffset,
    /// Secret required to write the remote menu
    pub admin_pin: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        let data_dir = PathBuf::from(get_env_or_default("PIZZETI_DATA_DIR", "data"));
        let session_db = get_optional_env("STOREFRONT_SESSION_DB")
            .map_or_else(|| data_dir.join(SESSION_DB_FILE), PathBuf::from);
        let whatsapp_number = get_env_or_default("WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER);
        if !whatsapp_number.chars().any(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidEnvVar(
                "WHATSAPP_NUMBER".to_string(),
                "must contain digits".to_string(),
            ));
        }

        let offset_minutes: i32 = parse_env("STORE_UTC_OFFSET_MINUTES", "120")?;
        let store_offset = offset_from_minutes(offset_minutes).ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "STORE_UTC_OFFSET_MINUTES".to_string(),
                format!("{offset_minutes} is out of range"),
            )
        })?;

        let admin_pin = get_optional_env("ADMIN_PIN")
            .filter(|pin| !pin.is_empty())
            .map(SecretString::from);

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            session_db,
            whatsapp_number,
            store_offset,
            admin_pin,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Configuration for tests: loopback host, ephemeral port, and the
    /// given data directory.
    #[must_use]
    pub fn for_tests(data_dir: impl Into<PathBuf>, admin_pin: Option<&str>) -> Self {
        let data_dir = data_dir.into();
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            session_db: data_dir.join(SESSION_DB_FILE),
            data_dir,
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            store_offset: offset_from_minutes(120).unwrap_or_else(|| Utc.fix()),
            admin_pin: admin_pin.map(|pin| SecretString::from(pin.to_owned())),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_socket_addr() {
        let mut config = StorefrontConfig::for_tests("data", None);
        config.port = 3000;

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_offset_from_minutes() {
        assert_eq!(offset_from_minutes(120).unwrap().local_minus_utc(), 7200);
        assert_eq!(offset_from_minutes(-330).unwrap().local_minus_utc(), -19800);
        assert!(offset_from_minutes(24 * 60).is_none());
    }

    #[test]
    fn test_for_tests_defaults() {
        let config = StorefrontConfig::for_tests("/tmp/x", Some("2001"));
        assert_eq!(config.whatsapp_number, DEFAULT_WHATSAPP_NUMBER);
        assert_eq!(config.admin_pin.unwrap().expose_secret(), "2001");
        assert_eq!(config.session_db, PathBuf::from("/tmp/x/sessions.db"));
    }

    #[test]
    fn test_debug_redacts_pin() {
        let config = StorefrontConfig::for_tests("data", Some("pin-value-1234"));
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("pin-value-1234"));
    }
}
