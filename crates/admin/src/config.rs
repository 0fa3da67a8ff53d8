//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GUAVA_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   the generic `DATABASE_URL`)
//!
//! ## Optional
//! - `GUAVA_HOST` - Bind address (default: 0.0.0.0)
//! - `GUAVA_PORT` - Listen port (default: 8080)
//! - `GUAVA_UPLOAD_DIR` - Directory for uploaded images (default: uploads)
//! - `GUAVA_CORS_ORIGINS` - Comma-separated allowed origins, or `*` for any
//!   (default: *)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory where uploaded image blobs are stored
    pub upload_dir: PathBuf,
    /// Allowed CORS origins; a single `*` entry allows any origin
    pub cors_origins: Vec<String>,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("GUAVA_DATABASE_URL")?;
        let host = get_env_or_default("GUAVA_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("GUAVA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("GUAVA_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("GUAVA_PORT".to_string(), e.to_string()))?;
        let upload_dir = PathBuf::from(get_env_or_default("GUAVA_UPLOAD_DIR", "uploads"));
        let cors_origins = get_env_or_default("GUAVA_CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            database_url,
            host,
            port,
            upload_dir,
            cors_origins,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns true when any origin is allowed.
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

impl Default for AdminConfig {
    /// Defaults suitable for tests and local development; the database URL
    /// is a placeholder because the in-memory store needs none.
    fn default() -> Self {
        Self {
            database_url: SecretString::from("postgres://localhost/guava"),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            upload_dir: PathBuf::from("uploads"),
            cors_origins: vec!["*".to_string()],
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
