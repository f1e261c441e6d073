use std::path::PathBuf;
use std::str::FromStr;

use thesaurus_core::pagination::{PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// A configuration variable that is set but cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{var} must be a valid {expected}, got '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum size of the database pool (default: `20`).
    pub db_max_connections: u32,
    /// Page size used when a list request has no `limit` (default: `50`).
    pub default_page_size: i64,
    /// Upper bound for `limit` (default: `500`).
    pub max_page_size: i64,
    /// JSON fixture loaded into the database at startup, if set.
    pub seed_fixture_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `DEFAULT_PAGE_SIZE`    | `50`                       |
    /// | `MAX_PAGE_SIZE`        | `500`                      |
    /// | `SEED_FIXTURE_PATH`    | unset                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = env_or("PORT", "u16", 3000)?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = env_or("REQUEST_TIMEOUT_SECS", "u64", 30)?;
        let db_max_connections = env_or("DB_MAX_CONNECTIONS", "u32", 20)?;
        let max_page_size: i64 = env_or("MAX_PAGE_SIZE", "i64", MAX_PAGE_SIZE)?.max(1);
        let default_page_size: i64 =
            env_or("DEFAULT_PAGE_SIZE", "i64", DEFAULT_PAGE_SIZE)?.clamp(1, max_page_size);

        let seed_fixture_path = std::env::var("SEED_FIXTURE_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            default_page_size,
            max_page_size,
            seed_fixture_path,
        })
    }

    /// Clamp raw `limit` / `offset` query values against the configured bounds.
    pub fn page_request(&self, limit: Option<i64>, offset: Option<i64>) -> PageRequest {
        PageRequest::new(limit, offset, self.default_page_size, self.max_page_size)
    }
}

fn env_or<T: FromStr>(var: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError {
            var,
            expected,
            value,
        }),
        Err(_) => Ok(default),
    }
}
