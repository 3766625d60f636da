//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL for the user store
    pub database_url: String,
    /// Maximum number of pooled database connections
    pub max_connections: u32,
    /// HTTP server port
    pub server_port: u16,
    /// Load every stored user into the cache before serving
    pub warm_cache: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` - SQLite URL (default: sqlite://users.db)
    /// - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `WARM_CACHE` - Warm the cache from the store on startup (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_connections),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            warm_cache: env::var("WARM_CACHE")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.warm_cache),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://users.db".to_string(),
            max_connections: 5,
            server_port: 8080,
            warm_cache: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
