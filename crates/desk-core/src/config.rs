//! Configuration types and loading

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Server configuration
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// PostgreSQL URL. `None` selects the in-memory store.
    pub url: Option<String>,
    pub pool_size: u32,
    pub pool_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
    pub max_body_size_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: None,
                pool_size: 10,
                pool_timeout_seconds: 5,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                request_timeout_seconds: 30,
                max_body_size_bytes: 1024 * 1024, // 1MB
            },
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Database
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            config.database.url = Some(url);
        }
        if let Some(size) = lookup("DATABASE_POOL_SIZE") {
            config.database.pool_size = parse("DATABASE_POOL_SIZE", &size)?;
        }
        if let Some(timeout) = lookup("DATABASE_POOL_TIMEOUT") {
            config.database.pool_timeout_seconds = parse("DATABASE_POOL_TIMEOUT", &timeout)?;
        }

        // Server
        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.server.port = parse("PORT", &port)?;
        }
        if let Some(timeout) = lookup("REQUEST_TIMEOUT") {
            config.server.request_timeout_seconds = parse("REQUEST_TIMEOUT", &timeout)?;
        }
        if let Some(size) = lookup("MAX_BODY_SIZE") {
            config.server.max_body_size_bytes = parse("MAX_BODY_SIZE", &size)?;
        }

        Ok(config)
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or_else(|_| {
            tracing::warn!(host = %self.server.host, "Unparseable HOST, binding to 0.0.0.0");
            [0, 0, 0, 0].into()
        });
        SocketAddr::new(ip, self.server.port)
    }

    pub fn uses_in_memory_store(&self) -> bool {
        self.database.url.is_none()
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}
