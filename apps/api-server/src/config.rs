//! Application configuration loaded from environment variables.

use std::env;

#[cfg(feature = "mongodb")]
use blog_infra::MongoConfig;

/// Where posts are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    #[cfg(feature = "mongodb")]
    Mongo,
    /// Process-local store, lost on restart.
    Memory,
}

impl StorageBackend {
    /// Parse `STORAGE_BACKEND`. Unknown values fall back to the build default.
    fn from_env() -> Self {
        match env::var("STORAGE_BACKEND").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            _ => Self::default(),
        }
    }
}

impl Default for StorageBackend {
    #[cfg(feature = "mongodb")]
    fn default() -> Self {
        StorageBackend::Mongo
    }

    #[cfg(not(feature = "mongodb"))]
    fn default() -> Self {
        StorageBackend::Memory
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    #[cfg(feature = "mongodb")]
    pub database: MongoConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            storage: StorageBackend::from_env(),
            #[cfg(feature = "mongodb")]
            database: MongoConfig::from_env(),
        }
    }
}
