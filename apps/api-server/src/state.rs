//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::error::RepoError;
use blog_infra::{InMemoryPostRepository, InMemoryPostStore};

#[cfg(feature = "mongodb")]
use blog_infra::{MongoConfig, MongoConnector, MongoPostRepository};

use crate::config::{AppConfig, StorageBackend};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    #[cfg(feature = "mongodb")]
    connector: Option<Arc<MongoConnector>>,
}

impl AppState {
    /// Build the post service on the configured store.
    ///
    /// A MongoDB connection failure is fatal: there is no degraded mode without storage.
    pub async fn new(config: &AppConfig) -> Result<Self, RepoError> {
        let state = match config.storage {
            #[cfg(feature = "mongodb")]
            StorageBackend::Mongo => Self::mongo(&config.database).await?,
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage - posts are lost on restart");
                Self::in_memory().await?
            }
        };

        tracing::info!(storage = state.storage(), "Application state initialized");
        Ok(state)
    }

    #[cfg(feature = "mongodb")]
    async fn mongo(config: &MongoConfig) -> Result<Self, RepoError> {
        let connector = Arc::new(MongoConnector::new());
        connector.connect(config).await?;
        let repo = MongoPostRepository::new(connector.clone()).await?;

        Ok(Self {
            posts: PostService::new(Arc::new(repo)),
            connector: Some(connector),
        })
    }

    /// State backed by a fresh in-memory store.
    pub async fn in_memory() -> Result<Self, RepoError> {
        let repo = InMemoryPostRepository::new(Arc::new(InMemoryPostStore::new())).await?;
        Ok(Self {
            posts: PostService::new(Arc::new(repo)),
            #[cfg(feature = "mongodb")]
            connector: None,
        })
    }

    /// Name of the backing store, for diagnostics.
    pub fn storage(&self) -> &'static str {
        #[cfg(feature = "mongodb")]
        let connected = self.connector.is_some();
        #[cfg(not(feature = "mongodb"))]
        let connected = false;

        if connected { "mongodb" } else { "memory" }
    }

    /// Release the store connection, if any.
    #[cfg(feature = "mongodb")]
    pub async fn shutdown(&self) {
        if let Some(connector) = &self.connector {
            connector.close().await;
        }
    }

    #[cfg(not(feature = "mongodb"))]
    pub async fn shutdown(&self) {}
}
