use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tokio::sync::RwLock;

use blog_core::error::RepoError;

/// MongoDB connection configuration.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    /// Bound on server selection and the liveness ping.
    pub connect_timeout: Duration,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 27017,
            database: "blog_db".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl MongoConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("MONGODB_HOST").unwrap_or(defaults.host),
            port: std::env::var("MONGODB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            database: std::env::var("MONGODB_DATABASE").unwrap_or(defaults.database),
            connect_timeout: std::env::var("MONGODB_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
        }
    }

    pub fn uri(&self) -> String {
        format!("mongodb://{}:{}", self.host, self.port)
    }
}

struct Connected {
    client: Client,
    database: Database,
}

/// Owner of the process's connection to MongoDB.
///
/// Constructed disconnected and handed to repositories explicitly. The driver
/// pools connections internally, so the handle is shared by all concurrent
/// operations without further locking.
///
/// # Example
/// ```ignore
/// let connector = Arc::new(MongoConnector::new());
/// connector.connect(&MongoConfig::from_env()).await?;
/// let posts = MongoPostRepository::new(connector.clone()).await?;
/// // ...
/// connector.close().await;
/// ```
#[derive(Default)]
pub struct MongoConnector {
    state: RwLock<Option<Connected>>,
}

impl MongoConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect and ping the server, or return the existing handle if already
    /// connected. Not retried: a failed ping leaves the connector disconnected.
    pub async fn connect(&self, config: &MongoConfig) -> Result<Database, RepoError> {
        let mut state = self.state.write().await;
        if let Some(connected) = state.as_ref() {
            tracing::debug!("Reusing existing MongoDB connection");
            return Ok(connected.database.clone());
        }

        let uri = config.uri();
        let mut options = ClientOptions::parse(&uri)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        options.app_name = Some("blog-api".to_string());
        options.server_selection_timeout = Some(config.connect_timeout);
        options.connect_timeout = Some(config.connect_timeout);

        let client =
            Client::with_options(options).map_err(|e| RepoError::Connection(e.to_string()))?;
        let database = client.database(&config.database);

        // Use timeout to prevent hanging if MongoDB is unreachable
        tokio::time::timeout(config.connect_timeout, database.run_command(doc! { "ping": 1 }))
            .await
            .map_err(|_| RepoError::Connection("Liveness check timed out".to_string()))?
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        tracing::info!(uri = %uri, database = %config.database, "Connected to MongoDB");

        *state = Some(Connected {
            client,
            database: database.clone(),
        });
        Ok(database)
    }

    /// The active database handle.
    pub async fn handle(&self) -> Result<Database, RepoError> {
        self.state
            .read()
            .await
            .as_ref()
            .map(|c| c.database.clone())
            .ok_or(RepoError::NotConnected)
    }

    pub async fn is_connected(&self) -> bool {
        self.state.read().await.is_some()
    }

    /// Release the connection. Closing a closed connector is a no-op.
    pub async fn close(&self) {
        let connected = self.state.write().await.take();
        if let Some(connected) = connected {
            connected.client.shutdown().await;
            tracing::info!("MongoDB connection closed");
        }
    }
}
