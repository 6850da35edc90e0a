use std::time::Duration;

#[cfg(feature = "mongodb")]
use mongodb::{
    Client, Collection, Database,
    bson::doc,
    event::{EventHandler, sdam::SdamEvent},
    options::ClientOptions,
};

#[cfg(feature = "mongodb")]
use blog_core::error::RepoError;

#[cfg(feature = "mongodb")]
use super::entity::post::PostDocument;

/// Database used when the connection string names none.
#[cfg(feature = "mongodb")]
pub const DEFAULT_DATABASE: &str = "blog";

/// Collection holding post documents.
#[cfg(feature = "mongodb")]
pub const POSTS_COLLECTION: &str = "posts";

/// Configuration for the document store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub app_name: String,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            app_name: "blog-api".to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// A single pooled connection to the document store.
///
/// The driver owns the pool; cloning this handle is cheap.
#[cfg(feature = "mongodb")]
#[derive(Clone)]
pub struct DatabaseConnection {
    pub client: Client,
    pub db: Database,
}

#[cfg(feature = "mongodb")]
impl DatabaseConnection {
    /// Connect and verify the server answers a ping.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, RepoError> {
        tracing::info!("Initializing database connection...");

        let connection_error = |e: mongodb::error::Error| RepoError::Connection(e.to_string());

        let mut options = ClientOptions::parse(&config.url)
            .await
            .map_err(connection_error)?;
        options.app_name = Some(config.app_name.clone());
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);
        options.sdam_event_handler = Some(EventHandler::callback(|event: SdamEvent| {
            if let SdamEvent::ServerHeartbeatFailed(failed) = event {
                tracing::warn!(
                    server = %failed.server_address,
                    error = %failed.failure,
                    "Database heartbeat failed"
                );
            }
        }));

        let client = Client::with_options(options).map_err(connection_error)?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(connection_error)?;
        tracing::info!(database = %db.name(), "Successfully connected to database");

        Ok(Self { client, db })
    }

    /// Typed handle on the posts collection.
    pub fn posts(&self) -> Collection<PostDocument> {
        self.db.collection(POSTS_COLLECTION)
    }
}
