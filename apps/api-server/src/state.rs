//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::error::RepoError;
use blog_core::ports::PostRepository;
use blog_core::services::PostService;
use blog_infra::DatabaseConfig;

#[cfg(feature = "mongodb")]
use blog_infra::{DatabaseConnection, MongoPostRepository};

#[cfg(not(feature = "mongodb"))]
use blog_infra::InMemoryPostRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub environment: String,
}

impl AppState {
    /// Build the state around an already constructed repository.
    pub fn with_repository(repo: Arc<dyn PostRepository>, environment: impl Into<String>) -> Self {
        Self {
            posts: PostService::new(repo),
            environment: environment.into(),
        }
    }

    /// Connect to the document store and build the application state.
    ///
    /// A failed connection is returned to the caller; the server must not
    /// start without its database.
    #[cfg(feature = "mongodb")]
    pub async fn connect(
        db_config: &DatabaseConfig,
        environment: &str,
    ) -> Result<Self, RepoError> {
        let connection = DatabaseConnection::init(db_config).await?;
        let repo: Arc<dyn PostRepository> = Arc::new(MongoPostRepository::new(&connection));

        tracing::info!("Application state initialized");
        Ok(Self::with_repository(repo, environment))
    }

    #[cfg(not(feature = "mongodb"))]
    pub async fn connect(
        _db_config: &DatabaseConfig,
        environment: &str,
    ) -> Result<Self, RepoError> {
        tracing::warn!("Running without mongodb feature - posts are kept in memory");
        Ok(Self::with_repository(
            Arc::new(InMemoryPostRepository::new()),
            environment,
        ))
    }
}
