//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{CategoryRepository, PostRepository, UserRepository};
use quill_infra::database::{
    DatabaseConfig, InMemoryCategoryRepository, InMemoryPostRepository, InMemoryStore,
    InMemoryUserRepository, PostgresCategoryRepository, PostgresPostRepository,
    PostgresUserRepository, connect,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the application state with appropriate repository
    /// implementations: PostgreSQL when configured, in-memory otherwise.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let state = match db_config {
            Some(config) => match connect(config).await {
                Ok(conn) => Self {
                    users: Arc::new(PostgresUserRepository::new(conn.clone())),
                    categories: Arc::new(PostgresCategoryRepository::new(conn.clone())),
                    posts: Arc::new(PostgresPostRepository::new(conn)),
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        tracing::info!("Application state initialized");
        state
    }

    /// All three repositories over one shared in-memory store, so
    /// cross-entity rules (category deletion clearing post references) hold.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            users: Arc::new(InMemoryUserRepository::new(store.clone())),
            categories: Arc::new(InMemoryCategoryRepository::new(store.clone())),
            posts: Arc::new(InMemoryPostRepository::new(store)),
        }
    }
}
