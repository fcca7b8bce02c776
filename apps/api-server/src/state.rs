//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{PostRepository, ThemeRepository};
use blog_infra::database::{InMemoryPostRepository, InMemoryStore, InMemoryThemeRepository};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use blog_infra::database::{PostgresPostRepository, PostgresThemeRepository, connect};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub themes: Arc<dyn ThemeRepository>,
    /// Name of the backing store, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match connect(db_config).await {
                    Ok(conn) => {
                        let conn = Arc::new(conn);
                        tracing::info!("Application state initialized (postgres)");
                        return Self {
                            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                            themes: Arc::new(PostgresThemeRepository::new(conn)),
                            storage: "postgres",
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory repositories");

        let store = Arc::new(InMemoryStore::with_users(config.dev_user_ids.iter().copied()));
        tracing::info!(users = ?config.dev_user_ids, "Application state initialized (memory)");
        Self::in_memory(store)
    }

    /// State backed by an [`InMemoryStore`].
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new(store.clone())),
            themes: Arc::new(InMemoryThemeRepository::new(store)),
            storage: "memory",
        }
    }
}
