//! Application state - shared across all handlers.

use std::sync::Arc;

use inkwell_core::error::RepoError;
use inkwell_core::ports::{DataStore, EventLogger};
use inkwell_infra::{DatabaseConfig, InMemoryPostStore, TracingEventLogger};

use crate::middleware::error::AppError;

#[cfg(feature = "postgres")]
use inkwell_infra::PostgresPostStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DataStore>,
    pub logger: Arc<dyn EventLogger>,
    /// Which store backs `store`, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let logger: Arc<dyn EventLogger> = Arc::new(TracingEventLogger);

        #[cfg(feature = "postgres")]
        let (store, storage): (Arc<dyn DataStore>, &'static str) = match db_config {
            Some(config) => match inkwell_infra::database::connect(config).await {
                Ok(db) => (Arc::new(PostgresPostStore::new(db)), "postgres"),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    (Arc::new(InMemoryPostStore::new()), "memory")
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (Arc::new(InMemoryPostStore::new()), "memory")
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (store, storage): (Arc<dyn DataStore>, &'static str) = {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            (Arc::new(InMemoryPostStore::new()), "memory")
        };

        tracing::info!(storage, "Application state initialized");

        Self::from_parts(store, logger, storage)
    }

    pub fn from_parts(
        store: Arc<dyn DataStore>,
        logger: Arc<dyn EventLogger>,
        storage: &'static str,
    ) -> Self {
        Self {
            store,
            logger,
            storage,
        }
    }

    /// Error boundary shared by every editor operation.
    ///
    /// The returned mapper logs the failure under `action` and converts it
    /// into the HTTP error for the caller.
    pub fn persistence_failure(&self, action: &'static str) -> impl Fn(RepoError) -> AppError + '_ {
        move |err| {
            self.logger
                .log_error(&format!("Something went wrong {action}: {err}"));
            AppError::from(err)
        }
    }
}
