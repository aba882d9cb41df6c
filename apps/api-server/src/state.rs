//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{CommentRepository, Mailer, PostRepository, TagRepository};
use quill_infra::database;
use quill_infra::{
    ConsoleMailer, InMemoryStore, PostgresCommentRepository, PostgresPostRepository,
    PostgresTagRepository, WebhookMailer,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub site_base_url: String,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (posts, comments, tags): (
            Arc<dyn PostRepository>,
            Arc<dyn CommentRepository>,
            Arc<dyn TagRepository>,
        ) = match &config.database {
            Some(db_config) => match database::connect(db_config).await {
                Ok(conn) => (
                    Arc::new(PostgresPostRepository::new(conn.clone())),
                    Arc::new(PostgresCommentRepository::new(conn.clone())),
                    Arc::new(PostgresTagRepository::new(conn)),
                ),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory_stores()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory_stores()
            }
        };

        let mailer: Arc<dyn Mailer> = match &config.mail_webhook_url {
            Some(url) => {
                tracing::info!("Mail webhook configured");
                Arc::new(WebhookMailer::new(url.clone()))
            }
            None => {
                tracing::warn!("MAIL_WEBHOOK_URL not set. Mail will be logged, not dispatched.");
                Arc::new(ConsoleMailer)
            }
        };

        tracing::info!("Application state initialized");

        Self {
            posts,
            comments,
            tags,
            mailer,
            site_base_url: config.site_base_url.clone(),
        }
    }

    fn in_memory_stores() -> (
        Arc<dyn PostRepository>,
        Arc<dyn CommentRepository>,
        Arc<dyn TagRepository>,
    ) {
        let store = Arc::new(InMemoryStore::new());
        (store.clone(), store.clone(), store)
    }
}
