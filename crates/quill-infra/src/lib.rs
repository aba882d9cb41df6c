//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the PostgreSQL store, the in-memory fallback store,
//! and the outbound mail dispatchers.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL store via SeaORM
//! - `mail-webhook` - Webhook mail dispatch via reqwest

pub mod database;
pub mod mailer;
pub mod memory;

pub use database::DatabaseConfig;
pub use mailer::{ConsoleMailer, InMemoryMailer};
pub use memory::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
};

#[cfg(feature = "mail-webhook")]
pub use mailer::WebhookMailer;
