use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - belongs to exactly one post.
///
/// `active` is the moderation gate: only active comments are ever displayed.
/// Deactivation happens through moderation tooling outside this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub name: String,
    pub email: String,
    pub body: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment on a post. New comments default to active.
    pub fn new(post_id: Uuid, name: String, email: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            name,
            email,
            body,
            active: true,
            created_at: Utc::now(),
        }
    }
}
