//! In-memory store - used as fallback when PostgreSQL is unavailable, and as
//! the backing store for handler-level tests.
//!
//! Note: data is lost on process restart.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, Post, Tag};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository, TagRepository};

/// One struct backs all three stores; the server hands it out as three ports.
#[derive(Default)]
pub struct InMemoryStore {
    posts: RwLock<Vec<Post>>,
    comments: RwLock<Vec<Comment>>,
    tags: RwLock<Vec<Tag>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_post(&self, post: Post) {
        self.posts.write().await.push(post);
    }

    pub async fn add_tag(&self, tag: Tag) {
        self.tags.write().await.push(tag);
    }

    /// Total number of stored comments, active or not.
    pub async fn comment_count(&self) -> usize {
        self.comments.read().await.len()
    }

    /// Published posts, newest first, optionally scoped to one tag slug.
    /// The single reader-visibility predicate for this store.
    async fn visible_posts(&self, tag_slug: Option<&str>) -> Vec<Post> {
        let posts = self.posts.read().await;
        let mut visible: Vec<Post> = posts
            .iter()
            .filter(|p| p.is_published())
            .filter(|p| match tag_slug {
                Some(slug) => p.tags.iter().any(|t| t.slug == slug),
                None => true,
            })
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.publish.cmp(&a.publish));
        visible
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_published_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .find(|p| p.id == id && p.is_published())
            .cloned())
    }

    async fn find_published_by_date_slug(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            return Ok(None);
        };

        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .find(|p| {
                p.is_published() && p.slug == slug && p.publish.date_naive() == date
            })
            .cloned())
    }

    async fn count_published(&self, tag_slug: Option<&str>) -> Result<u64, RepoError> {
        Ok(self.visible_posts(tag_slug).await.len() as u64)
    }

    async fn list_published(
        &self,
        tag_slug: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .visible_posts(tag_slug)
            .await
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_sharing_tags(
        &self,
        tag_ids: &[Uuid],
        exclude_post: Uuid,
    ) -> Result<Vec<Post>, RepoError> {
        let wanted: HashSet<Uuid> = tag_ids.iter().copied().collect();
        Ok(self
            .visible_posts(None)
            .await
            .into_iter()
            .filter(|p| p.id != exclude_post)
            .filter(|p| p.tags.iter().any(|t| wanted.contains(&t.id)))
            .collect())
    }

    async fn search_published(&self, query: &str) -> Result<Vec<Post>, RepoError> {
        // Substring match stands in for Postgres full-text search here.
        let needle = query.to_lowercase();
        Ok(self
            .visible_posts(None)
            .await
            .into_iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.body.to_lowercase().contains(&needle)
            })
            .collect())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn list_active(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let comments = self.comments.read().await;
        let mut active: Vec<Comment> = comments
            .iter()
            .filter(|c| c.post_id == post_id && c.active)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(active)
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.comments.write().await.push(comment.clone());
        Ok(comment)
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let tags = self.tags.read().await;
        Ok(tags.iter().find(|t| t.slug == slug).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::PostStatus;

    fn published(title: &str) -> Post {
        let mut post = Post::new(
            Uuid::new_v4(),
            title.to_string(),
            title.to_lowercase(),
            "body".to_string(),
        );
        post.status = PostStatus::Published;
        post
    }

    #[tokio::test]
    async fn drafts_are_invisible() {
        let store = InMemoryStore::new();
        let draft = Post::new(
            Uuid::new_v4(),
            "Draft".to_string(),
            "draft".to_string(),
            "body".to_string(),
        );
        let id = draft.id;
        store.add_post(draft).await;

        assert!(store.find_published_by_id(id).await.unwrap().is_none());
        assert_eq!(store.count_published(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn inactive_comments_are_not_listed() {
        let store = InMemoryStore::new();
        let post = published("Post");
        let post_id = post.id;
        store.add_post(post).await;

        let mut hidden = Comment::new(
            post_id,
            "Troll".to_string(),
            "troll@example.com".to_string(),
            "spam".to_string(),
        );
        hidden.active = false;
        store.save(hidden).await.unwrap();

        let shown = Comment::new(
            post_id,
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "nice".to_string(),
        );
        store.save(shown).await.unwrap();

        let listed = store.list_active(post_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Ada");
        assert_eq!(store.comment_count().await, 2);
    }

    #[tokio::test]
    async fn search_matches_title_and_body() {
        let store = InMemoryStore::new();
        let mut a = published("Rust ownership");
        a.body = "borrow checker".to_string();
        let b = published("Gardening");
        store.add_post(a).await;
        store.add_post(b).await;

        assert_eq!(store.search_published("Borrow").await.unwrap().len(), 1);
        assert!(store.search_published("python").await.unwrap().is_empty());
    }
}
