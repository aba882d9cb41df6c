use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post, Tag};
use crate::error::RepoError;

/// Post store, scoped to reader-visible (published) posts.
///
/// Every read in this trait applies the published predicate; draft posts are
/// invisible outside authoring tools, which are not part of this system.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Single published post by id, tags loaded.
    async fn find_published_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Single published post by its publish date and slug, tags loaded.
    async fn find_published_by_date_slug(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Option<Post>, RepoError>;

    /// Number of published posts, optionally scoped to one tag.
    async fn count_published(&self, tag_slug: Option<&str>) -> Result<u64, RepoError>;

    /// Published posts ordered by publish time descending, optionally scoped
    /// to one tag, sliced by the caller's page window.
    async fn list_published(
        &self,
        tag_slug: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// Published posts sharing at least one of `tag_ids`, excluding
    /// `exclude_post`, tags loaded. Candidates for similarity ranking.
    async fn find_sharing_tags(
        &self,
        tag_ids: &[Uuid],
        exclude_post: Uuid,
    ) -> Result<Vec<Post>, RepoError>;

    /// Published posts matching `query` under the store's native full-text
    /// ranking over title and body.
    async fn search_published(&self, query: &str) -> Result<Vec<Post>, RepoError>;
}

/// Comment store.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Active comments for a post, oldest first.
    async fn list_active(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Persist a new comment.
    async fn save(&self, comment: Comment) -> Result<Comment, RepoError>;
}

/// Tag store.
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;
}
