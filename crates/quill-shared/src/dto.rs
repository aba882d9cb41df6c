//! Data Transfer Objects - the view context each handler renders.
//!
//! Submissions arrive as plain field maps (the validator is schema-driven),
//! so only response shapes live here.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-field validation errors, mirrored into responses as-is.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// A tag as shown in listings and detail views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagView {
    pub name: String,
    pub slug: String,
}

/// A post as it appears in listings, search results, and related-post lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub publish: DateTime<Utc>,
    pub url: String,
    pub tags: Vec<TagView>,
}

/// A post with its full body, for detail views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub url: String,
    pub tags: Vec<TagView>,
}

/// A displayed comment. The author's email stays server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: Uuid,
    pub name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// An empty submission form: the fields a client is expected to send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormView {
    pub fields: Vec<String>,
}

/// Pagination metadata for a listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub number: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub page_size: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

/// GET /posts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostSummary>,
    pub page: PageMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagView>,
}

/// GET /posts/{year}/{month}/{day}/{slug}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostView,
    pub comments: Vec<CommentView>,
    pub comment_form: FormView,
    pub related_posts: Vec<PostSummary>,
}

/// GET/POST /posts/{post_id}/share
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharePostResponse {
    pub post: PostSummary,
    pub form: FormView,
    pub sent: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: FieldErrors,
}

/// POST /posts/{post_id}/comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentSubmitResponse {
    pub post: PostSummary,
    pub comment: Option<CommentView>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: FieldErrors,
}

/// GET /search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub results: Vec<PostSummary>,
    pub total: usize,
}
