//! Post listing and detail handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use quill_core::pagination::Pagination;
use quill_core::similarity::{self, RELATED_LIMIT};
use quill_core::validation;
use quill_shared::ApiResponse;
use quill_shared::dto::{PostDetailResponse, PostListResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::view;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Untrusted page token; anything invalid means page 1.
    pub page: Option<String>,
    /// Optional tag slug to scope the listing.
    pub tag: Option<String>,
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let tag = match &query.tag {
        Some(slug) => Some(
            state
                .tags
                .find_by_slug(slug)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("No tag with slug '{slug}'")))?,
        ),
        None => None,
    };
    let tag_slug = tag.as_ref().map(|t| t.slug.as_str());

    let total = state.posts.count_published(tag_slug).await?;
    let window = Pagination::default().window(query.page.as_deref(), total);
    let posts = state
        .posts
        .list_published(tag_slug, window.offset, window.limit)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostListResponse {
        posts: posts
            .iter()
            .map(|p| view::post_summary(p, &state.site_base_url))
            .collect(),
        page: view::page_meta(&window),
        tag: tag.as_ref().map(view::tag_view),
    })))
}

/// GET /api/posts/{id}
pub async fn detail(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_published_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published post with id {id}")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(view::post_view(&post, &state.site_base_url))))
}

/// GET /api/posts/{year}/{month}/{day}/{slug}
///
/// The canonical detail view: the post plus its active comments, an empty
/// comment form, and the similarity-ranked related posts.
pub async fn detail_by_date(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32, u32, String)>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();
    let post = state
        .posts
        .find_published_by_date_slug(year, month, day, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published post '{slug}'")))?;

    let comments = state.comments.list_active(post.id).await?;

    let tag_ids: Vec<Uuid> = post.tag_ids().into_iter().collect();
    let candidates = state.posts.find_sharing_tags(&tag_ids, post.id).await?;
    let related = similarity::rank_related(&post, candidates, RELATED_LIMIT);

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostDetailResponse {
        post: view::post_view(&post, &state.site_base_url),
        comments: comments.iter().map(view::comment_view).collect(),
        comment_form: view::form_view(&validation::comment_form()),
        related_posts: related
            .iter()
            .map(|p| view::post_summary(p, &state.site_base_url))
            .collect(),
    })))
}
