//! Comment submission handler.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Comment;
use quill_core::validation;
use quill_shared::ApiResponse;
use quill_shared::dto::CommentSubmitResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::view;

/// POST /api/posts/{post_id}/comment
///
/// Only submit requests reach this handler; the route table rejects other
/// methods. Validation failure returns the field errors and no created
/// comment, with a 200 status.
pub async fn submit(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<BTreeMap<String, String>>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_published_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published post with id {id}")))?;

    let response = match validation::comment_form().validate(&body) {
        Ok(cleaned) => {
            let comment = Comment::new(
                post.id,
                cleaned.get("name").cloned().unwrap_or_default(),
                cleaned.get("email").cloned().unwrap_or_default(),
                cleaned.get("body").cloned().unwrap_or_default(),
            );
            let saved = state.comments.save(comment).await?;

            tracing::debug!(post_id = %post.id, comment_id = %saved.id, "Comment created");

            CommentSubmitResponse {
                post: view::post_summary(&post, &state.site_base_url),
                comment: Some(view::comment_view(&saved)),
                errors: BTreeMap::new(),
            }
        }
        Err(errors) => CommentSubmitResponse {
            post: view::post_summary(&post, &state.site_base_url),
            comment: None,
            errors,
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}
