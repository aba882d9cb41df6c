//! Share-a-post-by-email handlers.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::ports::EmailMessage;
use quill_core::validation::{self, CleanedData};
use quill_shared::ApiResponse;
use quill_shared::dto::SharePostResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::view;

async fn published_post(state: &AppState, id: Uuid) -> AppResult<Post> {
    state
        .posts
        .find_published_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published post with id {id}")))
}

fn field(cleaned: &CleanedData, name: &str) -> String {
    cleaned.get(name).cloned().unwrap_or_default()
}

/// GET /api/posts/{post_id}/share - the empty submission form.
pub async fn form(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = published_post(&state, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(SharePostResponse {
        post: view::post_summary(&post, &state.site_base_url),
        form: view::form_view(&validation::share_form()),
        sent: false,
        errors: BTreeMap::new(),
    })))
}

/// POST /api/posts/{post_id}/share
///
/// On success, dispatches the recommendation to the recipient and annotates
/// the view as sent. Validation failure re-renders the same view with field
/// errors and a 200 status.
pub async fn submit(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<BTreeMap<String, String>>,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, path.into_inner()).await?;
    let schema = validation::share_form();

    let response = match schema.validate(&body) {
        Ok(cleaned) => {
            let name = field(&cleaned, "name");
            let email = field(&cleaned, "email");
            let post_url = format!("{}{}", state.site_base_url, post.canonical_path());

            let message = EmailMessage {
                subject: format!("{} ({}) recommends you read {}", name, email, post.title),
                body: format!(
                    "Read {} at {}\n\n{}'s comments: {}",
                    post.title,
                    post_url,
                    name,
                    field(&cleaned, "comments")
                ),
                reply_to: Some(email),
                to: vec![field(&cleaned, "to")],
            };
            state.mailer.send(message).await?;

            tracing::debug!(post_id = %post.id, "Share notification dispatched");

            SharePostResponse {
                post: view::post_summary(&post, &state.site_base_url),
                form: view::form_view(&schema),
                sent: true,
                errors: BTreeMap::new(),
            }
        }
        Err(errors) => SharePostResponse {
            post: view::post_summary(&post, &state.site_base_url),
            form: view::form_view(&schema),
            sent: false,
            errors,
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}
