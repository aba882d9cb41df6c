//! Full-text search handler.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_shared::ApiResponse;
use quill_shared::dto::SearchResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::view;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// GET /api/search
///
/// The search only runs when a non-empty query parameter is present; a
/// missing or blank query yields an empty result set without touching the
/// store.
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let term = query
        .query
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let response = match term {
        Some(term) => {
            let results = state.posts.search_published(term).await?;
            SearchResponse {
                query: Some(term.to_string()),
                total: results.len(),
                results: results
                    .iter()
                    .map(|p| view::post_summary(p, &state.site_base_url))
                    .collect(),
            }
        }
        None => SearchResponse {
            query: None,
            results: Vec::new(),
            total: 0,
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}
