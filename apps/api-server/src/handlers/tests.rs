use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus, Tag};
use quill_infra::{InMemoryMailer, InMemoryStore};

use crate::state::AppState;

fn app_state(store: &Arc<InMemoryStore>, mailer: &Arc<InMemoryMailer>) -> AppState {
    AppState {
        posts: store.clone(),
        comments: store.clone(),
        tags: store.clone(),
        mailer: mailer.clone(),
        site_base_url: "http://testserver".to_string(),
    }
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(super::configure_routes),
        )
        .await
    };
}

fn published(title: &str, hours_ago: i64) -> Post {
    let mut post = Post::new(
        Uuid::new_v4(),
        title.to_string(),
        title.to_lowercase().replace(' ', "-"),
        format!("{title} body"),
    );
    post.status = PostStatus::Published;
    post.publish = Utc::now() - Duration::hours(hours_ago);
    post
}

fn titles(posts: &Value) -> Vec<String> {
    posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

async fn seven_posts() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    // p1 is the newest, p7 the oldest.
    for i in 1..=7 {
        store.add_post(published(&format!("p{i}"), i)).await;
    }
    store
}

#[actix_rt::test]
async fn list_serves_the_requested_page() {
    let store = seven_posts().await;
    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::get().uri("/api/posts?page=2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(titles(&body["data"]["posts"]), vec!["p4", "p5", "p6"]);
    assert_eq!(body["data"]["page"]["number"], 2);
    assert_eq!(body["data"]["page"]["total_pages"], 3);
}

#[actix_rt::test]
async fn non_numeric_page_token_serves_page_one() {
    let store = seven_posts().await;
    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::get()
        .uri("/api/posts?page=abc")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(titles(&body["data"]["posts"]), vec!["p1", "p2", "p3"]);
    assert_eq!(body["data"]["page"]["number"], 1);
}

#[actix_rt::test]
async fn page_token_past_the_end_serves_the_last_page() {
    let store = seven_posts().await;
    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::get()
        .uri("/api/posts?page=99")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(titles(&body["data"]["posts"]), vec!["p7"]);
    assert_eq!(body["data"]["page"]["number"], 3);
}

#[actix_rt::test]
async fn listing_by_unknown_tag_is_not_found() {
    let store = Arc::new(InMemoryStore::new());
    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::get()
        .uri("/api/posts?tag=no-such-tag")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn listing_by_tag_scopes_the_results() {
    let store = Arc::new(InMemoryStore::new());
    let rust = Tag::new("Rust".to_string(), "rust".to_string());
    store.add_tag(rust.clone()).await;

    let mut tagged = published("Tagged", 1);
    tagged.tags = vec![rust];
    store.add_post(tagged).await;
    store.add_post(published("Untagged", 2)).await;

    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::get()
        .uri("/api/posts?tag=rust")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(titles(&body["data"]["posts"]), vec!["Tagged"]);
    assert_eq!(body["data"]["tag"]["slug"], "rust");
}

#[actix_rt::test]
async fn detail_by_id_hides_drafts() {
    let store = Arc::new(InMemoryStore::new());
    let post = published("Visible", 1);
    let post_id = post.id;
    store.add_post(post).await;

    let draft = Post::new(
        Uuid::new_v4(),
        "Hidden".to_string(),
        "hidden".to_string(),
        "body".to_string(),
    );
    let draft_id = draft.id;
    store.add_post(draft).await;

    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::OK
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{draft_id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn detail_by_date_slug_includes_comments_form_and_related() {
    let store = Arc::new(InMemoryStore::new());
    let shared_tag = Tag::new("Rust".to_string(), "rust".to_string());

    let mut post = published("Main Post", 1);
    post.publish = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
    post.slug = "main-post".to_string();
    post.tags = vec![shared_tag.clone()];
    store.add_post(post).await;

    let mut related = published("Related Post", 2);
    related.tags = vec![shared_tag];
    store.add_post(related).await;

    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::get()
        .uri("/api/posts/2024/3/5/main-post")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["post"]["title"], "Main Post");
    assert_eq!(body["data"]["comments"].as_array().unwrap().len(), 0);
    assert_eq!(
        body["data"]["comment_form"]["fields"],
        json!(["name", "email", "body"])
    );
    assert_eq!(titles(&body["data"]["related_posts"]), vec!["Related Post"]);
}

#[actix_rt::test]
async fn detail_by_wrong_date_is_not_found() {
    let store = Arc::new(InMemoryStore::new());
    let mut post = published("Main Post", 1);
    post.publish = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
    post.slug = "main-post".to_string();
    store.add_post(post).await;

    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::get()
        .uri("/api/posts/2024/3/6/main-post")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn valid_comment_is_persisted_and_returned() {
    let store = Arc::new(InMemoryStore::new());
    let post = published("Post", 1);
    let post_id = post.id;
    store.add_post(post).await;

    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/comment"))
        .set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "body": "Great read."
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["comment"]["name"], "Ada");
    assert_eq!(store.comment_count().await, 1);
}

#[actix_rt::test]
async fn invalid_comment_returns_field_errors_with_ok_status() {
    let store = Arc::new(InMemoryStore::new());
    let post = published("Post", 1);
    let post_id = post.id;
    store.add_post(post).await;

    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/comment"))
        .set_json(json!({ "name": "Ada", "email": "not-an-email", "body": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["comment"].is_null());
    assert!(body["data"]["errors"]["email"].is_array());
    assert!(body["data"]["errors"]["body"].is_array());
    assert_eq!(store.comment_count().await, 0);
}

#[actix_rt::test]
async fn commenting_on_a_draft_is_not_found_and_persists_nothing() {
    let store = Arc::new(InMemoryStore::new());
    let draft = Post::new(
        Uuid::new_v4(),
        "Draft".to_string(),
        "draft".to_string(),
        "body".to_string(),
    );
    let draft_id = draft.id;
    store.add_post(draft).await;

    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{draft_id}/comment"))
        .set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "body": "Hello"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.comment_count().await, 0);
}

#[actix_rt::test]
async fn comment_route_rejects_other_methods() {
    let store = Arc::new(InMemoryStore::new());
    let post = published("Post", 1);
    let post_id = post.id;
    store.add_post(post).await;

    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}/comment"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_rt::test]
async fn share_form_is_empty_and_unsent() {
    let store = Arc::new(InMemoryStore::new());
    let post = published("Post", 1);
    let post_id = post.id;
    store.add_post(post).await;

    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}/share"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["sent"], false);
    assert_eq!(
        body["data"]["form"]["fields"],
        json!(["name", "email", "to", "comments"])
    );
}

#[actix_rt::test]
async fn valid_share_dispatches_the_notification() {
    let store = Arc::new(InMemoryStore::new());
    let post = published("Great Post", 1);
    let post_id = post.id;
    store.add_post(post).await;

    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/share"))
        .set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "to": "friend@example.com",
            "comments": "Worth your time."
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["sent"], true);

    let sent = mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].subject,
        "Ada (ada@example.com) recommends you read Great Post"
    );
    assert_eq!(sent[0].to, vec!["friend@example.com"]);
    assert!(sent[0].body.contains("http://testserver/api/posts/"));
    assert!(sent[0].body.contains("Ada's comments: Worth your time."));
}

#[actix_rt::test]
async fn invalid_share_returns_errors_and_sends_nothing() {
    let store = Arc::new(InMemoryStore::new());
    let post = published("Post", 1);
    let post_id = post.id;
    store.add_post(post).await;

    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/share"))
        .set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "to": "not-an-email"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["sent"], false);
    assert!(body["data"]["errors"]["to"].is_array());
    assert!(mailer.sent().await.is_empty());
}

#[actix_rt::test]
async fn search_without_query_returns_empty_results() {
    let store = seven_posts().await;
    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    for uri in ["/api/search", "/api/search?query="] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["total"], 0, "uri {uri}");
        assert_eq!(body["data"]["results"].as_array().unwrap().len(), 0);
    }
}

#[actix_rt::test]
async fn search_matches_published_posts() {
    let store = Arc::new(InMemoryStore::new());
    let mut hit = published("Borrow Checker Deep Dive", 1);
    hit.body = "ownership and lifetimes".to_string();
    store.add_post(hit).await;
    store.add_post(published("Unrelated", 2)).await;

    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::get()
        .uri("/api/search?query=ownership")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["total"], 1);
    assert_eq!(
        titles(&body["data"]["results"]),
        vec!["Borrow Checker Deep Dive"]
    );
}

#[actix_rt::test]
async fn health_check_reports_ok() {
    let store = Arc::new(InMemoryStore::new());
    let mailer = Arc::new(InMemoryMailer::new());
    let app = test_app!(app_state(&store, &mailer));

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}
