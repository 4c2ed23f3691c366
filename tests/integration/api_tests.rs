//! API integration tests
//!
//! Drives the full router (api -> services -> repository) against a fresh
//! in-memory database per test.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{
    api,
    config::DatabaseConfig,
    models::book::Book,
    repository::Repository,
    services::{
        notification::{MailSender, StubMailSender},
        Services,
    },
    AppState,
};

/// Mail capability that is always down
struct FailingMailSender;

#[async_trait]
impl MailSender for FailingMailSender {
    async fn send(&self, _book: &Book) -> bool {
        false
    }
}

async fn app_with(mail_sender: Arc<dyn MailSender>) -> Router {
    let repository = Repository::connect(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open in-memory database");
    let state = AppState {
        services: Arc::new(Services::new(repository, mail_sender)),
    };
    api::router(state)
}

async fn app() -> Router {
    app_with(Arc::new(StubMailSender)).await
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).expect("Failed to parse response");
    (status, body)
}

#[tokio::test]
async fn test_create_get_delete_scenario() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/book",
        Some(json!({"title": "junit", "author": "meta"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 1);
    assert_eq!(body["message"], "created");
    assert_eq!(body["body"]["title"], "junit");
    assert_eq!(body["body"]["author"], "meta");
    let id = body["body"]["id"].as_i64().expect("No book ID");

    let (status, body) = send(&app, "GET", &format!("/book/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 1);
    assert_eq!(body["body"]["title"], "junit");
    assert_eq!(body["body"]["author"], "meta");

    let (status, body) = send(&app, "DELETE", &format!("/book/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 1);
    assert_eq!(body["message"], "deleted");
    assert!(body["body"].is_null());

    let (status, body) = send(&app, "GET", &format!("/book/{}", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], -1);
    assert!(body["body"].is_null());
}

#[tokio::test]
async fn test_list_books() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/book", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["body"], json!([]));

    for (title, author) in [("junit", "meta"), ("spring", "gettin")] {
        let (status, _) = send(
            &app,
            "POST",
            "/book",
            Some(json!({"title": title, "author": author})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/book", None).await;
    assert_eq!(status, StatusCode::OK);
    let books = body["body"].as_array().expect("Body is not a list");
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["title"], "junit");
    assert_eq!(books[1]["author"], "gettin");
}

#[tokio::test]
async fn test_update_book() {
    let app = app().await;
    let (_, body) = send(
        &app,
        "POST",
        "/book",
        Some(json!({"title": "junit", "author": "meta"})),
    )
    .await;
    let id = body["body"]["id"].as_i64().expect("No book ID");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/book/{}", id),
        Some(json!({"title": "spring", "author": "gettin"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["body"]["id"], id);
    assert_eq!(body["body"]["title"], "spring");

    let (_, body) = send(&app, "GET", &format!("/book/{}", id), None).await;
    assert_eq!(body["body"]["title"], "spring");
    assert_eq!(body["body"]["author"], "gettin");
}

#[tokio::test]
async fn test_update_unknown_book() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "PUT",
        "/book/77",
        Some(json!({"title": "spring", "author": "gettin"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], -1);
}

#[tokio::test]
async fn test_create_with_blank_fields() {
    let app = app().await;

    let (status, body) = send(&app, "POST", "/book", Some(json!({"title": " "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], -1);
    let message = body["message"].as_str().expect("No message");
    assert!(message.contains("title"));
    assert!(message.contains("author"));
    assert!(body["body"].is_null());

    let (_, body) = send(&app, "GET", "/book", None).await;
    assert_eq!(body["body"], json!([]));
}

#[tokio::test]
async fn test_create_with_malformed_json() {
    let app = app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/book")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("Failed to build request");
    let response = app.oneshot(request).await.expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body: Value = serde_json::from_slice(&bytes).expect("Failed to parse response");
    assert_eq!(body["code"], -1);
    assert!(body["body"].is_null());
    let message = body["message"].as_str().expect("No message");
    assert!(message.contains("body"));
}

#[tokio::test]
async fn test_create_with_null_title() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/book",
        Some(json!({"title": null, "author": "meta"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], -1);
    assert_eq!(body["message"], "Validation failed: title: must not be blank");
}

#[tokio::test]
async fn test_update_with_blank_fields() {
    let app = app().await;
    let (_, body) = send(
        &app,
        "POST",
        "/book",
        Some(json!({"title": "junit", "author": "meta"})),
    )
    .await;
    let id = body["body"]["id"].as_i64().expect("No book ID");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/book/{}", id),
        Some(json!({"title": "", "author": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], -1);
    assert!(body["body"].is_null());
    let message = body["message"].as_str().expect("No message");
    assert!(message.contains("title"));
    assert!(message.contains("author"));

    let (status, body) = send(&app, "GET", &format!("/book/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["body"]["title"], "junit");
    assert_eq!(body["body"]["author"], "meta");
}

#[tokio::test]
async fn test_non_numeric_id() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/book/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], -1);
}

#[tokio::test]
async fn test_delete_unknown_book() {
    let app = app().await;

    let (status, body) = send(&app, "DELETE", "/book/12345", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 1);
    assert!(body["body"].is_null());
}

#[tokio::test]
async fn test_notification_failure_rolls_back() {
    let app = app_with(Arc::new(FailingMailSender)).await;

    let (status, body) = send(
        &app,
        "POST",
        "/book",
        Some(json!({"title": "junit", "author": "meta"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], -1);

    let (_, body) = send(&app, "GET", "/book", None).await;
    assert_eq!(body["body"], json!([]));

    let (status, _) = send(&app, "GET", "/book/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["body"]["status"], "healthy");

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["body"]["status"], "ready");
}
