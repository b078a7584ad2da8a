#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header::CONTENT_TYPE};
use axum::response::Response;
use category_storage::{Database, PoolSettings};
use category_web::middleware::auth::{API_KEY_HEADER, ApiKeys};
use category_web::{AppState, router};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-key";

/// In-memory SQLite held open by a single connection, schema applied.
pub async fn test_db() -> Database {
    let settings = PoolSettings {
        max_connections: 1,
        min_connections: 1,
        acquire_timeout: Duration::from_secs(5),
        idle_timeout: None,
        max_lifetime: None,
    };
    let db = Database::connect("sqlite::memory:", &settings).await.unwrap();
    db.ensure_schema().await.unwrap();
    db
}

pub fn build_test_app(db: Database) -> Router {
    build_test_app_with_timeout(db, Duration::from_secs(30))
}

pub fn build_test_app_with_timeout(db: Database, request_timeout: Duration) -> Router {
    router(AppState::new(
        db,
        ApiKeys::from_comma_separated(TEST_API_KEY),
        request_timeout,
    ))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(API_KEY_HEADER, TEST_API_KEY);

    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(&body.to_string())).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(&body.to_string())).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Asserts the status line and the envelope's `code`/`status` agree, then
/// returns the envelope.
pub async fn expect_envelope(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], status.as_u16());
    assert_eq!(json["status"], status.canonical_reason().unwrap());
    json
}

pub async fn create_category(app: &Router, name: &str) -> i64 {
    let response = post_json(app, "/api/categories", serde_json::json!({ "name": name })).await;
    let json = expect_envelope(response, StatusCode::OK).await;
    json["data"]["id"].as_i64().unwrap()
}
