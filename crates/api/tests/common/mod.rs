#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use bestiary_api::config::ServerConfig;
use bestiary_api::router::build_app_router;
use bestiary_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router over `pool`, creating the schema first.
///
/// Uses the same [`build_app_router`] as the server binary, so tests run
/// through the production middleware stack.
pub async fn build_test_app(pool: SqlitePool) -> Router {
    bestiary_db::ensure_schema(&pool).await.unwrap();

    build_app_router(AppState { pool }, &test_config())
}

/// A valid creature payload for `POST /bestiary/add`.
pub fn creature_json(name: &str, category: &str, danger_level: i32) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": format!("{name}, a horror of the mythos"),
        "danger_level": danger_level,
        "habitat": "Unknown depths",
        "category": category,
        "status": "Active",
    })
}

/// Add Yog-Sothoth (100, Outer God), Shub-Niggurath (85, Outer God) and
/// Deep Ones (40, Race), in that order.
pub async fn seed_three(app: &Router) {
    for body in [
        creature_json("Yog-Sothoth", "Outer God", 100),
        creature_json("Shub-Niggurath", "Outer God", 85),
        creature_json("Deep Ones", "Race", 40),
    ] {
        let response = post_json(app.clone(), "/bestiary/add", body).await;
        assert!(response.status().is_success());
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn with_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    with_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    with_json(app, Method::PUT, uri, body).await
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
