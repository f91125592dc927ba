//! Tests for router wiring.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::{AppState, routes};
use crate::db::{Database, SqliteDatabase};

async fn test_app(enable_docs: bool) -> axum::Router {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.init_schema().await.unwrap();
    routes::create_router(AppState::new(db), enable_docs)
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn health_returns_ok() {
    let app = test_app(false).await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "ok"}));
}

#[tokio::test(flavor = "multi_thread")]
async fn trailing_slash_paths_are_routed() {
    let app = test_app(false).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/todos/")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({
                        "id": 4,
                        "todo": "Sweep",
                        "priority": "LOW",
                        "status": "TO DO",
                        "category": "HOME",
                        "dueDate": "2023-05-01"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for uri in ["/todos/", "/todos/4/", "/agenda/?date=2023-05-01"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn non_numeric_todo_id_is_rejected() {
    let app = test_app(false).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/todos/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn docs_are_only_served_when_enabled() {
    let disabled = test_app(false).await;
    let response = disabled
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let enabled = test_app(true).await;
    let response = enabled
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn openapi_lists_every_endpoint() {
    use utoipa::OpenApi;

    let doc = routes::ApiDoc::openapi();
    let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
    for expected in ["/health", "/todos", "/todos/{todoId}", "/agenda"] {
        assert!(paths.contains(&expected), "missing {} in {:?}", expected, paths);
    }
}
