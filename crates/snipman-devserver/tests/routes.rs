//! Route-level tests driven through `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use snipman_devserver::{AppState, SnippetStore, router};

fn app() -> Router {
    router(AppState::new(SnippetStore::new()))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_is_outside_the_api_prefix() {
    let (status, body) = call(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn create_returns_201_and_list_contains_it() {
    let app = app();
    let (status, created) = call(
        &app,
        "POST",
        "/api/v1/snippets",
        Some(json!({ "title": "Test", "content": "Hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "1");
    assert!(created["creationDate"].is_string());
    assert_eq!(created["tags"], json!([]));

    let (status, list) = call(&app, "GET", "/api/v1/snippets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn blank_fields_are_a_400_with_message() {
    let (status, body) = call(
        &app(),
        "POST",
        "/api/v1/snippets",
        Some(json!({ "title": " ", "content": "Hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Title cannot be empty.");
}

#[tokio::test]
async fn missing_snippet_is_404() {
    let (status, body) = call(&app(), "GET", "/api/v1/snippets/missing-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "snippet not found: missing-id");
}

#[tokio::test]
async fn delete_is_204_then_404() {
    let app = app();
    call(
        &app,
        "POST",
        "/api/v1/snippets",
        Some(json!({ "title": "A", "content": "a" })),
    )
    .await;

    let (status, _) = call(&app, "DELETE", "/api/v1/snippets/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, "DELETE", "/api/v1/snippets/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tag_association_round_trip() {
    let app = app();
    call(
        &app,
        "POST",
        "/api/v1/snippets",
        Some(json!({ "title": "A", "content": "a" })),
    )
    .await;
    let (status, tag) = call(&app, "POST", "/api/v1/tags", Some(json!({ "name": "rust" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/v1/snippets/1/tags/{}", tag["id"].as_str().unwrap());
    let (status, tagged) = call(&app, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tagged["tags"][0]["name"], "rust");

    let (status, untagged) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(untagged["tags"], json!([]));
}

#[tokio::test]
async fn tag_rename_get_and_delete() {
    let app = app();
    let (_, rust) = call(&app, "POST", "/api/v1/tags", Some(json!({ "name": "Rust  Tips" }))).await;
    assert_eq!(rust["name"], "rust tips");
    call(&app, "POST", "/api/v1/tags", Some(json!({ "name": "go" }))).await;
    let uri = format!("/api/v1/tags/{}", rust["id"].as_str().unwrap());

    let (status, renamed) = call(&app, "PUT", &uri, Some(json!({ "name": " Rust " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "rust");

    let (status, _) = call(&app, "PUT", &uri, Some(json!({ "name": "GO" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, fetched) = call(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "rust");

    let (status, _) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "PUT", &uri, Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
