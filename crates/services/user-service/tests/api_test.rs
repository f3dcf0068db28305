//! HTTP tests for the user endpoints.
//!
//! The router runs over an in-memory table, so these cover routing,
//! authentication, status codes and body shapes without a database.

mod support;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

use domain::User;
use user_service_lib::service::UserService;

use support::{router, router_with_docs_base, ADMIN_AUTH};

// =============================================================================
// Helpers
// =============================================================================

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn authed(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, ADMIN_AUTH);

    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

async fn create(app: &Router, username: &str, email: &str, age: i32) -> User {
    let request = authed(
        "POST",
        "/atmail/users",
        Some(json!({ "username": username, "email": email, "age": age })),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_missing_credentials_are_challenged() {
    let (_, app) = router();

    let request = Request::builder()
        .uri("/atmail/users")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Basic realm=\"Authorization Required\""
    );
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "error": "authentication failed" }));
}

#[tokio::test]
async fn test_wrong_credentials_are_rejected() {
    let (_, app) = router();

    // admin:wrong
    let request = Request::builder()
        .uri("/atmail/users")
        .header(header::AUTHORIZATION, "Basic YWRtaW46d3Jvbmc=")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "incorrect username or password" }));
}

#[tokio::test]
async fn test_root_is_public() {
    let (_, app) = router();

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": "Hello world..." }));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (_, app) = router();

    let request = Request::builder()
        .uri("/atmail/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/users/{id}"].is_object());
    assert_eq!(body["servers"][0]["url"], "/atmail");
}

#[tokio::test]
async fn test_swagger_ui_is_served_under_prefix() {
    let (_, app) = router();

    let request = Request::builder()
        .uri("/atmail/swagger")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert!(response.status().is_redirection());
    let location = response.headers().get(header::LOCATION).unwrap();
    assert_eq!(location, "/atmail/swagger/");

    let request = Request::builder()
        .uri("/atmail/swagger/swagger-initializer.js")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let script = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(script.contains("\"/atmail/api-docs/openapi.json\""));
}

#[tokio::test]
async fn test_docs_base_path_does_not_move_routes() {
    let (_, app) = router_with_docs_base("/v2/docs");

    let (status, body) = send(&app, authed("GET", "/atmail/users", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let response = app
        .clone()
        .oneshot(authed("GET", "/v2/docs/users", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = Request::builder()
        .uri("/atmail/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["servers"][0]["url"], "/v2/docs");
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_returns_201_with_id() {
    let (_, app) = router();

    let user = create(&app, "jane", "jane@example.com", 30).await;

    assert_ne!(user.id, 0);
    assert_eq!(user.username, "jane");
    assert_eq!(user.email, "jane@example.com");
    assert_eq!(user.age, 30);
}

#[tokio::test]
async fn test_create_invalid_email() {
    let (_, app) = router();

    let request = authed(
        "POST",
        "/atmail/users",
        Some(json!({ "username": "jane", "email": "not-an-email", "age": 30 })),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "invalid email" }));
}

#[tokio::test]
async fn test_create_missing_email_is_required() {
    let (_, app) = router();

    let request = authed(
        "POST",
        "/atmail/users",
        Some(json!({ "username": "jane", "age": 30 })),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "email is required" }));
}

#[tokio::test]
async fn test_create_duplicate_email() {
    let (service, app) = router();
    create(&app, "jane", "jane@example.com", 30).await;

    let request = authed(
        "POST",
        "/atmail/users",
        Some(json!({ "username": "other", "email": "jane@example.com", "age": 30 })),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "email already exists" }));
    assert_eq!(service.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_malformed_json() {
    let (_, app) = router();

    let request = Request::builder()
        .method("POST")
        .uri("/atmail/users")
        .header(header::AUTHORIZATION, ADMIN_AUTH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"username\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn test_get_by_id() {
    let (_, app) = router();
    let created = create(&app, "jane", "jane@example.com", 30).await;

    let request = authed("GET", &format!("/atmail/users/{}", created.id), None);
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let fetched: User = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_non_numeric_id() {
    let (_, app) = router();

    let (status, body) = send(&app, authed("GET", "/atmail/users/abc", None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "invalid ID" }));
}

#[tokio::test]
async fn test_get_missing_user() {
    let (_, app) = router();

    let (status, body) = send(&app, authed("GET", "/atmail/users/999", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "user not found" }));
}

#[tokio::test]
async fn test_list_users() {
    let (_, app) = router();

    let (status, body) = send(&app, authed("GET", "/atmail/users", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    create(&app, "jane", "jane@example.com", 30).await;
    create(&app, "john", "john@example.com", 41).await;

    let (status, body) = send(&app, authed("GET", "/atmail/users", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_uses_path_id() {
    let (_, app) = router();
    let created = create(&app, "jane", "jane@example.com", 30).await;

    let request = authed(
        "PUT",
        &format!("/atmail/users/{}", created.id),
        Some(json!({
            "id": created.id + 100,
            "username": "jane_doe",
            "email": "jane@example.com",
            "age": 31
        })),
    );
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: User = json_body(response.into_body()).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.username, "jane_doe");
    assert_eq!(updated.age, 31);
}

#[tokio::test]
async fn test_update_missing_user() {
    let (_, app) = router();

    let request = authed(
        "PUT",
        "/atmail/users/999",
        Some(json!({ "username": "ghost", "email": "ghost@example.com", "age": 20 })),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "no record found" }));
}

#[tokio::test]
async fn test_update_invalid_age() {
    let (_, app) = router();
    let created = create(&app, "jane", "jane@example.com", 30).await;

    let request = authed(
        "PUT",
        &format!("/atmail/users/{}", created.id),
        Some(json!({ "username": "jane", "email": "jane@example.com", "age": 100 })),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "invalid age" }));
}

#[tokio::test]
async fn test_update_bad_id_wins_over_bad_body() {
    let (_, app) = router();

    let request = Request::builder()
        .method("PUT")
        .uri("/atmail/users/x1")
        .header(header::AUTHORIZATION, ADMIN_AUTH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "invalid ID" }));
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_get() {
    let (_, app) = router();
    let created = create(&app, "jane", "jane@example.com", 30).await;
    let uri = format!("/atmail/users/{}", created.id);

    let (status, body) = send(&app, authed("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Successfully deleted"));

    let (status, body) = send(&app, authed("GET", &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "user not found" }));
}

#[tokio::test]
async fn test_delete_missing_user() {
    let (_, app) = router();

    let (status, body) = send(&app, authed("DELETE", "/atmail/users/7", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "no record found" }));
}
