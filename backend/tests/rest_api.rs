//! REST surface tests: health, login and admin user management

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

use tourbook::build_app;

use common::{register, test_state};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_healthz() {
    let app = build_app(test_state().await);

    let response = app.oneshot(get("/healthz", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readyz_reports_complete_schema() {
    let app = build_app(test_state().await);

    let response = app.oneshot(get("/readyz", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "ready": true, "database": true, "missingTables": [] })
    );
}

#[tokio::test]
async fn test_users_without_token_is_unauthorized() {
    let app = build_app(test_state().await);

    let response = app.oneshot(get("/api/users", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_users_as_regular_user_is_forbidden() {
    let state = test_state().await;
    register(&state, "admin").await;
    let token = register(&state, "walker").await;
    let app = build_app(state);

    let response = app.oneshot(get("/api/users", Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_users_as_admin_lists_page() {
    let state = test_state().await;
    let token = register(&state, "admin").await;
    register(&state, "walker").await;
    let app = build_app(state);

    let response = app
        .oneshot(get("/api/users?number=1&size=1", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["total"], json!(2));
    assert_eq!(body["pagination"]["nextPage"], json!(2));
}

#[tokio::test]
async fn test_users_accepts_query_token() {
    let state = test_state().await;
    let token = register(&state, "admin").await;
    let app = build_app(state);

    let response = app
        .oneshot(get(&format!("/api/users?token={}", token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_with_missing_fields_is_bad_request() {
    let app = build_app(test_state().await);

    let response = app
        .oneshot(post_json("/api/auth/login", json!({ "email": "admin@example.com" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        json!("One or more of the required parameters was missing.")
    );
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let state = test_state().await;
    register(&state, "admin").await;
    let app = build_app(state);

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": "admin@example.com", "password": "wrong password" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], json!("Login failed"));
}

#[tokio::test]
async fn test_login_returns_tokens_and_user() {
    let state = test_state().await;
    register(&state, "admin").await;
    let app = build_app(state);

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": "admin@example.com", "password": "correct horse" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["refreshToken"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["username"], json!("admin"));
}

#[tokio::test]
async fn test_graphql_get_without_html_is_rejected() {
    let app = build_app(test_state().await);

    let response = app.oneshot(get("/graphql", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_graphql_post_attaches_bearer_user() {
    let state = test_state().await;
    let token = register(&state, "admin").await;
    let app = build_app(state);

    let request = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(json!({ "query": "{ me { username } }" }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["me"]["username"], json!("admin"));
}
