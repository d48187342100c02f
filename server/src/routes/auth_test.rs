use super::*;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderValue, Method, Request};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::state::test_helpers::test_app_state;

fn headers_with(auth: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
    headers
}

async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    let response = crate::routes::app(test_app_state()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// bearer_token
// =============================================================================

#[test]
fn bearer_token_plain() {
    assert_eq!(bearer_token(&headers_with("Bearer abc123")).as_deref(), Some("abc123"));
}

#[test]
fn bearer_token_scheme_case_insensitive() {
    assert_eq!(bearer_token(&headers_with("bearer abc123")).as_deref(), Some("abc123"));
}

#[test]
fn bearer_token_strips_json_quotes() {
    assert_eq!(bearer_token(&headers_with("Bearer \"abc123\"")).as_deref(), Some("abc123"));
}

#[test]
fn bearer_token_missing_header() {
    assert_eq!(bearer_token(&HeaderMap::new()), None);
}

#[test]
fn bearer_token_rejects_other_schemes_and_blanks() {
    for raw in ["Basic abc123", "Bearer", "Bearer   ", "Bearer \"\"", "abc123"] {
        assert_eq!(bearer_token(&headers_with(raw)), None, "expected None for {raw:?}");
    }
}

// =============================================================================
// account_error_to_api
// =============================================================================

#[test]
fn account_errors_map_to_statuses() {
    assert_eq!(account_error_to_api(AccountError::Invalid("name is required")).status, StatusCode::BAD_REQUEST);
    assert_eq!(account_error_to_api(AccountError::EmailTaken).status, StatusCode::CONFLICT);
    assert_eq!(account_error_to_api(AccountError::BadCredentials).status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        account_error_to_api(AccountError::Database(sqlx::Error::PoolTimedOut)).status,
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn invalid_message_passes_through() {
    let err = account_error_to_api(AccountError::Invalid("passwords do not match"));
    assert_eq!(err.message, "passwords do not match");
}

// =============================================================================
// Handlers: paths that reject before touching the database
// =============================================================================

#[tokio::test]
async fn register_rejects_short_password() {
    let (status, body) = post_json(
        "/api/auth/register",
        &json!({ "name": "Ada", "email": "ada@example.com", "password": "123" }).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "password must be at least 6 characters");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn register_rejects_mismatched_confirmation() {
    let (status, body) = post_json(
        "/api/auth/register",
        &json!({ "name": "Ada", "email": "ada@example.com", "password": "secret", "confirmPassword": "other" })
            .to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "passwords do not match");
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let (status, body) = post_json("/api/auth/register", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "name is required");
}

#[tokio::test]
async fn register_rejects_malformed_json() {
    let (status, body) = post_json("/api/auth/register", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn login_rejects_malformed_email() {
    let (status, body) = post_json("/api/auth/login", &json!({ "email": "nope", "password": "secret" }).to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid email or password");
}

#[tokio::test]
async fn login_rejects_empty_password() {
    let (status, _) = post_json("/api/auth/login", &json!({ "email": "ada@example.com" }).to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
