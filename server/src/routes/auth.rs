//! Auth routes: registration, login, and the bearer-token extractor.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::routes::response::{ApiError, ApiResponse};
use crate::services::account::{self, Account, AccountError};
use crate::services::session;
use crate::state::AppState;

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The scheme is case-insensitive. A token wrapped in double quotes (as
/// written by clients that JSON-encode it into storage) is unwrapped.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim().trim_matches('"');
    if token.is_empty() {
        return None;
    }
    Some(token.to_owned())
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the bearer token.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: Account,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(ApiError::unauthorized)?;

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, &token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session lookup failed");
                ApiError::internal()
            })?
            .ok_or_else(ApiError::unauthorized)?;

        Ok(Self { user })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub access_token: String,
    pub user: Account,
}

/// `POST /api/auth/register`: create an account.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<ApiResponse<Account>, ApiError> {
    let Json(body) = body?;
    let new = account::validate_registration(&body.name, &body.email, &body.password, body.confirm_password.as_deref())
        .map_err(account_error_to_api)?;

    let created = account::register(&state.pool, &new)
        .await
        .map_err(account_error_to_api)?;

    tracing::info!(user_id = %created.id, "account registered");
    Ok(ApiResponse::created("registration successful", created))
}

/// `POST /api/auth/login`: check credentials and issue a bearer token.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<ApiResponse<LoginData>, ApiError> {
    let Json(body) = body?;
    let user = account::authenticate(&state.pool, &body.email, &body.password)
        .await
        .map_err(account_error_to_api)?;

    let access_token = session::create_session(&state.pool, user.id, state.config.session_ttl_days)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id, "session creation failed");
            ApiError::internal()
        })?;

    tracing::info!(user_id = %user.id, "signed in");
    Ok(ApiResponse::ok("login successful", LoginData { access_token, user }))
}

pub(crate) fn account_error_to_api(err: AccountError) -> ApiError {
    match err {
        AccountError::Invalid(msg) => ApiError::bad_request(msg),
        AccountError::EmailTaken => ApiError::new(StatusCode::CONFLICT, err.to_string()),
        AccountError::BadCredentials => ApiError::new(StatusCode::UNAUTHORIZED, err.to_string()),
        AccountError::Database(e) => {
            tracing::error!(error = %e, "account query failed");
            ApiError::internal()
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
