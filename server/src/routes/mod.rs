//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! All JSON endpoints live under `/api`, matching the base URL the web client
//! is configured with. `/healthz` sits outside it for load balancers.

pub mod auth;
pub mod dashboard;
pub mod notebooks;
pub mod response;

use axum::Router;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::routes::response::ApiError;
use crate::state::AppState;

/// API routes, relative to `/api`.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/notebooks", get(notebooks::list_notebooks).post(notebooks::create_notebook))
        .route(
            "/notebooks/{id}",
            get(notebooks::get_notebook)
                .put(notebooks::update_notebook)
                .delete(notebooks::delete_notebook),
        )
        .fallback(api_not_found)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = match config.cors_allow_origin.as_deref() {
        None => AllowOrigin::any(),
        Some(raw) => match HeaderValue::from_str(raw) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                tracing::warn!(error = %e, origin = raw, "invalid CORS_ALLOW_ORIGIN; allowing any origin");
                AllowOrigin::any()
            }
        },
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .nest("/api", api_routes())
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn api_not_found() -> ApiError {
    ApiError::not_found("route not found")
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
