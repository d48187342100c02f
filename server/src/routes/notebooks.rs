//! Notebook CRUD routes.
//!
//! Ids in the path are parsed here; anything that is not a UUID cannot name a
//! notebook and gets the same 404 as an unknown id.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::routes::response::{ApiError, ApiResponse};
use crate::services::notebook::{self, NewNotebook, Notebook, NotebookError, NotebookPatch};
use crate::state::AppState;

const NOT_FOUND_MESSAGE: &str = "notebook not found";

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(NOT_FOUND_MESSAGE))
}

/// `GET /api/notebooks`: every notebook the user owns, newest first.
pub async fn list_notebooks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<Notebook>>, ApiError> {
    let rows = notebook::list_notebooks(&state.pool, auth.user.id)
        .await
        .map_err(notebook_error_to_api)?;
    Ok(ApiResponse::ok("notebooks loaded", rows))
}

/// `POST /api/notebooks`: create a note or sketch.
pub async fn create_notebook(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<NewNotebook>, JsonRejection>,
) -> Result<ApiResponse<Notebook>, ApiError> {
    let Json(body) = body?;
    let created = notebook::create_notebook(&state.pool, auth.user.id, body)
        .await
        .map_err(notebook_error_to_api)?;

    tracing::info!(notebook_id = %created.id, kind = created.kind.as_str(), "notebook created");
    Ok(ApiResponse::created("notebook created", created))
}

/// `GET /api/notebooks/:id`
pub async fn get_notebook(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<Notebook>, ApiError> {
    let id = parse_id(&id)?;
    let row = notebook::get_notebook(&state.pool, auth.user.id, id)
        .await
        .map_err(notebook_error_to_api)?;
    Ok(ApiResponse::ok("notebook loaded", row))
}

/// `PUT /api/notebooks/:id`: partial update.
pub async fn update_notebook(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<NotebookPatch>, JsonRejection>,
) -> Result<ApiResponse<Notebook>, ApiError> {
    let id = parse_id(&id)?;
    let Json(patch) = body?;
    let updated = notebook::update_notebook(&state.pool, auth.user.id, id, patch)
        .await
        .map_err(notebook_error_to_api)?;
    Ok(ApiResponse::ok("notebook updated", updated))
}

/// `DELETE /api/notebooks/:id`
pub async fn delete_notebook(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let id = parse_id(&id)?;
    notebook::delete_notebook(&state.pool, auth.user.id, id)
        .await
        .map_err(notebook_error_to_api)?;

    tracing::info!(notebook_id = %id, "notebook deleted");
    Ok(ApiResponse::ok("notebook deleted", ()))
}

pub(crate) fn notebook_error_to_api(err: NotebookError) -> ApiError {
    match err {
        NotebookError::NotFound(_) => ApiError::not_found(NOT_FOUND_MESSAGE),
        NotebookError::Forbidden(_) => ApiError::new(StatusCode::FORBIDDEN, "you do not have access to this notebook"),
        NotebookError::Database(e) => {
            tracing::error!(error = %e, "notebook query failed");
            ApiError::internal()
        }
    }
}

#[cfg(test)]
#[path = "notebooks_test.rs"]
mod tests;
