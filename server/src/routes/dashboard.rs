//! Dashboard route.

use axum::extract::State;
use serde::Serialize;

use crate::routes::auth::AuthUser;
use crate::routes::notebooks::notebook_error_to_api;
use crate::routes::response::{ApiError, ApiResponse};
use crate::services::account::Account;
use crate::services::notebook::{self, NotebookSummary, RECENT_LIMIT, Totals};
use crate::state::AppState;

#[derive(Serialize)]
pub struct DashboardData {
    pub user: Account,
    pub totals: Totals,
    pub recent: Vec<NotebookSummary>,
}

/// `GET /api/dashboard`: the signed-in user, per-kind counts, and recent work.
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<ApiResponse<DashboardData>, ApiError> {
    let totals = notebook::totals(&state.pool, auth.user.id)
        .await
        .map_err(notebook_error_to_api)?;
    let recent = notebook::recent(&state.pool, auth.user.id, RECENT_LIMIT)
        .await
        .map_err(notebook_error_to_api)?;

    Ok(ApiResponse::ok("dashboard loaded", DashboardData { user: auth.user, totals, recent }))
}
