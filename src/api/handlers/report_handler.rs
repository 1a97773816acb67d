//! Reporting handlers - thin read-only views over the repository.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::RoleCount;
use crate::errors::AppResult;

/// Create report routes
pub fn report_routes() -> Router<AppState> {
    Router::new().route("/roles", get(role_summary))
}

/// Employee counts grouped by role
#[utoipa::path(
    get,
    path = "/reports/roles",
    tag = "Reports",
    responses(
        (status = 200, description = "Employees per role", body = [RoleCount])
    )
)]
pub async fn role_summary(State(state): State<AppState>) -> AppResult<Json<Vec<RoleCount>>> {
    let counts = state.employee_service.role_summary().await?;
    Ok(Json(counts))
}
