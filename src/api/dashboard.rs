//! Dashboard endpoint

use axum::{extract::State, Json};

use super::today;
use crate::{error::AppResult, rules::DashboardCounts, AppState};

/// Equipment, team and request totals plus the overdue count
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard counts", body = DashboardCounts)
    )
)]
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardCounts>> {
    let counts = state.services.dashboard.counts(today()).await?;
    Ok(Json(counts))
}
