use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::repositories::{ProjectRepository, Repository, VisitRepository};
use crate::services::{aggregate, project_metrics, DashboardTotals, ProjectMetrics};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub totals: DashboardTotals,
    /// Metrics for every active project, newest first
    pub projects: Vec<ProjectMetrics>,
}

/// Server-side KPIs at the current instant
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard totals and per-project metrics", body = DashboardResponse),
        (status = 500, description = "Database error")
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardResponse>> {
    let now = time::OffsetDateTime::now_utc();

    let projects = ProjectRepository::list_active(&state.db).await?;
    let visits = VisitRepository::list_active(&state.db).await?;

    let active: Vec<_> = projects.iter().filter(|p| p.is_active()).collect();

    Ok(Json(DashboardResponse {
        totals: aggregate(active.iter().copied(), &visits),
        projects: active.iter().map(|p| project_metrics(p, now)).collect(),
    }))
}
