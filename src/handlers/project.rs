use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::common::{parse_data, read_envelope, require_id};
use crate::models::{
    Ack, ObservationDraft, ProjectDraft, ProjectPatch, ProjectRecord, ProjectRequest,
    RequestMethod,
};
use crate::repositories::{ProjectRepository, Repository};
use crate::state::AppState;

// ============ Response DTOs ============

/// Either the project list (`GET_ALL`) or an acknowledgement
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ProjectResponse {
    List(Vec<ProjectRecord>),
    Ack(Ack),
}

// ============ Handlers ============

/// Dispatch a project request envelope
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Visible projects or acknowledgement", body = ProjectResponse),
        (status = 400, description = "Malformed envelope or validation error"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Database error")
    ),
    tag = "Projects"
)]
pub async fn handle_projects(
    State(state): State<AppState>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> AppResult<Json<ProjectResponse>> {
    let request = read_envelope(payload)?;

    let response = match request.method {
        RequestMethod::GetAll => {
            let projects = ProjectRepository::list_active(&state.db).await?;
            ProjectResponse::List(projects.into_iter().map(ProjectRecord::from).collect())
        }
        RequestMethod::Create => {
            let draft: ProjectDraft = parse_data(request.project_data, "projectData")?;
            let project = ProjectRepository::create(&state.db, &draft).await?;

            tracing::info!(project_id = %project.id, name = %project.name, "Project created");
            ProjectResponse::Ack(Ack::created(project.id))
        }
        RequestMethod::Update => {
            let id = require_id(request.project_id, "projectId")?;
            let patch: ProjectPatch = parse_data(request.project_data, "projectData")?;
            let project = ProjectRepository::update(&state.db, id, &patch).await?;

            tracing::info!(
                project_id = %id,
                executed_hours = project.executed_hours(),
                status = project.status.as_str(),
                "Project updated"
            );
            ProjectResponse::Ack(Ack::ok())
        }
        RequestMethod::Delete => {
            let id = require_id(request.project_id, "projectId")?;
            ProjectRepository::soft_delete(&state.db, id).await?;

            tracing::info!(project_id = %id, "Project hidden");
            ProjectResponse::Ack(Ack::ok())
        }
        RequestMethod::AddObservation => {
            let id = require_id(request.project_id, "projectId")?;
            let draft: ObservationDraft = parse_data(request.project_data, "projectData")?;
            let observation = ProjectRepository::add_observation(&state.db, id, &draft).await?;

            tracing::info!(project_id = %id, observation_id = %observation.id, "Observation added");
            ProjectResponse::Ack(Ack::created(observation.id))
        }
    };

    Ok(Json(response))
}

