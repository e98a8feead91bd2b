use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::common::{parse_data, read_envelope, require_id, unsupported};
use crate::models::{Ack, RequestMethod, VisitDraft, VisitPatch, VisitRecord, VisitRequest};
use crate::repositories::{Repository, VisitRepository};
use crate::state::AppState;

/// Either the visit list (`GET_ALL`) or an acknowledgement
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum VisitResponse {
    List(Vec<VisitRecord>),
    Ack(Ack),
}

/// Dispatch a visit request envelope
#[utoipa::path(
    post,
    path = "/api/visits",
    request_body = VisitRequest,
    responses(
        (status = 200, description = "Active visits or acknowledgement", body = VisitResponse),
        (status = 400, description = "Malformed envelope, validation error or unsupported method"),
        (status = 404, description = "Visit not found"),
        (status = 500, description = "Database error")
    ),
    tag = "Visits"
)]
pub async fn handle_visits(
    State(state): State<AppState>,
    payload: Result<Json<VisitRequest>, JsonRejection>,
) -> AppResult<Json<VisitResponse>> {
    let request = read_envelope(payload)?;

    let response = match request.method {
        RequestMethod::GetAll => {
            let visits = VisitRepository::list_active(&state.db).await?;
            VisitResponse::List(visits.into_iter().map(VisitRecord::from).collect())
        }
        RequestMethod::Create => {
            let draft: VisitDraft = parse_data(request.visit_data, "visitData")?;
            let visit = VisitRepository::create(&state.db, &draft).await?;

            tracing::info!(visit_id = %visit.id, product = %visit.product, "Visit created");
            VisitResponse::Ack(Ack::created(visit.id))
        }
        RequestMethod::Update => {
            let id = require_id(request.visit_id, "visitId")?;
            let patch: VisitPatch = parse_data(request.visit_data, "visitData")?;
            let visit = VisitRepository::update(&state.db, id, &patch).await?;

            tracing::info!(visit_id = %id, finished = visit.finished(), "Visit updated");
            VisitResponse::Ack(Ack::ok())
        }
        RequestMethod::Delete => {
            let id = require_id(request.visit_id, "visitId")?;
            VisitRepository::soft_delete(&state.db, id).await?;

            tracing::info!(visit_id = %id, "Visit deactivated");
            VisitResponse::Ack(Ack::ok())
        }
        method @ RequestMethod::AddObservation => return Err(unsupported(method, "visits")),
    };

    Ok(Json(response))
}
