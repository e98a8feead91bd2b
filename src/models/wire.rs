//! JSON shapes exchanged with the persistence endpoints.
//!
//! Field names follow the stored schema (`nombre`, `horas_planificadas`, ...);
//! every conversion between these records and the canonical entities lives
//! here or in the entity modules' `TryFrom` impls.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Observation, Project, ProjectStatus, Visit};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ObservationRecord {
    pub id: Uuid,
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "fecha", with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectRecord {
    pub id: Uuid,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(rename = "consultor", default)]
    pub consultant: String,
    #[serde(default)]
    pub pm: String,
    #[serde(rename = "pais", default)]
    pub country: String,
    #[serde(rename = "numero_oportunidad", default)]
    pub opportunity_number: Option<String>,
    #[serde(rename = "monto_oportunidad", default)]
    pub opportunity_value: Option<f64>,
    #[serde(rename = "horas_planificadas")]
    pub planned_hours: f64,
    #[serde(rename = "horas_ejecutadas", default)]
    pub executed_hours: f64,
    #[serde(rename = "tarifa_hora")]
    pub hourly_rate: f64,
    #[serde(rename = "fecha_inicio")]
    #[schema(value_type = String, format = Date)]
    pub start_date: Date,
    #[serde(rename = "fecha_fin")]
    #[schema(value_type = String, format = Date)]
    pub end_date: Date,
    #[serde(rename = "fecha_creacion", with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
    /// Completion marker
    #[serde(rename = "terminado", default)]
    pub finished: bool,
    /// Soft-delete marker
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(rename = "observaciones", default)]
    pub observations: Vec<ObservationRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VisitRecord {
    pub id: Uuid,
    #[serde(rename = "producto")]
    pub product: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(rename = "numero_oportunidad", default)]
    pub opportunity_number: Option<String>,
    #[serde(rename = "pais", default)]
    pub country: String,
    #[serde(rename = "consultor", default)]
    pub consultant: String,
    #[serde(rename = "hora")]
    pub hours: f64,
    #[serde(rename = "fecha")]
    #[schema(value_type = String, format = Date)]
    pub date: Date,
    #[serde(rename = "monto_oportunidad")]
    pub opportunity_value: f64,
    #[serde(rename = "terminado", default)]
    pub finished: bool,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "fecha_creacion", with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: OffsetDateTime,
}

fn default_true() -> bool {
    true
}

/// Patch field where a present `null` means "clear" and a missing key means
/// "leave untouched"; pair it with `#[serde(default)]`
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Operation selector of a request envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestMethod {
    GetAll,
    Create,
    Update,
    Delete,
    AddObservation,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetAll => "GET_ALL",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::AddObservation => "ADD_OBSERVATION",
        }
    }
}

/// Body of `POST /api/projects`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub method: RequestMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    /// `ProjectDraft`, `ProjectPatch` or `ObservationDraft` depending on `method`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub project_data: Option<serde_json::Value>,
}

/// Body of `POST /api/visits`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitRequest {
    pub method: RequestMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_id: Option<Uuid>,
    /// `VisitDraft` or `VisitPatch` depending on `method`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub visit_data: Option<serde_json::Value>,
}

impl ProjectRequest {
    pub fn new(method: RequestMethod) -> Self {
        Self {
            method,
            project_id: None,
            project_data: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.project_id = Some(id);
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.project_data = Some(data);
        self
    }
}

impl VisitRequest {
    pub fn new(method: RequestMethod) -> Self {
        Self {
            method,
            visit_id: None,
            visit_data: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.visit_id = Some(id);
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.visit_data = Some(data);
        self
    }
}

/// Success acknowledgement; `id` is set when something was created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ack {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            success: true,
            id: None,
        }
    }

    pub fn created(id: Uuid) -> Self {
        Self {
            success: true,
            id: Some(id),
        }
    }
}

impl From<Observation> for ObservationRecord {
    fn from(o: Observation) -> Self {
        Self {
            id: o.id,
            text: o.text,
            created_at: o.created_at,
        }
    }
}

impl From<Project> for ProjectRecord {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            planned_hours: p.planned_hours(),
            executed_hours: p.executed_hours(),
            hourly_rate: p.hourly_rate(),
            start_date: p.start_date(),
            end_date: p.end_date(),
            finished: p.status == ProjectStatus::Completed,
            visible: p.visible,
            name: p.name,
            description: p.description,
            client_name: p.client_name,
            consultant: p.consultant,
            pm: p.pm,
            country: p.country,
            opportunity_number: p.opportunity_number,
            opportunity_value: p.opportunity_value,
            created_at: p.created_at,
            observations: p.observations.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Visit> for VisitRecord {
    fn from(v: Visit) -> Self {
        Self {
            id: v.id,
            hours: v.hours(),
            opportunity_value: v.opportunity_value(),
            finished: v.finished(),
            product: v.product,
            client_name: v.client_name,
            opportunity_number: v.opportunity_number,
            country: v.country,
            consultant: v.consultant,
            date: v.date,
            active: v.active,
            created_at: v.created_at,
        }
    }
}
