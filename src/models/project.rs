use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::validation::{
    require_date_order, require_non_negative, require_positive, require_text, ValidationError,
};
use crate::models::wire::{nullable, ObservationRecord, ProjectRecord};

/// Lifecycle marker, independent from visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Timestamped note attached to a project
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: Uuid,
    pub text: String,
    pub created_at: OffsetDateTime,
}

/// A tracked unit of consulting work.
///
/// Hours, rate and dates are private so every instance has gone through
/// [`Project::new`], [`Project::patched`] or the record conversion, all of
/// which reject `planned_hours <= 0` and inverted date ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub client_name: String,
    pub consultant: String,
    pub pm: String,
    pub country: String,
    pub opportunity_number: Option<String>,
    pub opportunity_value: Option<f64>,
    planned_hours: f64,
    executed_hours: f64,
    hourly_rate: f64,
    start_date: Date,
    end_date: Date,
    pub status: ProjectStatus,
    pub visible: bool,
    pub observations: Vec<Observation>,
    pub created_at: OffsetDateTime,
}

/// Fields needed to create a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectDraft {
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
    #[serde(
        rename = "numero_oportunidad",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub opportunity_number: Option<String>,
    #[serde(
        rename = "monto_oportunidad",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub opportunity_value: Option<f64>,
    #[serde(rename = "horas_planificadas")]
    pub planned_hours: f64,
    #[serde(rename = "tarifa_hora")]
    pub hourly_rate: f64,
    #[serde(rename = "fecha_inicio")]
    #[schema(value_type = String, format = Date)]
    pub start_date: Date,
    #[serde(rename = "fecha_fin")]
    #[schema(value_type = String, format = Date)]
    pub end_date: Date,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectPatch {
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(rename = "consultor", default, skip_serializing_if = "Option::is_none")]
    pub consultant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm: Option<String>,
    #[serde(rename = "pais", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// `Some(None)` (`null` on the wire) clears the field
    #[serde(
        rename = "numero_oportunidad",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub opportunity_number: Option<Option<String>>,
    #[serde(
        rename = "monto_oportunidad",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<f64>)]
    pub opportunity_value: Option<Option<f64>>,
    #[serde(
        rename = "horas_planificadas",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub planned_hours: Option<f64>,
    #[serde(
        rename = "horas_ejecutadas",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub executed_hours: Option<f64>,
    #[serde(rename = "tarifa_hora", default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(rename = "fecha_inicio", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<Date>,
    #[serde(rename = "fecha_fin", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<Date>,
    #[serde(rename = "terminado", default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<bool>,
}

/// Payload of ADD_OBSERVATION
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ObservationDraft {
    #[serde(rename = "texto")]
    pub text: String,
}

impl ProjectDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_positive("planned hours", self.planned_hours)?;
        require_positive("hourly rate", self.hourly_rate)?;
        if let Some(value) = self.opportunity_value {
            require_positive("opportunity value", value)?;
        }
        require_date_order(self.start_date, self.end_date)
    }
}

impl ObservationDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("observation", &self.text)
    }
}

impl ProjectPatch {
    /// Patch that only sets executed hours
    pub fn executed_hours(hours: f64) -> Self {
        Self {
            executed_hours: Some(hours),
            ..Default::default()
        }
    }

    /// Patch that sets the completion flag
    pub fn finished(finished: bool) -> Self {
        Self {
            finished: Some(finished),
            ..Default::default()
        }
    }
}

impl Project {
    /// Create a fresh project from a draft; executed hours start at zero
    pub fn new(
        id: Uuid,
        draft: ProjectDraft,
        created_at: OffsetDateTime,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;

        Ok(Self {
            id,
            name: draft.name.trim().to_string(),
            description: draft.description.trim().to_string(),
            client_name: draft.client_name.trim().to_string(),
            consultant: draft.consultant.trim().to_string(),
            pm: draft.pm.trim().to_string(),
            country: draft.country.trim().to_string(),
            opportunity_number: draft.opportunity_number,
            opportunity_value: draft.opportunity_value,
            planned_hours: draft.planned_hours,
            executed_hours: 0.0,
            hourly_rate: draft.hourly_rate,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: ProjectStatus::Active,
            visible: true,
            observations: Vec::new(),
            created_at,
        })
    }

    pub fn planned_hours(&self) -> f64 {
        self.planned_hours
    }

    pub fn executed_hours(&self) -> f64 {
        self.executed_hours
    }

    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    pub fn start_date(&self) -> Date {
        self.start_date
    }

    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Shown in the active view and counted in the totals
    pub fn is_active(&self) -> bool {
        self.visible && self.status == ProjectStatus::Active
    }

    /// Copy of this project with the patch applied, if the result is valid
    pub fn patched(&self, patch: &ProjectPatch) -> Result<Self, ValidationError> {
        let mut next = self.clone();

        if let Some(name) = &patch.name {
            next.name = name.trim().to_string();
        }
        if let Some(description) = &patch.description {
            next.description = description.trim().to_string();
        }
        if let Some(client_name) = &patch.client_name {
            next.client_name = client_name.trim().to_string();
        }
        if let Some(consultant) = &patch.consultant {
            next.consultant = consultant.trim().to_string();
        }
        if let Some(pm) = &patch.pm {
            next.pm = pm.trim().to_string();
        }
        if let Some(country) = &patch.country {
            next.country = country.trim().to_string();
        }
        if let Some(number) = &patch.opportunity_number {
            next.opportunity_number = number.clone();
        }
        if let Some(value) = patch.opportunity_value {
            next.opportunity_value = value;
        }
        if let Some(hours) = patch.planned_hours {
            next.planned_hours = hours;
        }
        if let Some(hours) = patch.executed_hours {
            next.executed_hours = hours;
        }
        if let Some(rate) = patch.hourly_rate {
            next.hourly_rate = rate;
        }
        if let Some(start) = patch.start_date {
            next.start_date = start;
        }
        if let Some(end) = patch.end_date {
            next.end_date = end;
        }
        if let Some(finished) = patch.finished {
            next.status = if finished {
                ProjectStatus::Completed
            } else {
                ProjectStatus::Active
            };
        }

        next.check_invariants()?;
        Ok(next)
    }

    fn check_invariants(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_positive("planned hours", self.planned_hours)?;
        require_non_negative("executed hours", self.executed_hours)?;
        require_positive("hourly rate", self.hourly_rate)?;
        if let Some(value) = self.opportunity_value {
            require_positive("opportunity value", value)?;
        }
        require_date_order(self.start_date, self.end_date)
    }
}

impl From<ObservationRecord> for Observation {
    fn from(record: ObservationRecord) -> Self {
        Self {
            id: record.id,
            text: record.text,
            created_at: record.created_at,
        }
    }
}

/// Stored and received records pass the same checks as new projects
impl TryFrom<ProjectRecord> for Project {
    type Error = ValidationError;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        let mut observations: Vec<Observation> =
            record.observations.into_iter().map(Observation::from).collect();
        observations.sort_by_key(|o| o.created_at);

        let project = Self {
            id: record.id,
            name: record.name,
            description: record.description,
            client_name: record.client_name,
            consultant: record.consultant,
            pm: record.pm,
            country: record.country,
            opportunity_number: record.opportunity_number,
            opportunity_value: record.opportunity_value,
            planned_hours: record.planned_hours,
            executed_hours: record.executed_hours,
            hourly_rate: record.hourly_rate,
            start_date: record.start_date,
            end_date: record.end_date,
            status: if record.finished {
                ProjectStatus::Completed
            } else {
                ProjectStatus::Active
            },
            visible: record.visible,
            observations,
            created_at: record.created_at,
        };

        project.check_invariants()?;
        Ok(project)
    }
}
