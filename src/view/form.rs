//! Raw form input to validated drafts and patches.
//!
//! Every field arrives as the string the user typed. Parsing never touches
//! the store, so a rejected form costs no network call.

use time::macros::format_description;
use time::Date;

use crate::models::{
    Project, ProjectDraft, ProjectPatch, ValidationError, Visit, VisitDraft, VisitPatch,
};

/// Parse an hour amount; it must be a positive finite number
pub fn parse_hours(raw: &str) -> Result<f64, ValidationError> {
    parse_positive("hours", raw)
}

fn parse_positive(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required(field));
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(ValidationError::NotPositive(field)),
    }
}

fn parse_optional_positive(field: &'static str, raw: &str) -> Result<Option<f64>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_positive(field, raw).map(Some)
}

fn parse_date(field: &'static str, raw: &str) -> Result<Date, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required(field));
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate(field))
}

fn optional_text(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

/// Create/edit form of a project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub client_name: String,
    pub consultant: String,
    pub pm: String,
    pub country: String,
    pub opportunity_number: String,
    pub opportunity_value: String,
    pub planned_hours: String,
    pub hourly_rate: String,
    pub start_date: String,
    pub end_date: String,
}

impl ProjectForm {
    /// Prefill the edit form with a project's current values
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            client_name: project.client_name.clone(),
            consultant: project.consultant.clone(),
            pm: project.pm.clone(),
            country: project.country.clone(),
            opportunity_number: project.opportunity_number.clone().unwrap_or_default(),
            opportunity_value: project
                .opportunity_value
                .map(|v| v.to_string())
                .unwrap_or_default(),
            planned_hours: project.planned_hours().to_string(),
            hourly_rate: project.hourly_rate().to_string(),
            start_date: format_date(project.start_date()),
            end_date: format_date(project.end_date()),
        }
    }

    pub fn to_draft(&self) -> Result<ProjectDraft, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }

        let draft = ProjectDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            client_name: self.client_name.trim().to_string(),
            consultant: self.consultant.trim().to_string(),
            pm: self.pm.trim().to_string(),
            country: self.country.trim().to_string(),
            opportunity_number: optional_text(&self.opportunity_number),
            opportunity_value: parse_optional_positive("opportunity value", &self.opportunity_value)?,
            planned_hours: parse_positive("planned hours", &self.planned_hours)?,
            hourly_rate: parse_positive("hourly rate", &self.hourly_rate)?,
            start_date: parse_date("start date", &self.start_date)?,
            end_date: parse_date("end date", &self.end_date)?,
        };

        draft.validate()?;
        Ok(draft)
    }

    /// Full edit: every field is sent, executed hours and status untouched.
    /// A blank optional field clears the stored value.
    pub fn to_patch(&self) -> Result<ProjectPatch, ValidationError> {
        let draft = self.to_draft()?;

        Ok(ProjectPatch {
            name: Some(draft.name),
            description: Some(draft.description),
            client_name: Some(draft.client_name),
            consultant: Some(draft.consultant),
            pm: Some(draft.pm),
            country: Some(draft.country),
            opportunity_number: Some(draft.opportunity_number),
            opportunity_value: Some(draft.opportunity_value),
            planned_hours: Some(draft.planned_hours),
            hourly_rate: Some(draft.hourly_rate),
            start_date: Some(draft.start_date),
            end_date: Some(draft.end_date),
            ..Default::default()
        })
    }
}

/// Create/edit form of a commercial visit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitForm {
    pub product: String,
    pub client_name: String,
    pub opportunity_number: String,
    pub country: String,
    pub consultant: String,
    pub hours: String,
    pub date: String,
    pub opportunity_value: String,
}

impl VisitForm {
    pub fn from_visit(visit: &Visit) -> Self {
        Self {
            product: visit.product.clone(),
            client_name: visit.client_name.clone(),
            opportunity_number: visit.opportunity_number.clone().unwrap_or_default(),
            country: visit.country.clone(),
            consultant: visit.consultant.clone(),
            hours: visit.hours().to_string(),
            date: format_date(visit.date),
            opportunity_value: visit.opportunity_value().to_string(),
        }
    }

    pub fn to_draft(&self) -> Result<VisitDraft, ValidationError> {
        if self.product.trim().is_empty() {
            return Err(ValidationError::Required("product"));
        }

        let draft = VisitDraft {
            product: self.product.trim().to_string(),
            client_name: self.client_name.trim().to_string(),
            opportunity_number: optional_text(&self.opportunity_number),
            country: self.country.trim().to_string(),
            consultant: self.consultant.trim().to_string(),
            hours: parse_positive("hours", &self.hours)?,
            opportunity_value: parse_positive("opportunity value", &self.opportunity_value)?,
            date: parse_date("date", &self.date)?,
        };

        draft.validate()?;
        Ok(draft)
    }

    pub fn to_patch(&self) -> Result<VisitPatch, ValidationError> {
        let draft = self.to_draft()?;

        Ok(VisitPatch {
            product: Some(draft.product),
            client_name: Some(draft.client_name),
            opportunity_number: Some(draft.opportunity_number),
            country: Some(draft.country),
            consultant: Some(draft.consultant),
            hours: Some(draft.hours),
            date: Some(draft.date),
            opportunity_value: Some(draft.opportunity_value),
            finished: None,
        })
    }
}
