use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::validation::{require_positive, require_text, ValidationError};
use crate::models::wire::{nullable, VisitRecord};

/// A logged commercial interaction.
///
/// Hours, value and the finished flag only change through [`Visit::patched`],
/// which keeps both amounts positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub id: Uuid,
    pub product: String,
    pub client_name: String,
    pub opportunity_number: Option<String>,
    pub country: String,
    pub consultant: String,
    hours: f64,
    pub date: Date,
    opportunity_value: f64,
    finished: bool,
    /// Soft-delete marker; inactive visits are never listed
    pub active: bool,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VisitDraft {
    #[serde(rename = "producto")]
    pub product: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(
        rename = "numero_oportunidad",
        default,
        skip_serializing_if = "Option::is_none"
    )]
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
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VisitPatch {
    #[serde(rename = "producto", default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    /// `Some(None)` (`null` on the wire) clears the field
    #[serde(
        rename = "numero_oportunidad",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub opportunity_number: Option<Option<String>>,
    #[serde(rename = "pais", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "consultor", default, skip_serializing_if = "Option::is_none")]
    pub consultant: Option<String>,
    #[serde(rename = "hora", default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<Date>,
    #[serde(
        rename = "monto_oportunidad",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub opportunity_value: Option<f64>,
    #[serde(rename = "terminado", default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<bool>,
}

impl VisitDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("product", &self.product)?;
        require_positive("hours", self.hours)?;
        require_positive("opportunity value", self.opportunity_value)
    }
}

impl VisitPatch {
    pub fn finished(finished: bool) -> Self {
        Self {
            finished: Some(finished),
            ..Default::default()
        }
    }
}

impl Visit {
    pub fn new(
        id: Uuid,
        draft: VisitDraft,
        created_at: OffsetDateTime,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;

        Ok(Self {
            id,
            product: draft.product.trim().to_string(),
            client_name: draft.client_name.trim().to_string(),
            opportunity_number: draft.opportunity_number,
            country: draft.country.trim().to_string(),
            consultant: draft.consultant.trim().to_string(),
            hours: draft.hours,
            date: draft.date,
            opportunity_value: draft.opportunity_value,
            finished: false,
            active: true,
            created_at,
        })
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn opportunity_value(&self) -> f64 {
        self.opportunity_value
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn patched(&self, patch: &VisitPatch) -> Result<Self, ValidationError> {
        let mut next = self.clone();

        if let Some(product) = &patch.product {
            next.product = product.trim().to_string();
        }
        if let Some(client_name) = &patch.client_name {
            next.client_name = client_name.trim().to_string();
        }
        if let Some(number) = &patch.opportunity_number {
            next.opportunity_number = number.clone();
        }
        if let Some(country) = &patch.country {
            next.country = country.trim().to_string();
        }
        if let Some(consultant) = &patch.consultant {
            next.consultant = consultant.trim().to_string();
        }
        if let Some(hours) = patch.hours {
            next.hours = hours;
        }
        if let Some(date) = patch.date {
            next.date = date;
        }
        if let Some(value) = patch.opportunity_value {
            next.opportunity_value = value;
        }
        if let Some(finished) = patch.finished {
            next.finished = finished;
        }

        next.check_invariants()?;
        Ok(next)
    }

    fn check_invariants(&self) -> Result<(), ValidationError> {
        require_text("product", &self.product)?;
        require_positive("hours", self.hours)?;
        require_positive("opportunity value", self.opportunity_value)
    }
}

impl TryFrom<VisitRecord> for Visit {
    type Error = ValidationError;

    fn try_from(record: VisitRecord) -> Result<Self, Self::Error> {
        let visit = Self {
            id: record.id,
            product: record.product,
            client_name: record.client_name,
            opportunity_number: record.opportunity_number,
            country: record.country,
            consultant: record.consultant,
            hours: record.hours,
            date: record.date,
            opportunity_value: record.opportunity_value,
            finished: record.finished,
            active: record.active,
            created_at: record.created_at,
        };

        visit.check_invariants()?;
        Ok(visit)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use time::macros::{date, datetime};

    pub(crate) fn draft() -> VisitDraft {
        VisitDraft {
            product: "Cloud backup".to_string(),
            client_name: "Retail Plus".to_string(),
            opportunity_number: Some("OP-2002".to_string()),
            country: "Colombia".to_string(),
            consultant: "Jorge López".to_string(),
            hours: 2.5,
            date: date!(2025 - 02 - 10),
            opportunity_value: 18000.0,
        }
    }

    pub(crate) fn visit() -> Visit {
        Visit::new(Uuid::new_v4(), draft(), datetime!(2025-02-10 15:00 UTC)).unwrap()
    }

    #[test]
    fn test_new_visit_is_active_and_open() {
        let visit = visit();
        assert!(visit.active);
        assert!(!visit.finished());
        assert_eq!(visit.product, "Cloud backup");
    }

    #[test]
    fn test_new_visit_requires_product() {
        let mut input = draft();
        input.product = " ".to_string();

        let result = Visit::new(Uuid::new_v4(), input, datetime!(2025-02-10 15:00 UTC));
        assert_eq!(result, Err(ValidationError::Required("product")));
    }

    #[test]
    fn test_new_visit_rejects_non_positive_value() {
        let mut input = draft();
        input.opportunity_value = 0.0;
        assert_eq!(
            input.validate(),
            Err(ValidationError::NotPositive("opportunity value"))
        );
    }

    #[test]
    fn test_toggle_finished() {
        let visit = visit();
        let finished = visit.patched(&VisitPatch::finished(true)).unwrap();
        assert!(finished.finished());
        assert!(finished.active);
    }

    #[test]
    fn test_patch_rejects_negative_hours() {
        let patch = VisitPatch {
            hours: Some(-1.0),
            ..Default::default()
        };
        assert!(visit().patched(&patch).is_err());
    }

    #[test]
    fn test_patch_clears_opportunity_number() {
        let patch = VisitPatch {
            opportunity_number: Some(None),
            ..Default::default()
        };
        let cleared = visit().patched(&patch).unwrap();
        assert_eq!(cleared.opportunity_number, None);

        let untouched = visit().patched(&VisitPatch::default()).unwrap();
        assert_eq!(untouched.opportunity_number.as_deref(), Some("OP-2002"));
    }
}
