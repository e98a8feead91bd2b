use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::visit::{self, ActiveModel, Column, Entity as VisitEntity};
use crate::error::{AppError, AppResult};
use crate::models::{Visit, VisitDraft, VisitPatch, VisitRecord};
use crate::repositories::Repository;

/// Visit repository for database operations
pub struct VisitRepository;

#[async_trait]
impl Repository<Visit> for VisitRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Visit> {
        let model = VisitEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Visit".to_string()))?;

        to_domain(model)
    }

    async fn list_active(db: &DatabaseConnection) -> AppResult<Vec<Visit>> {
        let models = VisitEntity::find()
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await?;

        models.into_iter().map(to_domain).collect()
    }

    async fn soft_delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let model = VisitEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Visit".to_string()))?;

        if !model.active {
            return Ok(());
        }

        let mut active: ActiveModel = model.into();
        active.active = Set(false);
        active.updated_at = Set(time::OffsetDateTime::now_utc());
        active.update(db).await?;

        Ok(())
    }
}

impl VisitRepository {
    /// Log a new visit
    pub async fn create(db: &DatabaseConnection, input: &VisitDraft) -> AppResult<Visit> {
        let visit = Visit::new(Uuid::new_v4(), input.clone(), time::OffsetDateTime::now_utc())?;

        active_model(&visit).insert(db).await?;
        Ok(visit)
    }

    pub async fn update(db: &DatabaseConnection, id: Uuid, input: &VisitPatch) -> AppResult<Visit> {
        let current = Self::find_by_id(db, id).await?;
        let next = current.patched(input)?;

        active_model(&next).update(db).await?;
        Ok(next)
    }
}

fn active_model(visit: &Visit) -> ActiveModel {
    ActiveModel {
        id: Set(visit.id),
        product: Set(visit.product.clone()),
        client_name: Set(visit.client_name.clone()),
        opportunity_number: Set(visit.opportunity_number.clone()),
        country: Set(visit.country.clone()),
        consultant: Set(visit.consultant.clone()),
        hours: Set(visit.hours()),
        visit_date: Set(visit.date),
        opportunity_value: Set(visit.opportunity_value()),
        finished: Set(visit.finished()),
        active: Set(visit.active),
        created_at: Set(visit.created_at),
        updated_at: Set(time::OffsetDateTime::now_utc()),
    }
}

fn to_domain(model: visit::Model) -> AppResult<Visit> {
    let id = model.id;
    Visit::try_from(VisitRecord::from(model))
        .map_err(|e| AppError::Internal(format!("Stored visit {} is invalid: {}", id, e)))
}

// Conversion from SeaORM model to the wire record
impl From<visit::Model> for VisitRecord {
    fn from(m: visit::Model) -> Self {
        Self {
            id: m.id,
            product: m.product,
            client_name: m.client_name,
            opportunity_number: m.opportunity_number,
            country: m.country,
            consultant: m.consultant,
            hours: m.hours,
            date: m.visit_date,
            opportunity_value: m.opportunity_value,
            finished: m.finished,
            active: m.active,
            created_at: m.created_at,
        }
    }
}
