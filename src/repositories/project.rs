use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::observation::{
    self, ActiveModel as ObservationActiveModel, Column as ObservationColumn,
    Entity as ObservationEntity,
};
use crate::entity::project::{self, ActiveModel, Column, Entity as ProjectEntity};
use crate::error::{AppError, AppResult};
use crate::models::{
    Observation, ObservationDraft, ObservationRecord, Project, ProjectDraft, ProjectPatch,
    ProjectRecord, ProjectStatus,
};
use crate::repositories::Repository;

/// Project repository for database operations
pub struct ProjectRepository;

#[async_trait]
impl Repository<Project> for ProjectRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        let observations = model
            .find_related(ObservationEntity)
            .order_by_asc(ObservationColumn::CreatedAt)
            .all(db)
            .await?;

        to_domain(model, observations)
    }

    async fn list_active(db: &DatabaseConnection) -> AppResult<Vec<Project>> {
        // Secondary order on id keeps each project's joined rows together
        let rows = ProjectEntity::find()
            .filter(Column::Visible.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .find_with_related(ObservationEntity)
            .all(db)
            .await?;

        rows.into_iter()
            .map(|(model, observations)| to_domain(model, observations))
            .collect()
    }

    async fn soft_delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        if !model.visible {
            return Ok(());
        }

        let mut active: ActiveModel = model.into();
        active.visible = Set(false);
        active.updated_at = Set(time::OffsetDateTime::now_utc());
        active.update(db).await?;

        Ok(())
    }
}

impl ProjectRepository {
    /// Create a new project; the store assigns the id
    pub async fn create(db: &DatabaseConnection, input: &ProjectDraft) -> AppResult<Project> {
        let project = Project::new(Uuid::new_v4(), input.clone(), time::OffsetDateTime::now_utc())?;

        active_model(&project).insert(db).await?;
        Ok(project)
    }

    /// Apply a partial update after validating the merged project
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: &ProjectPatch,
    ) -> AppResult<Project> {
        let current = Self::find_by_id(db, id).await?;
        let next = current.patched(input)?;

        active_model(&next).update(db).await?;
        Ok(next)
    }

    /// Append an observation to a project
    pub async fn add_observation(
        db: &DatabaseConnection,
        project_id: Uuid,
        input: &ObservationDraft,
    ) -> AppResult<Observation> {
        input.validate()?;

        ProjectEntity::find_by_id(project_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        let model = ObservationActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project_id),
            text: Set(input.text.trim().to_string()),
            created_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;
        Ok(Observation::from(ObservationRecord::from(result)))
    }
}

fn active_model(project: &Project) -> ActiveModel {
    ActiveModel {
        id: Set(project.id),
        name: Set(project.name.clone()),
        description: Set(project.description.clone()),
        client_name: Set(project.client_name.clone()),
        consultant: Set(project.consultant.clone()),
        pm: Set(project.pm.clone()),
        country: Set(project.country.clone()),
        opportunity_number: Set(project.opportunity_number.clone()),
        opportunity_value: Set(project.opportunity_value),
        planned_hours: Set(project.planned_hours()),
        executed_hours: Set(project.executed_hours()),
        hourly_rate: Set(project.hourly_rate()),
        start_date: Set(project.start_date()),
        end_date: Set(project.end_date()),
        completed: Set(project.status == ProjectStatus::Completed),
        visible: Set(project.visible),
        created_at: Set(project.created_at),
        updated_at: Set(time::OffsetDateTime::now_utc()),
    }
}

fn to_domain(model: project::Model, observations: Vec<observation::Model>) -> AppResult<Project> {
    let id = model.id;
    Project::try_from(ProjectRecord::from((model, observations)))
        .map_err(|e| AppError::Internal(format!("Stored project {} is invalid: {}", id, e)))
}

// Conversion from SeaORM models to the wire record
impl From<observation::Model> for ObservationRecord {
    fn from(m: observation::Model) -> Self {
        Self {
            id: m.id,
            text: m.text,
            created_at: m.created_at,
        }
    }
}

impl From<(project::Model, Vec<observation::Model>)> for ProjectRecord {
    fn from((m, observations): (project::Model, Vec<observation::Model>)) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            client_name: m.client_name,
            consultant: m.consultant,
            pm: m.pm,
            country: m.country,
            opportunity_number: m.opportunity_number,
            opportunity_value: m.opportunity_value,
            planned_hours: m.planned_hours,
            executed_hours: m.executed_hours,
            hourly_rate: m.hourly_rate,
            start_date: m.start_date,
            end_date: m.end_date,
            created_at: m.created_at,
            finished: m.completed,
            visible: m.visible,
            observations: observations.into_iter().map(Into::into).collect(),
        }
    }
}
