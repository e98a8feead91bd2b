//! Orchestrates a user action: validate, call the store, then merge.
//!
//! The local state only changes after the store confirmed the call. A
//! rejected call leaves [`DashboardState`] exactly as it was.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{
    Observation, ObservationDraft, Project, ProjectPatch, ValidationError, Visit, VisitPatch,
};
use crate::store::{ProjectStore, StoreError, VisitStore};
use crate::view::form::{parse_hours, ProjectForm, VisitForm};
use crate::view::state::{reduce, Action, DashboardState};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0} is not in the dashboard")]
    NotFound(&'static str),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// A single user's view of the dashboard
pub struct Session {
    projects: Arc<dyn ProjectStore>,
    visits: Arc<dyn VisitStore>,
    state: DashboardState,
}

impl Session {
    /// Load both collections; a collection that fails to load starts empty
    pub async fn load(projects: Arc<dyn ProjectStore>, visits: Arc<dyn VisitStore>) -> Self {
        let loaded_projects = match projects.list_projects().await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load projects, starting with none");
                Vec::new()
            }
        };

        let loaded_visits = match visits.list_visits().await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load visits, starting with none");
                Vec::new()
            }
        };

        let state = reduce(
            DashboardState::default(),
            Action::Loaded {
                projects: loaded_projects,
                visits: loaded_visits,
            },
        );

        Self {
            projects,
            visits,
            state,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    fn project(&self, id: Uuid) -> SessionResult<&Project> {
        self.state.project(id).ok_or(SessionError::NotFound("Project"))
    }

    fn visit(&self, id: Uuid) -> SessionResult<&Visit> {
        self.state.visit(id).ok_or(SessionError::NotFound("Visit"))
    }

    // ============ Projects ============

    pub async fn create_project(&mut self, form: &ProjectForm) -> SessionResult<Uuid> {
        let draft = form.to_draft()?;
        let id = self.projects.create_project(&draft).await?;

        let project = Project::new(id, draft, time::OffsetDateTime::now_utc())?;
        tracing::info!(project_id = %id, "Project created");
        self.dispatch(Action::ProjectCreated(project));
        Ok(id)
    }

    /// Add worked hours on top of the executed total
    pub async fn log_hours(&mut self, id: Uuid, raw_hours: &str) -> SessionResult<()> {
        let hours = parse_hours(raw_hours)?;
        let current = self.project(id)?;
        let patch = ProjectPatch::executed_hours(current.executed_hours() + hours);

        self.apply_project_patch(id, patch).await
    }

    pub async fn update_project(&mut self, id: Uuid, form: &ProjectForm) -> SessionResult<()> {
        let patch = form.to_patch()?;
        self.apply_project_patch(id, patch).await
    }

    pub async fn finish_project(&mut self, id: Uuid) -> SessionResult<()> {
        self.apply_project_patch(id, ProjectPatch::finished(true)).await
    }

    async fn apply_project_patch(&mut self, id: Uuid, patch: ProjectPatch) -> SessionResult<()> {
        let next = self.project(id)?.patched(&patch)?;
        self.projects.update_project(id, &patch).await?;

        self.dispatch(Action::ProjectUpdated(next));
        Ok(())
    }

    /// Hide a project; succeeds again for an already hidden one
    pub async fn delete_project(&mut self, id: Uuid) -> SessionResult<()> {
        self.projects.delete_project(id).await?;

        tracing::info!(project_id = %id, "Project deleted");
        self.dispatch(Action::ProjectRemoved(id));
        Ok(())
    }

    pub async fn add_observation(&mut self, id: Uuid, text: &str) -> SessionResult<Uuid> {
        let draft = ObservationDraft::new(text.trim());
        draft.validate()?;
        self.project(id)?;

        let observation_id = self.projects.append_observation(id, &draft).await?;

        self.dispatch(Action::ObservationAdded {
            project_id: id,
            observation: Observation {
                id: observation_id,
                text: draft.text,
                created_at: time::OffsetDateTime::now_utc(),
            },
        });
        Ok(observation_id)
    }

    // ============ Visits ============

    pub async fn create_visit(&mut self, form: &VisitForm) -> SessionResult<Uuid> {
        let draft = form.to_draft()?;
        let id = self.visits.create_visit(&draft).await?;

        let visit = Visit::new(id, draft, time::OffsetDateTime::now_utc())?;
        tracing::info!(visit_id = %id, "Visit created");
        self.dispatch(Action::VisitCreated(visit));
        Ok(id)
    }

    pub async fn update_visit(&mut self, id: Uuid, form: &VisitForm) -> SessionResult<()> {
        let patch = form.to_patch()?;
        self.apply_visit_patch(id, patch).await
    }

    pub async fn toggle_visit_finished(&mut self, id: Uuid) -> SessionResult<()> {
        let finished = !self.visit(id)?.finished();
        self.apply_visit_patch(id, VisitPatch::finished(finished)).await
    }

    async fn apply_visit_patch(&mut self, id: Uuid, patch: VisitPatch) -> SessionResult<()> {
        let next = self.visit(id)?.patched(&patch)?;
        self.visits.update_visit(id, &patch).await?;

        self.dispatch(Action::VisitUpdated(next));
        Ok(())
    }

    pub async fn delete_visit(&mut self, id: Uuid) -> SessionResult<()> {
        self.visits.delete_visit(id).await?;

        tracing::info!(visit_id = %id, "Visit deleted");
        self.dispatch(Action::VisitRemoved(id));
        Ok(())
    }
}
