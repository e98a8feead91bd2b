use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{
    Observation, ObservationDraft, Project, ProjectDraft, ProjectPatch, ValidationError, Visit,
    VisitDraft, VisitPatch,
};
use crate::store::{ProjectStore, StoreError, StoreResult, VisitStore};

/// In-process store for tests and offline demos
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<Mutex<InMemoryStoreInner>>,
}

struct InMemoryStoreInner {
    // Newest first
    projects: Vec<Project>,
    visits: Vec<Visit>,
    unavailable: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(InMemoryStoreInner {
                projects: Vec::new(),
                visits: Vec::new(),
                unavailable: false,
            })),
        }
    }

    /// Make every call fail as if the server were down
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().await.unavailable = unavailable;
    }

    /// Stored project by id, hidden or not
    pub async fn project(&self, id: Uuid) -> Option<Project> {
        let inner = self.inner.lock().await;
        inner.projects.iter().find(|p| p.id == id).cloned()
    }

    /// Stored visit by id, active or not
    pub async fn visit(&self, id: Uuid) -> Option<Visit> {
        let inner = self.inner.lock().await;
        inner.visits.iter().find(|v| v.id == id).cloned()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStoreInner {
    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable {
            return Err(StoreError::Transport("store unavailable".to_string()));
        }
        Ok(())
    }

    fn project_mut(&mut self, id: Uuid) -> StoreResult<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("Project"))
    }

    fn visit_mut(&mut self, id: Uuid) -> StoreResult<&mut Visit> {
        self.visits
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found("Visit"))
    }
}

// Same messages the server puts in its error bodies
fn not_found(resource: &str) -> StoreError {
    StoreError::Rejected(format!("Not found: {}", resource))
}

fn invalid(err: ValidationError) -> StoreError {
    StoreError::Rejected(format!("Validation error: {}", err))
}

#[async_trait]
impl ProjectStore for InMemoryStore {
    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let inner = self.inner.lock().await;
        inner.check_available()?;

        Ok(inner.projects.iter().filter(|p| p.visible).cloned().collect())
    }

    async fn create_project(&self, draft: &ProjectDraft) -> StoreResult<Uuid> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;

        let project = Project::new(Uuid::new_v4(), draft.clone(), time::OffsetDateTime::now_utc())
            .map_err(invalid)?;
        let id = project.id;
        inner.projects.insert(0, project);
        Ok(id)
    }

    async fn update_project(&self, id: Uuid, patch: &ProjectPatch) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;

        let project = inner.project_mut(id)?;
        *project = project.patched(patch).map_err(invalid)?;
        Ok(())
    }

    async fn delete_project(&self, id: Uuid) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;

        inner.project_mut(id)?.visible = false;
        Ok(())
    }

    async fn append_observation(&self, id: Uuid, draft: &ObservationDraft) -> StoreResult<Uuid> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;

        draft.validate().map_err(invalid)?;
        let observation = Observation {
            id: Uuid::new_v4(),
            text: draft.text.trim().to_string(),
            created_at: time::OffsetDateTime::now_utc(),
        };
        let observation_id = observation.id;
        inner.project_mut(id)?.observations.push(observation);
        Ok(observation_id)
    }
}

#[async_trait]
impl VisitStore for InMemoryStore {
    async fn list_visits(&self) -> StoreResult<Vec<Visit>> {
        let inner = self.inner.lock().await;
        inner.check_available()?;

        Ok(inner.visits.iter().filter(|v| v.active).cloned().collect())
    }

    async fn create_visit(&self, draft: &VisitDraft) -> StoreResult<Uuid> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;

        let visit = Visit::new(Uuid::new_v4(), draft.clone(), time::OffsetDateTime::now_utc())
            .map_err(invalid)?;
        let id = visit.id;
        inner.visits.insert(0, visit);
        Ok(id)
    }

    async fn update_visit(&self, id: Uuid, patch: &VisitPatch) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;

        let visit = inner.visit_mut(id)?;
        *visit = visit.patched(patch).map_err(invalid)?;
        Ok(())
    }

    async fn delete_visit(&self, id: Uuid) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;

        inner.visit_mut(id)?.active = false;
        Ok(())
    }
}
