//! Client side of the persistence endpoints.
//!
//! The view layer talks to storage only through [`ProjectStore`] and
//! [`VisitStore`]. [`HttpStore`] issues one request per call against the
//! server; [`InMemoryStore`] keeps the same semantics in process.

pub mod http;
pub mod memory;

pub use http::HttpStore;
pub use memory::InMemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{ObservationDraft, Project, ProjectDraft, ProjectPatch, Visit, VisitDraft, VisitPatch};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The store answered with an error status
    #[error("{0}")]
    Rejected(String),

    #[error("Store unreachable: {0}")]
    Transport(String),

    #[error("Unexpected store response: {0}")]
    Decode(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Remote collection of projects
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Visible projects, newest first
    async fn list_projects(&self) -> StoreResult<Vec<Project>>;

    /// Create a project and return the id the store assigned
    async fn create_project(&self, draft: &ProjectDraft) -> StoreResult<Uuid>;

    async fn update_project(&self, id: Uuid, patch: &ProjectPatch) -> StoreResult<()>;

    /// Hide a project; repeating the call succeeds
    async fn delete_project(&self, id: Uuid) -> StoreResult<()>;

    /// Append an observation and return its id
    async fn append_observation(&self, id: Uuid, draft: &ObservationDraft) -> StoreResult<Uuid>;
}

/// Remote collection of visits
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Active visits, newest first
    async fn list_visits(&self) -> StoreResult<Vec<Visit>>;

    async fn create_visit(&self, draft: &VisitDraft) -> StoreResult<Uuid>;

    async fn update_visit(&self, id: Uuid, patch: &VisitPatch) -> StoreResult<()>;

    /// Deactivate a visit; repeating the call succeeds
    async fn delete_visit(&self, id: Uuid) -> StoreResult<()>;
}
