pub mod project;
pub mod visit;

pub use project::ProjectRepository;
pub use visit::VisitRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::AppResult;

/// Base repository trait shared by the soft-deletable collections
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Find entity by ID, hidden or not
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<T>;

    /// List entities that have not been soft-deleted, newest first
    async fn list_active(db: &DatabaseConnection) -> AppResult<Vec<T>>;

    /// Hide entity from listings; repeating the call is a no-op
    async fn soft_delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()>;
}
