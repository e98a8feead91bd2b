pub mod common;
pub mod dashboard;
pub mod project;
pub mod visit;

pub use common::{parse_data, read_envelope, require_id, unsupported};
pub use dashboard::{get_dashboard, DashboardResponse};
pub use project::{handle_projects, ProjectResponse};
pub use visit::{handle_visits, VisitResponse};
