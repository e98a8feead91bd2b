use time::macros::date;
use uuid::Uuid;

use hourglow::models::{Project, ProjectDraft, ProjectPatch, Visit, VisitDraft};
use hourglow::repositories::{ProjectRepository, VisitRepository};
use hourglow::state::AppState;

/// Valid project draft with a unique name
pub fn project_draft() -> ProjectDraft {
    ProjectDraft {
        name: format!("Test Project {}", Uuid::new_v4()),
        description: "Test project description".to_string(),
        client_name: "TechCorp S.A.".to_string(),
        consultant: "Ana García".to_string(),
        pm: "Carlos Ruiz".to_string(),
        country: "Chile".to_string(),
        opportunity_number: Some("OP-1001".to_string()),
        opportunity_value: Some(45000.0),
        planned_hours: 120.0,
        hourly_rate: 50.0,
        start_date: date!(2025 - 01 - 01),
        end_date: date!(2025 - 03 - 15),
    }
}

/// Valid visit draft with a unique product
pub fn visit_draft() -> VisitDraft {
    VisitDraft {
        product: format!("Test Product {}", Uuid::new_v4()),
        client_name: "Retail Plus".to_string(),
        opportunity_number: Some("OP-2002".to_string()),
        country: "Colombia".to_string(),
        consultant: "Jorge López".to_string(),
        hours: 2.5,
        date: date!(2025 - 02 - 10),
        opportunity_value: 18000.0,
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test project
    pub async fn create_project(&self) -> Project {
        ProjectRepository::create(&self.state.db, &project_draft())
            .await
            .unwrap()
    }

    /// Create a test project with executed hours already logged
    pub async fn create_project_with_hours(&self, executed: f64) -> Project {
        let project = self.create_project().await;

        ProjectRepository::update(
            &self.state.db,
            project.id,
            &ProjectPatch::executed_hours(executed),
        )
        .await
        .unwrap()
    }

    /// Create a test visit
    pub async fn create_visit(&self) -> Visit {
        VisitRepository::create(&self.state.db, &visit_draft())
            .await
            .unwrap()
    }
}
