mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{Factory, TestApp};
use hourglow::handlers::DashboardResponse;
use hourglow::services::ProgressStatus;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.server.get("/").await;

    response.assert_status(StatusCode::OK);
    response.assert_text("Hello, Hourglow!");
}

#[tokio::test]
async fn test_dashboard_lists_active_projects() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project = factory.create_project_with_hours(85.0).await;
    factory.create_visit().await;

    let response = app.server.get("/api/dashboard").await;

    response.assert_status(StatusCode::OK);

    let body: DashboardResponse = response.json();
    let metrics = body
        .projects
        .iter()
        .find(|m| m.id == project.id)
        .expect("active project has metrics");

    // 120 planned hours at rate 50, window 2025-01-01..2025-03-15 already over
    assert_eq!(metrics.status, ProgressStatus::Overdue);
    assert_eq!(metrics.budget.executed_cost, 4250.0);
    assert_eq!(metrics.budget.planned_cost, 6000.0);
    assert!(!metrics.budget.over_budget);

    assert!(body.totals.total_projects >= 1);
    assert!(body.totals.total_executed_hours >= 85.0);
    assert!(body.totals.total_visits >= 1);
}

#[tokio::test]
async fn test_dashboard_skips_finished_and_deleted_projects() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let finished = factory.create_project().await;
    let deleted = factory.create_project().await;

    app.server
        .post("/api/projects")
        .json(&json!({
            "method": "UPDATE",
            "projectId": finished.id,
            "projectData": { "terminado": true }
        }))
        .await
        .assert_status(StatusCode::OK);
    app.server
        .post("/api/projects")
        .json(&json!({ "method": "DELETE", "projectId": deleted.id }))
        .await
        .assert_status(StatusCode::OK);

    let body: DashboardResponse = app.server.get("/api/dashboard").await.json();

    assert!(body.projects.iter().all(|m| m.id != finished.id));
    assert!(body.projects.iter().all(|m| m.id != deleted.id));
}
