mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{Factory, TestApp};
use hourglow::repositories::{ProjectRepository, Repository};

/// Fetch the visible projects through GET_ALL
async fn list_projects(app: &TestApp) -> Vec<Value> {
    let response = app
        .server
        .post("/api/projects")
        .json(&json!({ "method": "GET_ALL" }))
        .await;

    response.assert_status(StatusCode::OK);
    response.json::<Vec<Value>>()
}

fn find(list: &[Value], id: Uuid) -> Option<&Value> {
    list.iter().find(|p| p["id"] == id.to_string())
}

#[tokio::test]
async fn test_create_project() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "method": "CREATE",
            "projectData": {
                "nombre": "Corporate website",
                "descripcion": "Full site with admin panel",
                "client_name": "TechCorp S.A.",
                "consultor": "Ana García",
                "pm": "Carlos Ruiz",
                "pais": "Chile",
                "horas_planificadas": 120.0,
                "tarifa_hora": 50.0,
                "fecha_inicio": "2025-01-01",
                "fecha_fin": "2025-03-15"
            }
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    let projects = list_projects(&app).await;
    let project = find(&projects, id).expect("created project is listed");
    assert_eq!(project["nombre"], "Corporate website");
    assert_eq!(project["horas_ejecutadas"], 0.0);
    assert_eq!(project["fecha_inicio"], "2025-01-01");
    assert_eq!(project["terminado"], false);
    assert_eq!(project["visible"], true);
    assert_eq!(project["observaciones"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_project_with_zero_planned_hours() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "method": "CREATE",
            "projectData": {
                "nombre": "Broken",
                "horas_planificadas": 0.0,
                "tarifa_hora": 50.0,
                "fecha_inicio": "2025-01-01",
                "fecha_fin": "2025-03-15"
            }
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "Validation error");
    assert_eq!(body["details"], "planned hours must be a positive number");
}

#[tokio::test]
async fn test_create_project_with_inverted_dates() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "method": "CREATE",
            "projectData": {
                "nombre": "Backwards",
                "horas_planificadas": 10.0,
                "tarifa_hora": 50.0,
                "fecha_inicio": "2025-03-15",
                "fecha_fin": "2025-01-01"
            }
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_project_without_data() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({ "method": "CREATE" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_method_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({ "method": "PURGE" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/projects")
        .content_type("application/json")
        .text("{ not json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_executed_hours() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project = factory.create_project().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "method": "UPDATE",
            "projectId": project.id,
            "projectData": { "horas_ejecutadas": 85.0 }
        }))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "success": true }));

    let projects = list_projects(&app).await;
    let listed = find(&projects, project.id).unwrap();
    assert_eq!(listed["horas_ejecutadas"], 85.0);
    assert_eq!(listed["nombre"], project.name.as_str());
}

#[tokio::test]
async fn test_update_with_null_clears_opportunity() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project = factory.create_project().await;

    let projects = list_projects(&app).await;
    let listed = find(&projects, project.id).unwrap();
    assert_eq!(listed["numero_oportunidad"], "OP-1001");
    assert_eq!(listed["monto_oportunidad"], 45000.0);

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "method": "UPDATE",
            "projectId": project.id,
            "projectData": { "numero_oportunidad": null, "monto_oportunidad": null }
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let projects = list_projects(&app).await;
    let listed = find(&projects, project.id).unwrap();
    assert!(listed["numero_oportunidad"].is_null());
    assert!(listed["monto_oportunidad"].is_null());
    assert_eq!(listed["nombre"], project.name.as_str());
}

#[tokio::test]
async fn test_update_without_opportunity_keeps_it() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project = factory.create_project().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "method": "UPDATE",
            "projectId": project.id,
            "projectData": { "horas_ejecutadas": 2.0 }
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let projects = list_projects(&app).await;
    let listed = find(&projects, project.id).unwrap();
    assert_eq!(listed["numero_oportunidad"], "OP-1001");
}

#[tokio::test]
async fn test_update_rejects_invalid_merge() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project = factory.create_project().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "method": "UPDATE",
            "projectId": project.id,
            "projectData": { "fecha_fin": "2024-12-01" }
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let stored = ProjectRepository::find_by_id(&app.state.db, project.id)
        .await
        .unwrap();
    assert_eq!(stored.end_date(), project.end_date());
}

#[tokio::test]
async fn test_update_without_id() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "method": "UPDATE",
            "projectData": { "horas_ejecutadas": 1.0 }
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_project() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "method": "UPDATE",
            "projectId": Uuid::new_v4(),
            "projectData": { "horas_ejecutadas": 1.0 }
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_finished_project_stays_listed() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project = factory.create_project().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "method": "UPDATE",
            "projectId": project.id,
            "projectData": { "terminado": true }
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let projects = list_projects(&app).await;
    let listed = find(&projects, project.id).unwrap();
    assert_eq!(listed["terminado"], true);
    assert_eq!(listed["visible"], true);
}

#[tokio::test]
async fn test_delete_project_twice() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project = factory.create_project().await;

    for _ in 0..2 {
        let response = app
            .server
            .post("/api/projects")
            .json(&json!({ "method": "DELETE", "projectId": project.id }))
            .await;

        response.assert_status(StatusCode::OK);
    }

    let projects = list_projects(&app).await;
    assert!(find(&projects, project.id).is_none());

    // Soft delete keeps the row
    let stored = ProjectRepository::find_by_id(&app.state.db, project.id)
        .await
        .unwrap();
    assert!(!stored.visible);
}

#[tokio::test]
async fn test_delete_unknown_project() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({ "method": "DELETE", "projectId": Uuid::new_v4() }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["details"], "Project");
}

#[tokio::test]
async fn test_add_observations_in_order() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project = factory.create_project().await;

    let mut ids = Vec::new();
    for text in ["Kickoff done", "Design approved"] {
        let response = app
            .server
            .post("/api/projects")
            .json(&json!({
                "method": "ADD_OBSERVATION",
                "projectId": project.id,
                "projectData": { "texto": text }
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    let projects = list_projects(&app).await;
    let observations = find(&projects, project.id).unwrap()["observaciones"]
        .as_array()
        .unwrap()
        .clone();

    assert_eq!(observations.len(), 2);
    assert_eq!(observations[0]["texto"], "Kickoff done");
    assert_eq!(observations[0]["id"], ids[0].as_str());
    assert_eq!(observations[1]["texto"], "Design approved");
}

#[tokio::test]
async fn test_add_blank_observation() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let project = factory.create_project().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "method": "ADD_OBSERVATION",
            "projectId": project.id,
            "projectData": { "texto": "   " }
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_observation_to_unknown_project() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "method": "ADD_OBSERVATION",
            "projectId": Uuid::new_v4(),
            "projectData": { "texto": "Lost note" }
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
