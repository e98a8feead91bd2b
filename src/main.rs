use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hourglow::config::{Config, LogFormat};
use hourglow::handlers::{DashboardResponse, ProjectResponse, VisitResponse};
use hourglow::models::{
    Ack, ObservationDraft, ObservationRecord, ProjectDraft, ProjectPatch, ProjectRecord,
    ProjectRequest, RequestMethod, VisitDraft, VisitPatch, VisitRecord, VisitRequest,
};
use hourglow::services::{Budget, DashboardTotals, ProgressStatus, ProjectMetrics};
use hourglow::state::AppState;
use hourglow::{build_router, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::project::handle_projects,
        handlers::visit::handle_visits,
        handlers::dashboard::get_dashboard,
    ),
    components(schemas(
        RequestMethod,
        ProjectRequest,
        ProjectDraft,
        ProjectPatch,
        ObservationDraft,
        ProjectRecord,
        ObservationRecord,
        ProjectResponse,
        VisitRequest,
        VisitDraft,
        VisitPatch,
        VisitRecord,
        VisitResponse,
        Ack,
        DashboardResponse,
        DashboardTotals,
        ProjectMetrics,
        ProgressStatus,
        Budget,
    )),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Projects", description = "Consulting project persistence (tag-dispatched)"),
        (name = "Visits", description = "Commercial visit persistence (tag-dispatched)"),
        (name = "Dashboard", description = "Aggregate KPIs")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    // Initialize application state (connects and migrates)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.expect("Server error");
}
