// Library crate for Hourglow
// Exports modules for use by the dashboard binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod store;
pub mod view;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{get_dashboard, handle_projects, handle_visits};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Hello, Hourglow!" }))
        // Tag-dispatched persistence endpoints
        .route("/api/projects", post(handle_projects))
        .route("/api/visits", post(handle_visits))
        .route("/api/dashboard", get(get_dashboard))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
