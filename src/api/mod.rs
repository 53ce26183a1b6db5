pub mod routes;
pub mod models;
pub mod errors;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::session::Workspace;

#[derive(Clone)]
pub struct AppState {
    pub workspace: Workspace,
}

impl AppState {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/projects", post(routes::projects::create_project))
        .route("/api/projects/current", get(routes::projects::current_project))
        .route("/api/pipeline", get(routes::pipeline::get_pipeline))
        .route("/api/pipeline/run", post(routes::pipeline::run_pipeline))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
