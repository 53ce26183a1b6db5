use axum::{extract::State, http::StatusCode, Json};
use tracing::info;
use crate::api::models::{PipelineView, RunResponse};
use crate::api::AppState;

pub async fn get_pipeline(State(state): State<AppState>) -> Json<PipelineView> {
    Json(state.workspace.simulator.snapshot().into())
}

/// Start a run in the background. An ignored request answers 200 with the
/// reason instead of an error status.
pub async fn run_pipeline(State(state): State<AppState>) -> (StatusCode, Json<RunResponse>) {
    match state.workspace.simulator.spawn_run() {
        Ok(_handle) => {
            info!("Pipeline run started via API");
            (StatusCode::ACCEPTED, Json(RunResponse { started: true, reason: None }))
        }
        Err(outcome) => (
            StatusCode::OK,
            Json(RunResponse { started: false, reason: outcome.reason() }),
        ),
    }
}
