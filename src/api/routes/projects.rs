use axum::{extract::State, http::StatusCode, Json};
use crate::api::models::{CreateProjectRequest, ErrorResponse};
use crate::api::AppState;
use crate::errors::InfraFlowError;
use crate::models::Project;

pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), InfraFlowError> {
    let project = state.workspace.create_project(&req.prompt).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn current_project(
    State(state): State<AppState>,
) -> Result<Json<Project>, (StatusCode, Json<ErrorResponse>)> {
    state.workspace.current_project()
        .map(Json)
        .ok_or_else(|| (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse { error: "No project loaded".into() }),
        ))
}
