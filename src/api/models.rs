use serde::{Deserialize, Serialize};
use crate::models::{PipelineStepKind, PipelineStepStatus};
use crate::pipeline::PipelineState;

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Serialize)]
pub struct RunResponse {
    pub started: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

#[derive(Serialize)]
pub struct StepView {
    pub id: String,
    pub kind: PipelineStepKind,
    pub label: String,
    pub status: PipelineStepStatus,
}

#[derive(Serialize)]
pub struct PipelineView {
    pub project_id: Option<String>,
    pub running: bool,
    pub steps: Vec<StepView>,
    pub logs: Vec<String>,
}

impl From<PipelineState> for PipelineView {
    fn from(state: PipelineState) -> Self {
        let steps = state.steps().iter()
            .map(|step| StepView {
                id: step.id.clone(),
                kind: step.kind,
                label: step.label.clone(),
                status: step.status,
            })
            .collect();
        Self {
            project_id: state.project.as_ref().map(|p| p.id.clone()),
            running: state.running,
            steps,
            logs: state.logs,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
