use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::errors::InfraFlowError;

impl IntoResponse for InfraFlowError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            InfraFlowError::Config(_) | InfraFlowError::InvalidPrompt(_) => StatusCode::BAD_REQUEST,
            InfraFlowError::PipelineBusy(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({"error": self.to_string(), "type": self.error_type()}))).into_response()
    }
}
