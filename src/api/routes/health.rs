use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "infraflow",
        "version": env!("CARGO_PKG_VERSION"),
        "build": env!("BUILD_TIMESTAMP"),
        "commit": option_env!("GIT_HASH"),
    }))
}
