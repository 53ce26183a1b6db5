use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraFlowError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation unavailable: {0}")]
    Unavailable(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("Pipeline busy: {0}")]
    PipelineBusy(String),

    #[error("Invalid step transition: {0}")]
    InvalidTransition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
