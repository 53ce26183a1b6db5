use super::types::InfraFlowError;

impl InfraFlowError {
    /// Stable label for this error, attached to structured log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            InfraFlowError::Config(_) => "ConfigError",
            InfraFlowError::Unavailable(_) => "UnavailableError",
            InfraFlowError::Authentication(_) => "AuthenticationError",
            InfraFlowError::LLMApi(_) => "LLMApiError",
            InfraFlowError::RateLimit(_) => "RateLimitError",
            InfraFlowError::Timeout(_) => "TimeoutError",
            InfraFlowError::Network(_) => "NetworkError",
            InfraFlowError::InvalidPrompt(_) => "InvalidPromptError",
            InfraFlowError::PipelineBusy(_) => "PipelineBusyError",
            InfraFlowError::InvalidTransition(_) => "InvalidTransitionError",
            InfraFlowError::Io(_) => "IoError",
            InfraFlowError::Json(_) => "JsonError",
            InfraFlowError::Yaml(_) => "YamlError",
            InfraFlowError::Internal(_) => "InternalError",
        }
    }
}
