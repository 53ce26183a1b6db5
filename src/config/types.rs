use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct InfraFlowConfig {
    pub llm: Option<LLMConfig>,
    pub pacing: Option<PacingConfig>,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LLMConfig {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub generation_model: Option<String>,
    pub log_model: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PacingConfig {
    pub line_delay_min_ms: u64,
    pub line_delay_max_ms: u64,
    pub step_pause_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            line_delay_min_ms: 40,
            line_delay_max_ms: 140,
            step_pause_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

pub const DEFAULT_PROVIDER: &str = "gemini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Fully resolved collaborator settings after merging flags, file and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub provider: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub generation_model: Option<String>,
    pub log_model: Option<String>,
    pub timeout_secs: u64,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct LlmOverrides {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl InfraFlowConfig {
    pub fn pacing(&self) -> PacingConfig {
        self.pacing.clone().unwrap_or_default()
    }

    pub fn server_host(&self) -> Option<&str> {
        self.server.as_ref()?.host.as_deref()
    }

    pub fn server_port(&self) -> Option<u16> {
        self.server.as_ref()?.port
    }
}
