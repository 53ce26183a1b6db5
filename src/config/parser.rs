use std::path::Path;
use crate::errors::InfraFlowError;
use crate::llm::catalog;
use super::types::InfraFlowConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::{debug, warn};

const MAX_CONFIG_BYTES: u64 = 1_048_576;

/// Load the config file at `path`, or the defaults when no file is given.
pub async fn load_config(path: Option<&Path>) -> Result<InfraFlowConfig, InfraFlowError> {
    match path {
        Some(path) => parse_config(path).await,
        None => {
            debug!("No config file given, using defaults");
            Ok(InfraFlowConfig::default())
        }
    }
}

pub async fn parse_config(path: &Path) -> Result<InfraFlowConfig, InfraFlowError> {
    if !path.exists() {
        return Err(InfraFlowError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(InfraFlowError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<InfraFlowConfig, InfraFlowError> {
    // An empty file is an empty mapping.
    if content.trim().is_empty() {
        return Ok(InfraFlowConfig::default());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    validate_schema(&yaml)?;

    let config: InfraFlowConfig = serde_yaml::from_value(yaml)?;

    validate_conflicts(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), InfraFlowError> {
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| InfraFlowError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| InfraFlowError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        // Advisory only: typed parsing below is authoritative.
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

/// Detect semantic conflicts in the parsed configuration.
fn validate_conflicts(config: &InfraFlowConfig) -> Result<(), InfraFlowError> {
    if let Some(llm) = &config.llm {
        if let Some(provider) = &llm.provider {
            if catalog::get_provider(provider).is_none() {
                return Err(InfraFlowError::Config(format!("Unknown LLM provider: {}", provider)));
            }
        }
        if llm.timeout_secs == Some(0) {
            return Err(InfraFlowError::Config("llm.timeout_secs must be at least 1".into()));
        }
    }

    if let Some(pacing) = &config.pacing {
        if pacing.line_delay_min_ms > pacing.line_delay_max_ms {
            return Err(InfraFlowError::Config(format!(
                "pacing.line_delay_min_ms ({}) exceeds pacing.line_delay_max_ms ({})",
                pacing.line_delay_min_ms, pacing.line_delay_max_ms
            )));
        }
    }

    Ok(())
}
