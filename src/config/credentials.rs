use tracing::debug;
use crate::llm::catalog;
use super::types::{InfraFlowConfig, LlmOverrides, LlmSettings, DEFAULT_PROVIDER, DEFAULT_TIMEOUT_SECS};

/// Generic variable consulted when no provider-specific key is set.
pub const GENERIC_API_KEY_VAR: &str = "API_KEY";

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// Redact sensitive values in a string. Replaces known credential patterns
/// with [REDACTED].
pub fn redact_credentials(text: &str, secrets: &[&str]) -> String {
    let mut result = text.to_string();
    for secret in secrets {
        if !secret.is_empty() && secret.len() >= 4 {
            result = result.replace(secret, "[REDACTED]");
        }
    }
    result
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Look up the API key in the environment: provider-specific variable first,
/// then `API_KEY`.
pub fn api_key_from_env(provider: &str) -> Option<String> {
    let specific = catalog::get_provider(provider)
        .map(|p| p.env_var)
        .filter(|var| !var.is_empty())
        .and_then(|var| std::env::var(var).ok());
    non_empty(specific).or_else(|| non_empty(std::env::var(GENERIC_API_KEY_VAR).ok()))
}

/// Merge command-line overrides, the config file and the environment.
///
/// Key order: flag, then `llm.api_key` (with `$VAR` expansion), then environment.
pub fn resolve_llm_settings(config: &InfraFlowConfig, overrides: &LlmOverrides) -> LlmSettings {
    let file = config.llm.clone().unwrap_or_default();

    let provider = overrides.provider.clone()
        .or(file.provider)
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    let file_key = file.api_key
        .map(|k| resolve_credential(&k))
        .filter(|k| !k.starts_with('$'));

    let api_key = non_empty(overrides.api_key.clone())
        .or_else(|| non_empty(file_key))
        .or_else(|| api_key_from_env(&provider));

    LlmSettings {
        api_key,
        base_url: file.base_url,
        generation_model: overrides.model.clone().or(file.generation_model),
        log_model: overrides.model.clone().or(file.log_model),
        timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        provider,
    }
}
