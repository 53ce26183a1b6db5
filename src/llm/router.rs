use std::sync::Arc;
use std::time::Duration;
use reqwest::Client;
use tracing::{info, warn};
use crate::config::LlmSettings;
use crate::errors::InfraFlowError;
use super::provider::LLMProvider;
use super::openai::OpenAIProvider;
use super::gemini::GeminiProvider;
use super::catalog;

pub fn create_provider(
    provider_name: &str,
    api_key: &str,
    model: Option<&str>,
    base_url: Option<&str>,
    client: Client,
) -> Result<Box<dyn LLMProvider>, InfraFlowError> {
    match provider_name {
        "gemini" => {
            let mut provider = GeminiProvider::new(api_key, model).with_client(client);
            if let Some(url) = base_url {
                provider = provider.with_base_url(url);
            }
            Ok(Box::new(provider))
        }
        "openai" => match base_url {
            Some(url) => Ok(Box::new(OpenAIProvider::with_base_url(api_key, model, url).with_client(client))),
            None => Ok(Box::new(OpenAIProvider::new(api_key, model).with_client(client))),
        },
        "local" => {
            let url = base_url
                .or_else(|| catalog::get_provider("local").and_then(|p| p.base_url))
                .unwrap_or("http://localhost:11434/v1");
            Ok(Box::new(OpenAIProvider::with_base_url(api_key, model, url).with_client(client)))
        }
        _ => Err(InfraFlowError::Config(format!("Unknown LLM provider: {}", provider_name))),
    }
}

/// The text-generation collaborators used by the generator and the log
/// synthesizer. `None` means no collaborator is reachable and both
/// components run on their fallbacks.
#[derive(Clone, Default)]
pub struct Collaborators {
    pub generation: Option<Arc<dyn LLMProvider>>,
    pub logs: Option<Arc<dyn LLMProvider>>,
}

impl Collaborators {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.generation.is_some() || self.logs.is_some()
    }
}

pub fn create_collaborators(settings: &LlmSettings) -> Result<Collaborators, InfraFlowError> {
    let info = catalog::get_provider(&settings.provider)
        .ok_or_else(|| InfraFlowError::Config(format!("Unknown LLM provider: {}", settings.provider)))?;

    let api_key = settings.api_key.as_deref().unwrap_or("");
    if info.requires_key && api_key.is_empty() {
        warn!(
            provider = info.id,
            env_var = info.env_var,
            "No API key configured, generation will use simulated fallbacks"
        );
        return Ok(Collaborators::unavailable());
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .map_err(|e| InfraFlowError::Config(format!("Failed to build HTTP client: {}", e)))?;

    let generation_model = settings.generation_model.as_deref().unwrap_or(info.generation_model);
    let log_model = settings.log_model.as_deref().unwrap_or(info.log_model);
    let base_url = settings.base_url.as_deref();

    let generation: Arc<dyn LLMProvider> = Arc::from(
        create_provider(info.id, api_key, Some(generation_model), base_url, client.clone())?
    );
    let logs: Arc<dyn LLMProvider> = Arc::from(
        create_provider(info.id, api_key, Some(log_model), base_url, client)?
    );

    info!(
        provider = info.id,
        generation_model,
        log_model,
        "Text-generation collaborator configured"
    );

    Ok(Collaborators {
        generation: Some(generation),
        logs: Some(logs),
    })
}
