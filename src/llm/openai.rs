use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::errors::InfraFlowError;
use super::json::parse_json_response;
use super::provider::LLMProvider;
use super::types::LLMResponse;

/// Chat-completions client. Also used for OpenAI-compatible local servers
/// such as Ollama through [`OpenAIProvider::with_base_url`].
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    name: &'static str,
}

impl OpenAIProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or("gpt-4o").to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            name: "openai",
        }
    }

    pub fn with_base_url(api_key: &str, model: Option<&str>, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            name: "openai-compatible",
            ..Self::new(api_key, model)
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    async fn chat(&self, messages: Vec<Value>, json_mode: bool) -> Result<LLMResponse, InfraFlowError> {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": 4096,
        });
        if json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let mut request = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if !self.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                InfraFlowError::Timeout(format!("{} request timed out: {}", self.name, e))
            } else {
                InfraFlowError::Network(format!("{} request failed: {}", self.name, e))
            }
        })?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(InfraFlowError::RateLimit(format!("{} rate limit", self.name)));
        }
        if status.as_u16() == 401 {
            return Err(InfraFlowError::Authentication(format!("Invalid {} API key", self.name)));
        }

        let data: Value = resp.json().await
            .map_err(|e| InfraFlowError::LLMApi(format!("Failed to parse {} response: {}", self.name, e)))?;

        if let Some(error) = data.get("error") {
            return Err(InfraFlowError::LLMApi(error["message"].as_str().unwrap_or("Unknown").to_string()));
        }

        let content = data["choices"][0]["message"]["content"].as_str()
            .ok_or_else(|| InfraFlowError::LLMApi(format!("No content in {} response", self.name)))?
            .to_string();

        Ok(LLMResponse {
            content,
            input_tokens: data["usage"]["prompt_tokens"].as_u64(),
            output_tokens: data["usage"]["completion_tokens"].as_u64(),
            model: self.model.clone(),
        })
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, InfraFlowError> {
        let mut messages = Vec::new();
        if let Some(sys) = system {
            messages.push(json!({"role": "system", "content": sys}));
        }
        messages.push(json!({"role": "user", "content": prompt}));
        self.chat(messages, false).await
    }

    async fn complete_structured(&self, prompt: &str, schema: &Value, system: Option<&str>) -> Result<Value, InfraFlowError> {
        let mut messages = Vec::new();
        if let Some(sys) = system {
            messages.push(json!({"role": "system", "content": sys}));
        }
        messages.push(json!({"role": "user", "content": format!(
            "{}\n\nRespond ONLY with valid JSON matching this schema:\n{}",
            prompt,
            serde_json::to_string_pretty(schema)?
        )}));

        let response = self.chat(messages, true).await?;
        parse_json_response(&response.content)
    }

    fn provider_name(&self) -> &str { self.name }
    fn model_name(&self) -> &str { &self.model }
}
